//! OpenAPI documentation
//!
//! The shared CRUD routes are generic over the resource and are described in
//! the `/api` index; the resource-specific reads are listed here.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    categories, events, guides, health, multimedia, news, publications, uploads, verifiers,
};
use crate::models::{category, enums, event, guide, multimedia as media, news as news_model};
use crate::models::{publication, upload, verifier};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coalición API",
        version = "1.0.0",
        description = "Content management API for electoral transparency publications, news, multimedia, events, guides and verifiers",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::database_check,
        // Publications
        publications::list_with_category,
        publications::featured,
        publications::search_advanced,
        // Categories
        categories::active,
        // News
        news::by_status,
        news::upcoming,
        news::date_range,
        news::featured,
        // Multimedia
        multimedia::list_with_category,
        multimedia::by_type,
        multimedia::featured,
        // Events
        events::by_status,
        events::upcoming,
        events::by_type,
        // Guides
        guides::by_category,
        guides::by_type,
        guides::recent,
        // Verifiers
        verifiers::active,
        verifiers::by_type,
        // Uploads
        uploads::upload_file,
        uploads::upload_thumbnail,
        uploads::list_files,
        uploads::delete_file,
        uploads::download,
    ),
    components(
        schemas(
            publication::Publication,
            publication::CreatePublication,
            publication::UpdatePublication,
            category::Category,
            category::CreateCategory,
            category::UpdateCategory,
            news_model::News,
            news_model::CreateNews,
            news_model::UpdateNews,
            media::Multimedia,
            media::CreateMultimedia,
            media::UpdateMultimedia,
            event::Event,
            event::CreateEvent,
            event::UpdateEvent,
            guide::ElectoralGuide,
            guide::CreateGuide,
            guide::UpdateGuide,
            verifier::Verifier,
            verifier::CreateVerifier,
            verifier::UpdateVerifier,
            upload::UploadedFile,
            enums::PublicationType,
            enums::PublicationStatus,
            enums::NewsType,
            enums::ActivityStatus,
            enums::EventType,
            enums::MultimediaType,
            enums::GuideCategory,
            enums::GuideFormat,
            enums::VerifierType,
            health::HealthResponse,
            health::DatabaseCheck,
            crate::repository::Pagination,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health checks"),
        (name = "publicaciones", description = "Reports, studies and monitoring publications"),
        (name = "categorias", description = "Content categories"),
        (name = "noticias", description = "News and announcements"),
        (name = "multimedia", description = "Infographics, videos, art and presentations"),
        (name = "eventos", description = "Workshops, trainings, forums and debates"),
        (name = "guias-electorales", description = "Electoral guides"),
        (name = "verificadores", description = "Fact-checking tools"),
        (name = "uploads", description = "File storage")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_resource_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/publicaciones/featured"));
        assert!(doc.paths.paths.contains_key("/uploads/download/{type}/{format}/{filename}"));
    }
}
