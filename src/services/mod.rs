//! Business logic services

pub mod categories;
pub mod events;
pub mod guides;
pub mod multimedia;
pub mod news;
pub mod publications;
pub mod resources;
pub mod slug;
pub mod uploads;
pub mod verifiers;

use chrono::{DateTime, Utc};

use crate::{
    config::{PaginationConfig, UploadsConfig},
    error::AppResult,
    models::{Category, ElectoralGuide, Event, Multimedia, News, Publication, Verifier},
    repository::{Repository, Resource},
};

pub use resources::ResourceService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub publications: ResourceService<Publication>,
    pub categories: ResourceService<Category>,
    pub news: ResourceService<News>,
    pub multimedia: ResourceService<Multimedia>,
    pub events: ResourceService<Event>,
    pub guides: ResourceService<ElectoralGuide>,
    pub verifiers: ResourceService<Verifier>,
    pub uploads: uploads::UploadsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, pagination: PaginationConfig, uploads: UploadsConfig) -> Self {
        Self {
            publications: ResourceService::new(repository.publications.clone(), pagination),
            categories: ResourceService::new(repository.categories.clone(), pagination),
            news: ResourceService::new(repository.news.clone(), pagination),
            multimedia: ResourceService::new(repository.multimedia.clone(), pagination),
            events: ResourceService::new(repository.events.clone(), pagination),
            guides: ResourceService::new(repository.guides.clone(), pagination),
            verifiers: ResourceService::new(repository.verifiers.clone(), pagination),
            uploads: uploads::UploadsService::new(uploads),
            repository,
        }
    }

    /// Database clock, proves the pool can reach PostgreSQL
    pub async fn database_time(&self) -> AppResult<DateTime<Utc>> {
        self.repository.now().await
    }
}

/// Selects the service of one resource type, so handlers can be written once
/// for every resource
pub trait ResourceAccess<R: Resource> {
    fn resource(&self) -> &ResourceService<R>;
}

macro_rules! resource_access {
    ($($resource:ty => $field:ident),+ $(,)?) => {
        $(
            impl ResourceAccess<$resource> for Services {
                fn resource(&self) -> &ResourceService<$resource> {
                    &self.$field
                }
            }
        )+
    };
}

resource_access! {
    Publication => publications,
    Category => categories,
    News => news,
    Multimedia => multimedia,
    Event => events,
    ElectoralGuide => guides,
    Verifier => verifiers,
}
