//! Course catalog feature slice.
//!
//! Two operations: create a course, and list courses with optional text
//! search, sorting, and pagination, annotated with enrollment counts.

mod error;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
mod server;

pub use crate::error::{CoursesError, CoursesErrorExt};
#[cfg(feature = "server")]
pub use crate::server::courses_router;

use crate::repository::CourseRepository;
use chub_database::Database;
use chub_domain::config::ApiConfig;
use chub_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Feature inner state
#[derive(Debug)]
pub struct FeatureInner {
    repository: CourseRepository,
    page_size: u32,
}

impl FeatureInner {
    /// Repository owning every query this slice issues.
    #[must_use]
    pub const fn repository(&self) -> &CourseRepository {
        &self.repository
    }

    /// Listing page size; drives both the offset multiplier and the row cap.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Feature handle registered in the kernel state.
#[derive(Debug, Clone)]
pub struct Feature {
    inner: Arc<FeatureInner>,
}

impl Feature {
    fn new(inner: FeatureInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Feature {
    type Target = FeatureInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Feature {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the feature
///
/// # Errors
/// Returns an error if the configured page size is zero.
pub fn init(config: &ApiConfig, database: &Database) -> Result<InitializedSlice, CoursesError> {
    if config.catalog.page_size == 0 {
        return Err(CoursesError::Validation {
            message: "catalog.page_size must be greater than zero".into(),
            context: None,
        });
    }

    let slice = Feature::new(FeatureInner {
        repository: CourseRepository::new(database.clone()),
        page_size: config.catalog.page_size,
    });

    #[cfg(feature = "server")]
    tracing::info!("Courses server feature initialized");

    Ok(InitializedSlice::new(slice))
}
