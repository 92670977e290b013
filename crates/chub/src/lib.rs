//! Facade crate for CourseHub features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `chub` with the `server` feature flag.
//! - Call `chub::init` to register feature slices; extend as new slices appear.

pub use chub_domain as domain;
pub use chub_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use chub_courses::courses_router;
        pub use chub_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use chub_courses as courses;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "courses",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &chub_domain::config::ApiConfig,
    database: &chub_database::Database,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Courses
    slices.push(features::courses::init(config, database)?);

    Ok(slices)
}
