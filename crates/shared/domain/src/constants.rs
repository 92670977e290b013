//! Entity names and OpenAPI tags shared across slices.

/// Primary catalog entity.
pub const COURSE: &str = "course";
/// Aggregate-only entity; read as a per-course count.
pub const ENROLLMENT: &str = "enrollment";

/// OpenAPI tag for the course catalog endpoints.
pub const COURSES_TAG: &str = "Courses";
/// OpenAPI tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";
