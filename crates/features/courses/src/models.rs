//! Request/response contracts for the course catalog.

use crate::error::CoursesError;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Minimum accepted course title length, in characters.
pub const MIN_TITLE_LENGTH: usize = 5;

/// Body of `POST /courses`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCourseRequest {
    /// Course title; at least [`MIN_TITLE_LENGTH`] characters.
    pub title: String,
    /// Required key; an explicit `null` marks a course without description.
    #[serde(default, deserialize_with = "explicit_null")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
}

/// Distinguishes an absent key (outer `None`) from an explicit `null`
/// (inner `None`); plain serde collapses both into one `None`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl CreateCourseRequest {
    /// Checks the declared constraints; runs before any handler logic.
    ///
    /// # Errors
    /// Returns a validation error for a short title or a missing
    /// `description` key.
    pub fn validate(self) -> Result<NewCourse, CoursesError> {
        if self.title.chars().count() < MIN_TITLE_LENGTH {
            return Err(CoursesError::Validation {
                message: format!("title must be at least {MIN_TITLE_LENGTH} characters long")
                    .into(),
                context: None,
            });
        }

        let Some(description) = self.description else {
            return Err(CoursesError::Validation {
                message: "description is required; send null for courses without one".into(),
                context: None,
            });
        };

        Ok(NewCourse { title: self.title, description })
    }
}

/// A validated course ready for insertion.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
}

/// Body of the `201` answer to `POST /courses`.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseResponse {
    /// Identifier generated by the store.
    pub course_id: String,
}

/// Query parameters of `GET /courses`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesQuery {
    /// Case-insensitive substring filter on the title.
    pub search: Option<String>,
    /// Sort column, ascending.
    #[serde(default)]
    pub order_by: CourseOrder,
    /// 1-based page number; values below 1 behave like page 1.
    #[serde(default = "default_page")]
    pub page: i64,
}

const fn default_page() -> i64 {
    1
}

impl Default for ListCoursesQuery {
    fn default() -> Self {
        Self { search: None, order_by: CourseOrder::default(), page: default_page() }
    }
}

/// Orderable listing columns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CourseOrder {
    /// Identifier order.
    #[default]
    Id,
    /// Lexicographic title order.
    Title,
}

impl CourseOrder {
    /// The column this order maps onto; used to assemble the `ORDER BY` clause.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
        }
    }
}

/// Offset/limit window derived from a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Builds the window for a 1-based `page`. The offset saturates at zero,
    /// so page numbers below 1 behave like page 1.
    #[must_use]
    pub fn new(page: i64, page_size: u32) -> Self {
        let page_size = i64::from(page_size);
        Self { offset: page.saturating_sub(1).max(0).saturating_mul(page_size), limit: page_size }
    }
}

/// One listing row: identity plus the enrollment aggregate.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    /// Number of enrollments; zero when nobody enrolled yet.
    pub enrollments: i64,
}

/// Body of the `200` answer to `GET /courses`.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    /// One page, in the requested order.
    pub courses: Vec<CourseSummary>,
    /// Courses matching the filter, ignoring pagination.
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> Result<CreateCourseRequest, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn titles_shorter_than_the_minimum_are_rejected() {
        let req = request(json!({ "title": "Rust", "description": null })).expect("deserializes");
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("5 characters"));
    }

    #[test]
    fn a_five_character_title_is_the_boundary() {
        let req = request(json!({ "title": "Rusty", "description": null })).expect("deserializes");
        let course = req.validate().expect("valid at the boundary");
        assert_eq!(course.title, "Rusty");
        assert!(course.description.is_none());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // Five characters, more than five bytes.
        let req = request(json!({ "title": "héllo", "description": null })).expect("deserializes");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_description_key_is_rejected() {
        let req = request(json!({ "title": "Rust for Rustaceans" })).expect("deserializes");
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn explicit_null_description_is_accepted() {
        let req = request(json!({ "title": "Rust for Rustaceans", "description": null }))
            .expect("deserializes");
        let course = req.validate().expect("null is an explicit absence marker");
        assert_eq!(course.description, None);
    }

    #[test]
    fn present_description_is_kept() {
        let req = request(json!({ "title": "Rust for Rustaceans", "description": "deep dive" }))
            .expect("deserializes");
        let course = req.validate().expect("valid");
        assert_eq!(course.description.as_deref(), Some("deep dive"));
    }

    #[test]
    fn unknown_body_fields_are_rejected() {
        let result = request(json!({
            "title": "Rust for Rustaceans",
            "description": null,
            "price": 10
        }));
        assert!(result.is_err());
    }

    #[test]
    fn query_defaults_match_the_contract() {
        let query: ListCoursesQuery = serde_json::from_value(json!({})).expect("deserializes");
        assert_eq!(query.order_by, CourseOrder::Id);
        assert_eq!(query.page, 1);
        assert!(query.search.is_none());

        // `Default` mirrors the serde defaults.
        let default = ListCoursesQuery::default();
        assert_eq!(default.order_by, query.order_by);
        assert_eq!(default.page, query.page);
    }

    #[test]
    fn order_by_accepts_only_the_allowed_set() {
        let query: ListCoursesQuery =
            serde_json::from_value(json!({ "orderBy": "title" })).expect("deserializes");
        assert_eq!(query.order_by, CourseOrder::Title);
        assert_eq!(query.order_by.column(), "title");

        let result: Result<ListCoursesQuery, _> =
            serde_json::from_value(json!({ "orderBy": "description" }));
        assert!(result.is_err());
    }

    #[test]
    fn page_windows_are_offset_times_page_size() {
        assert_eq!(PageRequest::new(1, 10), PageRequest { offset: 0, limit: 10 });
        assert_eq!(PageRequest::new(2, 10), PageRequest { offset: 10, limit: 10 });
        assert_eq!(PageRequest::new(7, 25), PageRequest { offset: 150, limit: 25 });
    }

    #[test]
    fn nonpositive_pages_behave_like_page_one() {
        assert_eq!(PageRequest::new(0, 10), PageRequest::new(1, 10));
        assert_eq!(PageRequest::new(-3, 10), PageRequest::new(1, 10));
    }

    #[test]
    fn responses_use_camel_case_wire_names() {
        let response = CreateCourseResponse { course_id: "abc".to_owned() };
        let value = serde_json::to_value(&response).expect("serializes");
        assert_eq!(value, json!({ "courseId": "abc" }));

        let id = Uuid::nil();
        let listing = ListCoursesResponse {
            courses: vec![CourseSummary { id, title: "Intro".to_owned(), enrollments: 0 }],
            total: 1,
        };
        let value = serde_json::to_value(&listing).expect("serializes");
        assert_eq!(
            value,
            json!({
                "courses": [{
                    "id": "00000000-0000-0000-0000-000000000000",
                    "title": "Intro",
                    "enrollments": 0
                }],
                "total": 1
            })
        );
    }
}
