use crate::Feature;
use crate::models::{
    CreateCourseRequest, CreateCourseResponse, ListCoursesQuery, ListCoursesResponse, PageRequest,
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chub_domain::constants::COURSES_TAG;
use chub_kernel::server::{ApiError, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes owned by this slice.
pub fn courses_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(create_course, list_courses))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = CREATED, description = "Course created", body = CreateCourseResponse),
        (status = BAD_REQUEST, description = "Invalid course payload", body = ErrorBody),
    ),
    tag = COURSES_TAG,
)]
async fn create_course(
    State(state): State<ApiState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let feature = state.try_get_slice::<Feature>()?;

    let course = payload.validate()?;
    let id = feature.repository().insert(&course).await?;

    Ok((StatusCode::CREATED, Json(CreateCourseResponse { course_id: id.to_string() })))
}

#[utoipa::path(
    get,
    path = "/courses",
    params(ListCoursesQuery),
    responses(
        (status = OK, description = "One page of courses plus the filter-wide total", body = ListCoursesResponse),
        (status = BAD_REQUEST, description = "Malformed query parameters", body = ErrorBody),
    ),
    tag = COURSES_TAG,
)]
async fn list_courses(
    State(state): State<ApiState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<ListCoursesResponse>, ApiError> {
    let feature = state.try_get_slice::<Feature>()?;

    let page = PageRequest::new(query.page, feature.page_size());
    let (courses, total) =
        feature.repository().list(query.search.as_deref(), query.order_by, page).await?;

    Ok(Json(ListCoursesResponse { courses, total }))
}
