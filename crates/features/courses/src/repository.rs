//! SQL access for the course catalog.

use crate::error::{CoursesError, CoursesErrorExt};
use crate::models::{CourseOrder, CourseSummary, NewCourse, PageRequest};
use chub_database::Database;
use tracing::instrument;
use uuid::Uuid;

/// Repository owning every query this slice issues.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: Database,
}

impl CourseRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts one course; the store generates the identifier.
    ///
    /// # Errors
    /// Storage failures (including constraint violations) propagate as-is;
    /// no retry is attempted.
    #[instrument(skip(self, course), fields(title = %course.title))]
    pub async fn insert(&self, course: &NewCourse) -> Result<Uuid, CoursesError> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO courses (title, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&course.title)
        .bind(course.description.as_deref())
        .fetch_one(&*self.db)
        .await
        .context("Inserting course")
    }

    /// One listing page plus the filter-wide total.
    ///
    /// The page and the total are independent queries issued concurrently;
    /// nothing ties them to one snapshot, so under concurrent writes they may
    /// disagree.
    ///
    /// # Errors
    /// Fails if either query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        search: Option<&str>,
        order: CourseOrder,
        page: PageRequest,
    ) -> Result<(Vec<CourseSummary>, i64), CoursesError> {
        tokio::try_join!(self.page(search, order, page), self.count(search))
    }

    async fn page(
        &self,
        search: Option<&str>,
        order: CourseOrder,
        page: PageRequest,
    ) -> Result<Vec<CourseSummary>, CoursesError> {
        sqlx::query_as::<_, CourseSummary>(&page_sql(order))
            .bind(search)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&*self.db)
            .await
            .context("Listing courses")
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, CoursesError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM courses WHERE $1::text IS NULL OR title ILIKE '%' || $1 || '%'",
        )
        .bind(search)
        .fetch_one(&*self.db)
        .await
        .context("Counting courses")
    }
}

/// The page query. Clause order is semantic: grouping must follow the join,
/// ordering applies to the grouped rows, and the window cuts the ordered set.
fn page_sql(order: CourseOrder) -> String {
    format!(
        "SELECT c.id, c.title, COUNT(e.id) AS enrollments \
         FROM courses AS c \
         LEFT JOIN enrollments AS e ON e.course_id = c.id \
         WHERE $1::text IS NULL OR c.title ILIKE '%' || $1 || '%' \
         GROUP BY c.id \
         ORDER BY c.{} ASC \
         OFFSET $2 LIMIT $3",
        order.column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_sql_orders_by_the_requested_column() {
        assert!(page_sql(CourseOrder::Id).contains("ORDER BY c.id ASC"));
        assert!(page_sql(CourseOrder::Title).contains("ORDER BY c.title ASC"));
    }

    #[test]
    fn page_sql_keeps_the_clause_pipeline_in_order() {
        let sql = page_sql(CourseOrder::Id);
        let positions = ["LEFT JOIN", "WHERE", "GROUP BY", "ORDER BY", "OFFSET"]
            .map(|clause| sql.find(clause).expect(clause));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
