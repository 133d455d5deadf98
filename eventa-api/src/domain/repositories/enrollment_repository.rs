use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::enrollment::Enrollment;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Enrollment>, sqlx::Error>;

    async fn find_by_id(&self, enrollment_id: i32) -> Result<Option<Enrollment>, sqlx::Error>;
}

pub struct MysqlEnrollmentRepository {
    pool: MySqlPool,
}

impl MysqlEnrollmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for MysqlEnrollmentRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_by_id(&self, enrollment_id: i32) -> Result<Option<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE id = ?
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
    }
}
