//! Admin repository. Rows are provisioned alongside the identity provider;
//! the service only reads them.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminEntity>(
            "SELECT id, email, name, created_at, updated_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}
