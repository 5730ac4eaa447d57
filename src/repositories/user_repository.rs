//! Repository de usuarios
//!
//! Lecturas de usuarios y las mutaciones de moderación de hosts
//! (aprobación, bloqueo con cascada sobre sus vehículos, tier).

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserRole};
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_host_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND role = 'host'")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn count_by_role(&self, role: UserRole) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Hosts pendientes de aprobación, más antiguos primero
    pub async fn pending_hosts(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = 'host' AND is_approved_host = false
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn mark_host_approved(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_approved_host = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Cambiar el estado activo de un host. Al bloquear, todos sus
    /// vehículos quedan no disponibles en la misma transacción; al
    /// reactivar, los vehículos NO se reactivan solos (lo hace el host).
    pub async fn set_host_active(&self, id: Uuid, is_active: bool) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&mut *tx)
            .await?;

        let mut cascaded = 0;
        if !is_active {
            let result = sqlx::query("UPDATE vehicles SET is_available = false WHERE host_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            cascaded = result.rows_affected();
        }

        tx.commit().await?;

        Ok(cascaded)
    }

    pub async fn set_commission_tier(&self, id: Uuid, tier: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET commission_tier = $2 WHERE id = $1")
            .bind(id)
            .bind(tier)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
