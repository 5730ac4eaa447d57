//! Repository de vehículos

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

/// Campos editables de un vehículo listado
#[derive(Debug)]
pub struct VehicleUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub gear_type: Option<String>,
    pub base_price: Option<Decimal>,
    pub kms_per_unit: Option<i32>,
    pub features: Option<String>,
    pub specification: Option<String>,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        host_id: Uuid,
        vehicle_code: String,
        name: String,
        brand: String,
        vehicle_type: String,
        fuel_type: String,
        gear_type: String,
        city: String,
        sub_city: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        base_price: Decimal,
        kms_per_unit: i32,
        features: String,
        specification: Option<String>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (id, host_id, vehicle_code, name, brand, vehicle_type, fuel_type,
                 gear_type, city, sub_city, latitude, longitude, base_price,
                 rating, kms_per_unit, features, specification, is_available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    4.0, $14, $15, $16, true, $17)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(host_id)
        .bind(vehicle_code)
        .bind(name)
        .bind(brand)
        .bind(vehicle_type)
        .bind(fuel_type)
        .bind(gear_type)
        .bind(city)
        .bind(sub_city)
        .bind(latitude)
        .bind(longitude)
        .bind(base_price)
        .bind(kms_per_unit)
        .bind(features)
        .bind(specification)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_code(&self, vehicle_code: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_code = $1")
                .bind(vehicle_code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    pub async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE host_id = $1 ORDER BY created_at DESC",
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Inventario público: solo vehículos con el flag de disponibilidad
    pub async fn list_available(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE is_available = true ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn count_by_host(&self, host_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE host_id = $1")
            .bind(host_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn total_count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Actualizar un vehículo del host (los campos ausentes se conservan)
    pub async fn update(
        &self,
        id: Uuid,
        host_id: Uuid,
        update: VehicleUpdate,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual y verificar que pertenece al host
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        if current.host_id != host_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this host.".to_string(),
            ));
        }

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, brand = $3, vehicle_type = $4, fuel_type = $5,
                gear_type = $6, base_price = $7, kms_per_unit = $8,
                features = $9, specification = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name.unwrap_or(current.name))
        .bind(update.brand.unwrap_or(current.brand))
        .bind(update.vehicle_type.unwrap_or(current.vehicle_type))
        .bind(update.fuel_type.unwrap_or(current.fuel_type))
        .bind(update.gear_type.unwrap_or(current.gear_type))
        .bind(update.base_price.unwrap_or(current.base_price))
        .bind(update.kms_per_unit.unwrap_or(current.kms_per_unit))
        .bind(update.features.unwrap_or(current.features))
        .bind(update.specification.or(current.specification))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET is_available = $2 WHERE id = $1")
            .bind(id)
            .bind(is_available)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
