//! Controller de vehículos: inventario público y gestión del host

use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, HostBookingView, HostVehicleResponse, InventoryVehicleResponse,
    UpdateVehicleRequest, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::{VehicleRepository, VehicleUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::format_booking_datetime;

pub struct VehicleController {
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: VehicleRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
        }
    }

    /// Inventario público: vehículos disponibles con su calendario de
    /// reservas confirmadas para bloquear fechas en el cliente
    pub async fn inventory(&self) -> Result<Vec<InventoryVehicleResponse>, AppError> {
        let vehicles = self.vehicles.list_available().await?;
        let intervals = self.bookings.all_confirmed_intervals().await?;

        let mut booked_map: HashMap<Uuid, Vec<[String; 2]>> = HashMap::new();
        for interval in intervals {
            booked_map.entry(interval.vehicle_id).or_default().push([
                format_booking_datetime(&interval.start_date),
                format_booking_datetime(&interval.end_date),
            ]);
        }

        let inventory = vehicles
            .into_iter()
            .map(|v| {
                let booked = booked_map.remove(&v.id).unwrap_or_default();
                let features = v.feature_list();
                InventoryVehicleResponse {
                    id: v.vehicle_code,
                    db_id: v.id,
                    name: v.name,
                    brand: v.brand,
                    vehicle_type: v.vehicle_type,
                    fuel: v.fuel_type,
                    gear: v.gear_type,
                    city: v.city,
                    sub_city: v.sub_city,
                    lat: v.latitude,
                    lng: v.longitude,
                    base: v.base_price,
                    rating: v.rating,
                    features,
                    kms: v.kms_per_unit,
                    specification: v.specification,
                    booked,
                }
            })
            .collect();

        Ok(inventory)
    }

    /// Listar un vehículo nuevo del host
    pub async fn create(
        &self,
        host_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle_count = self.vehicles.count_by_host(host_id).await?;
        let vehicle_code = format!(
            "{}-{}-{}-{}",
            slugify(&request.name),
            slugify(&request.city),
            host_id.simple().to_string().chars().take(8).collect::<String>(),
            vehicle_count + 1
        );

        let vehicle = self
            .vehicles
            .create(
                host_id,
                vehicle_code,
                request.name,
                request.brand,
                request.vehicle_type,
                request.fuel_type,
                request.gear_type,
                request.city,
                request.sub_city,
                request.latitude,
                request.longitude,
                request.base_price,
                request.kms_per_unit.unwrap_or(50),
                request.features.map(|f| f.join(",")).unwrap_or_default(),
                request.specification,
            )
            .await?;

        let name = vehicle.name.clone();
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            format!("Vehicle '{}' listed successfully!", name),
        ))
    }

    /// Vehículos del host con sus reservas confirmadas
    pub async fn list_for_host(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<HostVehicleResponse>, AppError> {
        let vehicles = self.vehicles.find_by_host(host_id).await?;
        let bookings = self.bookings.confirmed_for_host_vehicles(host_id).await?;
        let now = Utc::now();

        let mut per_vehicle: HashMap<Uuid, Vec<HostBookingView>> = HashMap::new();
        let mut future_flags: HashMap<Uuid, bool> = HashMap::new();

        for row in bookings {
            if row.end_date > now {
                future_flags.insert(row.vehicle_id, true);
            }
            per_vehicle.entry(row.vehicle_id).or_default().push(HostBookingView {
                booking_id: row.booking_id,
                customer_name: row.customer_name,
                start_date: format_booking_datetime(&row.start_date),
                end_date: format_booking_datetime(&row.end_date),
            });
        }

        let response = vehicles
            .into_iter()
            .map(|v| {
                let has_future_booking = future_flags.get(&v.id).copied().unwrap_or(false);
                let bookings = per_vehicle.remove(&v.id).unwrap_or_default();
                HostVehicleResponse {
                    vehicle: v.into(),
                    has_future_booking,
                    bookings,
                }
            })
            .collect();

        Ok(response)
    }

    /// Editar un vehículo sin reservas futuras
    pub async fn update(
        &self,
        host_id: Uuid,
        vehicle_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self
            .bookings
            .has_future_confirmed(vehicle_id, Utc::now())
            .await?
        {
            return Err(AppError::InvalidState(
                "Cannot edit this vehicle as it has an upcoming booking.".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .update(
                vehicle_id,
                host_id,
                VehicleUpdate {
                    name: request.name,
                    brand: request.brand,
                    vehicle_type: request.vehicle_type,
                    fuel_type: request.fuel_type,
                    gear_type: request.gear_type,
                    base_price: request.base_price,
                    kms_per_unit: request.kms_per_unit,
                    features: request.features.map(|f| f.join(",")),
                    specification: request.specification,
                },
            )
            .await?;

        let name = vehicle.name.clone();
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            format!("Vehicle '{}' updated successfully!", name),
        ))
    }

    /// Alternar disponibilidad. Un vehículo con reserva futura no puede
    /// ponerse en no disponible.
    pub async fn toggle_availability(
        &self,
        host_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        if vehicle.host_id != host_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this host.".to_string(),
            ));
        }

        if vehicle.is_available
            && self
                .bookings
                .has_future_confirmed(vehicle_id, Utc::now())
                .await?
        {
            return Err(AppError::InvalidState(format!(
                "Cannot make '{}' unavailable. It has a confirmed future booking.",
                vehicle.name
            )));
        }

        let new_status = !vehicle.is_available;
        self.vehicles.set_availability(vehicle_id, new_status).await?;

        let updated = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        let status_label = if new_status { "Available" } else { "Unavailable" };
        let name = updated.name.clone();
        Ok(ApiResponse::success_with_message(
            updated.into(),
            format!("Status for '{}' updated to {}.", name, status_label),
        ))
    }
}

/// Slug para el código público del vehículo
fn slugify(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Honda City"), "honda-city");
        assert_eq!(slugify("  Pune "), "pune");
    }
}
