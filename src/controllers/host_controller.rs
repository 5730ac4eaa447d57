//! Controller del panel de host: tier de comisión y ganancias

use uuid::Uuid;

use crate::dto::host_dto::{EarningsEntry, EarningsResponse, SetTierRequest, TierResponse};
use crate::dto::ApiResponse;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::commission_service::{
    can_access_80_tier, commission_breakdown, VALID_COMMISSION_TIERS,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::format_booking_datetime;

pub struct HostController {
    users: UserRepository,
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl HostController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
        }
    }

    /// Cambiar el tier de comisión. El tier del 80% exige host
    /// aprobado, activo y con al menos un vehículo.
    pub async fn set_tier(
        &self,
        host_id: Uuid,
        request: SetTierRequest,
    ) -> Result<ApiResponse<TierResponse>, AppError> {
        if !VALID_COMMISSION_TIERS.contains(&request.commission_tier) {
            return Err(AppError::BadRequest("Invalid tier selection.".to_string()));
        }

        let user = self
            .users
            .find_by_id(host_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Host user not found.".to_string()))?;

        let vehicle_count = self.vehicles.count_by_host(host_id).await?;
        let can_access_80 = can_access_80_tier(user.is_approved_host, user.is_active, vehicle_count);

        if request.commission_tier == 80 && !can_access_80 {
            return Err(AppError::BadRequest(
                "You do not meet the minimum vehicle/availability requirements for the 80% tier yet."
                    .to_string(),
            ));
        }

        self.users
            .set_commission_tier(host_id, request.commission_tier)
            .await?;

        Ok(ApiResponse::success_with_message(
            TierResponse {
                current_tier: request.commission_tier,
                can_access_80_tier: can_access_80,
            },
            format!(
                "Your commission tier has been updated to {}%.",
                request.commission_tier
            ),
        ))
    }

    /// Ganancias del host sobre sus reservas confirmadas, al tier actual
    pub async fn earnings(&self, host_id: Uuid) -> Result<EarningsResponse, AppError> {
        let user = self
            .users
            .find_by_id(host_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Host user not found.".to_string()))?;

        let bookings = self.bookings.confirmed_by_host(host_id).await?;

        let mut total_lifetime_earnings = 0;
        let mut earnings = Vec::with_capacity(bookings.len());

        for booking in bookings {
            let breakdown = commission_breakdown(
                booking.total_price,
                booking.deposit_amount,
                user.commission_tier,
            );

            total_lifetime_earnings += breakdown.host_share;

            earnings.push(EarningsEntry {
                booking_id: booking.id,
                vehicle_name: booking.vehicle_name,
                total_booked_price: booking.total_price,
                deposit_amount: booking.deposit_amount,
                host_earning: breakdown.host_share,
                platform_commission: breakdown.platform_commission,
                start_date: format_booking_datetime(&booking.start_date),
            });
        }

        Ok(EarningsResponse {
            payout_rate: user.commission_tier,
            total_lifetime_earnings,
            earnings,
        })
    }
}
