//! Controller de administración: moderación de hosts, reembolsos y
//! salud financiera de la plataforma

use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dto::admin_dto::{
    AdminDashboardResponse, ApproveHostResponse, DepositRefundCaseResponse, HostPayoutSummary,
    PendingHostResponse, RefundCaseResponse, ToggleHostStatusResponse,
};
use crate::dto::ApiResponse;
use crate::models::booking::cancellation_breakdown_for;
use crate::models::user::UserRole;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::commission_service::commission_breakdown;
use crate::services::twilio_service::TwilioClient;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::format_booking_datetime;

pub struct AdminController {
    users: UserRepository,
    vehicles: VehicleRepository,
    bookings: BookingRepository,
    twilio: TwilioClient,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
            twilio: state.twilio.clone(),
        }
    }

    /// Dashboard con stats de reservas, reembolsos pendientes y el
    /// resumen financiero por host
    pub async fn dashboard(&self) -> Result<AdminDashboardResponse, AppError> {
        let now = Utc::now();

        let (
            total_bookings,
            confirmed_rows,
            pending_refunds,
            pending_deposits,
            pending_hosts,
            total_hosts,
            total_vehicles,
        ) = futures::try_join!(
            self.bookings.total_count(),
            self.bookings.confirmed_with_host_tier(),
            self.bookings.pending_cancellation_refunds(),
            self.bookings.pending_deposit_refunds(now),
            self.users.pending_hosts(),
            self.users.count_by_role(UserRole::Host),
            self.vehicles.total_count(),
        )?;

        // Revenue bruto y desglose de comisiones sobre lo confirmado
        let mut total_revenue = 0;
        let mut total_platform_commission = 0;
        let mut total_payout_due = 0;
        let mut per_host: HashMap<Uuid, HostPayoutSummary> = HashMap::new();

        for row in &confirmed_rows {
            total_revenue += row.total_price;

            let breakdown =
                commission_breakdown(row.total_price, row.deposit_amount, row.commission_tier);
            total_platform_commission += breakdown.platform_commission;
            total_payout_due += breakdown.host_share;

            let entry = per_host.entry(row.host_id).or_insert_with(|| HostPayoutSummary {
                host_id: row.host_id,
                name: row.host_name.clone(),
                tier: row.commission_tier,
                total_earnings: 0,
                total_bookings: 0,
            });
            entry.total_earnings += breakdown.host_share;
            entry.total_bookings += 1;
        }

        let mut host_payouts: Vec<HostPayoutSummary> = per_host.into_values().collect();
        host_payouts.sort_by(|a, b| b.total_earnings.cmp(&a.total_earnings));

        // Cancelaciones pendientes con el fee calculado a fecha de hoy
        let cancelled_details: Vec<RefundCaseResponse> = pending_refunds
            .into_iter()
            .map(|case| {
                let breakdown = cancellation_breakdown_for(case.total_price, case.booked_at, now);
                RefundCaseResponse {
                    booking_id: case.booking_id,
                    customer_name: case.customer_name,
                    vehicle_name: case.vehicle_name,
                    vehicle_host: case.host_name,
                    total_price: case.total_price,
                    refund_due: breakdown.refund_amount,
                    cancellation_fee: breakdown.fee,
                    payment_id: case.payment_id,
                    booked_at: format_booking_datetime(&case.booked_at),
                }
            })
            .collect();

        let pending_deposit_refunds: Vec<DepositRefundCaseResponse> = pending_deposits
            .into_iter()
            .map(|case| DepositRefundCaseResponse {
                booking_id: case.booking_id,
                customer_name: case.customer_name,
                vehicle_name: case.vehicle_name,
                host_name: case.host_name,
                deposit_amount: case.deposit_amount,
            })
            .collect();

        let pending_hosts: Vec<PendingHostResponse> = pending_hosts
            .into_iter()
            .map(|host| PendingHostResponse {
                host_id: host.id,
                name: host.full_name(),
                phone: host.phone,
                email: host.email,
                city: host.city,
            })
            .collect();

        Ok(AdminDashboardResponse {
            total_bookings,
            confirmed_bookings_count: confirmed_rows.len() as i64,
            cancelled_refund_count: cancelled_details.len() as i64,
            deposit_refund_count: pending_deposit_refunds.len() as i64,
            total_revenue,
            total_hosts,
            total_vehicles,
            cancelled_details,
            pending_deposit_refunds,
            pending_hosts,
            total_platform_commission,
            total_payout_due,
            host_payouts,
        })
    }

    /// Marcar el reembolso de una cancelación como procesado.
    /// Idempotencia con guard: la segunda llamada falla sin efectos.
    pub async fn process_refund(&self, booking_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

        self.bookings.mark_refund_processed(booking_id).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Refund status updated to Processed.".to_string(),
        ))
    }

    /// Marcar la devolución del depósito como procesada
    pub async fn process_deposit_refund(
        &self,
        booking_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

        self.bookings
            .mark_deposit_refund_processed(booking_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Deposit refund status updated to Processed.".to_string(),
        ))
    }

    /// Aprobar un host. El SMS de notificación es best-effort: su fallo
    /// no revierte la aprobación, solo se informa.
    pub async fn approve_host(
        &self,
        host_id: Uuid,
    ) -> Result<ApiResponse<ApproveHostResponse>, AppError> {
        let host = self
            .users
            .find_host_by_id(host_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Host user not found.".to_string()))?;

        if host.is_approved_host {
            return Err(AppError::InvalidState(format!(
                "Host {} is already approved.",
                host.first_name
            )));
        }

        if !host.is_active {
            return Err(AppError::InvalidState(format!(
                "Host {} is currently blocked. Activate the account before approval.",
                host.first_name
            )));
        }

        self.users.mark_host_approved(host_id).await?;

        let sms_sent = self
            .twilio
            .notify_host_approved(&host.phone, &host.first_name)
            .await;

        let sms_message = if sms_sent {
            "SMS triggered.".to_string()
        } else {
            "WARNING: SMS failed to send (Check phone number format/Twilio credits).".to_string()
        };

        Ok(ApiResponse::success_with_message(
            ApproveHostResponse {
                sms_sent,
                sms_message: sms_message.clone(),
            },
            format!(
                "Host '{}' successfully approved and can now list vehicles. {}",
                host.full_name(),
                sms_message
            ),
        ))
    }

    /// Bloquear o reactivar un host. El bloqueo deja todos sus
    /// vehículos no disponibles; la reactivación no los re-habilita.
    pub async fn toggle_host_status(
        &self,
        host_id: Uuid,
    ) -> Result<ApiResponse<ToggleHostStatusResponse>, AppError> {
        let host = self
            .users
            .find_host_by_id(host_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Host user not found.".to_string()))?;

        let new_status = !host.is_active;
        let affected_vehicles = self.users.set_host_active(host_id, new_status).await?;

        let message = if new_status {
            format!(
                "Host '{}' activated. Host must manually re-activate their vehicles.",
                host.first_name
            )
        } else {
            format!(
                "Host '{}' blocked. All {} associated vehicles are now unavailable.",
                host.first_name, affected_vehicles
            )
        };

        Ok(ApiResponse::success_with_message(
            ToggleHostStatusResponse {
                is_active: new_status,
                affected_vehicles,
            },
            message,
        ))
    }
}
