//! Servicio de la pasarela de pagos Razorpay
//!
//! Este módulo maneja la comunicación con la API de órdenes y pagos.
//! Las dos operaciones bloquean en red y llevan timeout explícito: un
//! timeout es un fallo transitorio, nunca evidencia del estado de la
//! orden.

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

use crate::dto::payment_dto::{RazorpayOrder, RazorpayOrderRequest, RazorpayPayment};

const RAZORPAY_BASE_URL: &str = "https://api.razorpay.com/v1";

#[derive(Clone)]
pub struct RazorpayClient {
    key_id: String,
    key_secret: String,
    base_url: String,
    client: Client,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            key_id,
            key_secret,
            base_url: RAZORPAY_BASE_URL.to_string(),
            client,
        }
    }

    /// Key pública que el cliente web necesita para abrir el checkout
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Crear una orden de pago por `amount_paise` (moneda en paise)
    pub async fn create_order(&self, amount_paise: i64, receipt: &str) -> Result<RazorpayOrder> {
        log::info!("💳 Creando orden Razorpay por {} paise", amount_paise);

        let request = RazorpayOrderRequest {
            amount: amount_paise,
            currency: "INR".to_string(),
            receipt: receipt.to_string(),
            payment_capture: "1".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Razorpay order request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Razorpay respondió {} al crear orden: {}", status, body);
            return Err(anyhow!("Razorpay order creation failed with status {}", status));
        }

        let order: RazorpayOrder = response
            .json()
            .await
            .map_err(|e| anyhow!("Invalid Razorpay order response: {}", e))?;

        log::info!("✅ Orden Razorpay creada: {}", order.id);
        Ok(order)
    }

    /// Consultar un pago por su id
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<RazorpayPayment> {
        log::info!("🔍 Consultando pago Razorpay: {}", payment_id);

        let response = self
            .client
            .get(format!("{}/payments/{}", self.base_url, payment_id))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await
            .map_err(|e| anyhow!("Razorpay payment fetch failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("❌ Razorpay respondió {} al consultar pago {}", status, payment_id);
            return Err(anyhow!("Razorpay payment fetch failed with status {}", status));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Invalid Razorpay payment response: {}", e))
    }
}
