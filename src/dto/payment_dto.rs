//! DTOs de la pasarela de pagos (Razorpay)
//!
//! Forma mínima de request/response que el core necesita de la API
//! de órdenes y pagos.

use serde::{Deserialize, Serialize};

/// Request de creación de orden (montos en paise)
#[derive(Debug, Serialize)]
pub struct RazorpayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub payment_capture: String,
}

/// Orden creada en la pasarela
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Pago consultado en la pasarela
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    pub order_id: String,
    pub amount: i64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_deserializes_from_gateway_shape() {
        let raw = r#"{
            "id": "pay_29QQoUBi66xm2f",
            "entity": "payment",
            "amount": 85400,
            "currency": "INR",
            "status": "captured",
            "order_id": "order_9A33XWu170gUtm",
            "method": "card"
        }"#;

        let payment: RazorpayPayment = serde_json::from_str(raw).unwrap();
        assert_eq!(payment.id, "pay_29QQoUBi66xm2f");
        assert_eq!(payment.order_id, "order_9A33XWu170gUtm");
        assert_eq!(payment.amount, 85400);
        assert_eq!(payment.status, "captured");
    }

    #[test]
    fn test_order_request_serializes_amount_in_paise() {
        let request = RazorpayOrderRequest {
            amount: 85400,
            currency: "INR".to_string(),
            receipt: "rcpt_u1_abc".to_string(),
            payment_capture: "1".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amount"], 85400);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["payment_capture"], "1");
    }
}
