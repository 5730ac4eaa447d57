//! Servicio de notificaciones SMS (Twilio)
//!
//! Envío best-effort: un SMS fallido solo produce un warning para el
//! usuario, nunca revierte la acción que lo disparó.

use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct TwilioClient {
    account_sid: Option<String>,
    auth_token: Option<String>,
    from_number: Option<String>,
    client: Client,
}

impl TwilioClient {
    pub fn new(
        account_sid: Option<String>,
        auth_token: Option<String>,
        from_number: Option<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            account_sid,
            auth_token,
            from_number,
            client,
        }
    }

    /// Notificar a un host que su cuenta fue aprobada.
    ///
    /// Devuelve true si el SMS salió; false en cualquier otro caso
    /// (credenciales ausentes, error de red, rechazo de la API).
    pub async fn notify_host_approved(&self, recipient_phone: &str, host_name: &str) -> bool {
        let (account_sid, auth_token, from_number) = match (
            self.account_sid.as_deref(),
            self.auth_token.as_deref(),
            self.from_number.as_deref(),
        ) {
            (Some(sid), Some(token), Some(from)) => (sid, token, from),
            _ => {
                log::warn!("⚠️ Credenciales de Twilio no configuradas. SMS no enviado.");
                return false;
            }
        };

        let recipient = normalize_phone(recipient_phone);

        let body = format!(
            "🎉 Congrats, {}! Your PrimeDrew Host application is APPROVED! \
             Log in now to list your vehicles. Happy hosting!",
            host_name
        );

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            account_sid
        );

        let params = [("To", recipient.as_str()), ("From", from_number), ("Body", &body)];

        match self
            .client
            .post(&url)
            .basic_auth(account_sid, Some(auth_token))
            .form(&params)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                log::info!("✅ SMS enviado exitosamente a {}", recipient);
                true
            }
            Ok(response) => {
                log::error!("❌ Twilio rechazó el SMS a {}: {}", recipient, response.status());
                false
            }
            Err(e) => {
                log::error!("❌ Error enviando SMS a {}: {}", recipient, e);
                false
            }
        }
    }
}

/// Números sin prefijo internacional se asumen de India (+91)
fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+91{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_adds_india_prefix() {
        assert_eq!(normalize_phone("9876543210"), "+919876543210");
        assert_eq!(normalize_phone(" 9876543210 "), "+919876543210");
    }

    #[test]
    fn test_normalize_phone_keeps_existing_prefix() {
        assert_eq!(normalize_phone("+15005550006"), "+15005550006");
    }
}
