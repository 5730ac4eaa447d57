//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos, en particular los intervalos de reserva.

use chrono::{DateTime, NaiveDateTime, Utc};
use validator::ValidationError;

/// Formato de fecha/hora que envía el cliente de reservas
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validar y convertir string a datetime del formato de reservas
pub fn parse_booking_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDateTime::parse_from_str(value, BOOKING_DATE_FORMAT)
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD HH:MM:SS".to_string());
            error
        })
}

/// Validar un intervalo de reserva semiabierto [start, end)
///
/// El intervalo es válido solo si ambos extremos parsean y end > start.
pub fn parse_booking_interval(
    start: &str,
    end: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let start_dt = parse_booking_datetime(start)?;
    let end_dt = parse_booking_datetime(end)?;

    if end_dt <= start_dt {
        let mut error = ValidationError::new("interval");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        return Err(error);
    }

    Ok((start_dt, end_dt))
}

/// Formatear un datetime al formato de cliente (sin segundos)
pub fn format_booking_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_booking_datetime_ok() {
        let dt = parse_booking_datetime("2026-03-01 10:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }

    #[test]
    fn test_parse_booking_datetime_rejects_iso_t() {
        assert!(parse_booking_datetime("2026-03-01T10:30:00").is_err());
        assert!(parse_booking_datetime("garbage").is_err());
        assert!(parse_booking_datetime("").is_err());
    }

    #[test]
    fn test_parse_booking_interval_requires_positive_span() {
        assert!(parse_booking_interval("2026-03-01 10:00:00", "2026-03-01 12:00:00").is_ok());
        // end == start no es un intervalo válido
        assert!(parse_booking_interval("2026-03-01 10:00:00", "2026-03-01 10:00:00").is_err());
        assert!(parse_booking_interval("2026-03-01 12:00:00", "2026-03-01 10:00:00").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hola").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
