//! Motor de precios del marketplace
//!
//! Funciones puras que calculan subtotal, depósito, GST y total de una
//! reserva. Se ejecutan dos veces por reserva: al crear la orden de pago
//! y de nuevo al confirmar. Ambas ejecuciones deben producir el mismo
//! resultado; una divergencia en la confirmación es un error fatal de
//! reconciliación.
//!
//! El orden de las operaciones (ajuste por combustible antes del
//! descuento por duración) y los puntos de redondeo son contrato
//! histórico: los precios persistidos dependen de ellos.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// GST aplicado sobre el subtotal
const GST_RATE: f64 = 0.18;

lazy_static! {
    /// Factor de ajuste por tipo de combustible. Los tipos no listados
    /// no se ajustan.
    static ref FUEL_FACTORS: HashMap<&'static str, f64> = {
        let mut factors = HashMap::new();
        factors.insert("Electric", 0.95);
        factors.insert("Diesel", 1.05);
        factors.insert("Petrol", 1.0);
        factors
    };
}

/// Horas fraccionales del intervalo [start, end)
pub fn interval_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Subtotal del alquiler en unidades enteras de moneda.
///
/// - Intervalo vacío o invertido -> 0 (el caller debe tratarlo como
///   entrada inválida).
/// - Menos de 24 horas se facturan por hora completa (ceil); a partir
///   de 24 horas las fracciones se facturan tal cual.
/// - Combustible: Electric x0.95, Diesel x1.05, resto x1.0.
/// - Descuento por duración, después del ajuste por combustible:
///   [48, 96) horas x0.95; >= 96 horas x0.85.
pub fn rental_subtotal(
    base_price_per_hour: f64,
    fuel_type: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> i64 {
    let total_hours = interval_hours(start, end);

    if total_hours <= 0.0 {
        return 0;
    }

    let billed_hours = if total_hours < 24.0 {
        total_hours.ceil()
    } else {
        total_hours
    };

    let mut subtotal = billed_hours * base_price_per_hour;

    subtotal *= FUEL_FACTORS.get(fuel_type).copied().unwrap_or(1.0);

    if (48.0..96.0).contains(&total_hours) {
        subtotal *= 0.95;
    } else if total_hours >= 96.0 {
        subtotal *= 0.85;
    }

    subtotal.round() as i64
}

/// Depósito reembolsable según la duración del alquiler.
///
/// Menos de 24 horas: 500 fijo. De 24 a 72 horas: 1500 fijo.
/// Desde 72 horas: 2000 + 10% del subtotal, redondeado a la centena,
/// con tope de 5000.
pub fn deposit_for(subtotal: i64, total_hours: f64) -> i64 {
    if total_hours < 24.0 {
        500
    } else if total_hours < 72.0 {
        1500
    } else {
        let deposit_calc = 2000.0 + (subtotal as f64 * 0.10);
        let rounded = (deposit_calc / 100.0).round() as i64 * 100;
        rounded.min(5000)
    }
}

/// GST sobre el subtotal, redondeado a entero
pub fn gst_for(subtotal: i64) -> i64 {
    (subtotal as f64 * GST_RATE).round() as i64
}

/// Desglose completo de un quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteBreakdown {
    pub subtotal: i64,
    pub gst: i64,
    pub deposit: i64,
    pub total: i64,
}

/// Calcular el desglose completo para un vehículo e intervalo
pub fn quote_breakdown(
    base_price_per_hour: f64,
    fuel_type: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> QuoteBreakdown {
    let total_hours = interval_hours(start, end);
    let subtotal = rental_subtotal(base_price_per_hour, fuel_type, start, end);
    let gst = gst_for(subtotal);
    let deposit = deposit_for(subtotal, total_hours);

    QuoteBreakdown {
        subtotal,
        gst,
        deposit,
        total: subtotal + gst + deposit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn interval(hours: i64, minutes: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        (start, start + Duration::hours(hours) + Duration::minutes(minutes))
    }

    #[test]
    fn test_zero_or_negative_interval_prices_to_zero() {
        let (start, _) = interval(0, 0);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, start), 0);
        assert_eq!(
            rental_subtotal(100.0, "Petrol", start, start - Duration::hours(2)),
            0
        );
    }

    #[test]
    fn test_short_rental_bills_whole_hours() {
        // 2.5 horas se facturan como 3
        let (start, end) = interval(2, 30);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end), 300);
    }

    #[test]
    fn test_multi_day_rental_bills_fractional_hours() {
        // 30.5 horas >= 24: la fracción se factura tal cual
        let (start, end) = interval(30, 30);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end), 3050);
    }

    #[test]
    fn test_fuel_adjustments() {
        let (start, end) = interval(10, 0);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end), 1000);
        assert_eq!(rental_subtotal(100.0, "Electric", start, end), 950);
        assert_eq!(rental_subtotal(100.0, "Diesel", start, end), 1050);
        // Combustibles no reconocidos no se ajustan
        assert_eq!(rental_subtotal(100.0, "CNG", start, end), 1000);
    }

    #[test]
    fn test_duration_discount_boundaries() {
        let (start, end_47) = interval(47, 0);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end_47), 4700);

        let (start, end_48) = interval(48, 0);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end_48), 4560); // x0.95

        let (start, end_96) = interval(96, 0);
        assert_eq!(rental_subtotal(100.0, "Petrol", start, end_96), 8160); // x0.85
    }

    #[test]
    fn test_three_hour_petrol_scenario() {
        // 3 h a 100/h: subtotal 300, depósito 500, GST 54, total 854
        let (start, end) = interval(3, 0);
        let quote = quote_breakdown(100.0, "Petrol", start, end);
        assert_eq!(quote.subtotal, 300);
        assert_eq!(quote.deposit, 500);
        assert_eq!(quote.gst, 54);
        assert_eq!(quote.total, 854);
    }

    #[test]
    fn test_fifty_hour_electric_scenario() {
        // 50 h a 100/h Electric: 5000 x0.95 x0.95 = 4512.5 -> 4513
        let (start, end) = interval(50, 0);
        assert_eq!(rental_subtotal(100.0, "Electric", start, end), 4513);

        let quote = quote_breakdown(100.0, "Electric", start, end);
        assert_eq!(quote.deposit, 1500); // tier [24, 72)
        assert_eq!(quote.gst, 812); // 4513 * 0.18 = 812.34
        assert_eq!(quote.total, 4513 + 812 + 1500);
    }

    #[test]
    fn test_deposit_tiers() {
        assert_eq!(deposit_for(300, 3.0), 500);
        assert_eq!(deposit_for(2300, 23.9), 500);
        assert_eq!(deposit_for(2400, 24.0), 1500);
        assert_eq!(deposit_for(7100, 71.9), 1500);
        // 72 h: 2000 + 10% del subtotal, redondeado a la centena
        assert_eq!(deposit_for(7200, 72.0), 2700); // 2000 + 720 = 2720 -> 2700
        assert_eq!(deposit_for(10000, 100.0), 3000);
    }

    #[test]
    fn test_deposit_caps_at_five_thousand() {
        assert_eq!(deposit_for(50000, 120.0), 5000);
        assert_eq!(deposit_for(1_000_000, 200.0), 5000);
    }

    #[test]
    fn test_gst_rounds_to_integer() {
        assert_eq!(gst_for(300), 54);
        assert_eq!(gst_for(301), 54); // 54.18
        assert_eq!(gst_for(303), 55); // 54.54
    }

    #[test]
    fn test_quote_is_deterministic() {
        // La confirmación reejecuta el cálculo: mismo input, mismo output
        let (start, end) = interval(50, 0);
        let first = quote_breakdown(120.0, "Diesel", start, end);
        let second = quote_breakdown(120.0, "Diesel", start, end);
        assert_eq!(first, second);
    }
}
