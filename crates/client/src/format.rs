//! Display formatting for amounts and timestamps.

use chrono::{DateTime, Utc};

/// Two-decimal amount with thousands separators: `12,345.60`.
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    // Amounts that round to zero carry no sign.
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{:02}", cents % 100)
}

/// Tailwind text colour for a profit/loss figure.
pub fn pnl_class(amount: f64) -> &'static str {
    if amount > 0.0 {
        "text-emerald-400"
    } else if amount < 0.0 {
        "text-rose-400"
    } else {
        "text-slate-300"
    }
}

pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn odds(price: f64) -> String {
    format!("{price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_and_rounds() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.999), "1,000.00");
        assert_eq!(money(1234567.5), "1,234,567.50");
        assert_eq!(money(-42.1), "-42.10");
    }

    #[test]
    fn money_drops_sign_when_rounded_to_zero() {
        assert_eq!(money(-0.004), "0.00");
        assert_eq!(money(-0.0), "0.00");
        assert_eq!(money(-0.006), "-0.01");
    }

    #[test]
    fn pnl_colours() {
        assert_eq!(pnl_class(5.0), "text-emerald-400");
        assert_eq!(pnl_class(-0.01), "text-rose-400");
        assert_eq!(pnl_class(0.0), "text-slate-300");
    }
}
