//! Display helpers for odds, shares and token amounts.

use rust_decimal::Decimal;

/// Decimal odds as a multiplier, e.g. "1.67x".
pub fn format_odds(odds: Decimal) -> String {
    format!("{:.2}x", odds.round_dp(2))
}

/// Pool share, e.g. "60.0%".
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.1}%", percentage.round_dp(1))
}

/// Token amount with thousands separators, e.g. "12,500".
pub fn format_tokens(tokens: u64) -> String {
    let digits = tokens.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed amount to two places, e.g. "+66.67" or "-5.00".
pub fn format_signed(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.2}", rounded)
    } else {
        format!("+{:.2}", rounded.abs())
    }
}
