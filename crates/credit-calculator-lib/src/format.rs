//! Number formatting shared by the report renderers and the terminal UI.

/// Formats `n` with `,` thousands separators and at most three fraction
/// digits. NaN renders as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut result = group_thousands(int_part);
    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(frac_part);
    }

    if n < 0.0 && result != "0" {
        result.insert(0, '-');
    }
    result
}

/// Formats a monetary amount with two decimals, e.g. `$1,234.50`.
pub fn format_cost(amount: f64, currency_symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{}{}", currency_symbol, format_number(amount));
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!(
        "{}{}{}.{}",
        sign,
        currency_symbol,
        group_thousands(int_part),
        frac_part
    )
}

/// Ungrouped representation: integral values print without a fraction.
pub fn format_plain(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
