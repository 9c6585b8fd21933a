/// Formats a rupee amount with no decimals and Indian digit grouping,
/// e.g. `1234567.4` -> `12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    with_sign(rounded < 0.0, group_indian(&format!("{:.0}", rounded.abs())))
}

/// Two-decimal variant used for wallet amounts, e.g. `1234.5` -> `1,234.50`.
pub fn format_inr_paise(amount: f64) -> String {
    let paise = (amount * 100.0).round();
    let whole = (paise.abs() / 100.0).trunc();
    let fraction = paise.abs() - whole * 100.0;
    let text = format!("{}.{:02.0}", group_indian(&format!("{whole:.0}")), fraction);
    with_sign(paise < 0.0, text)
}

fn with_sign(negative: bool, text: String) -> String {
    if negative { format!("-{text}") } else { text }
}

// Last three digits, then groups of two: 12,34,567.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        parts.push(&head[start..end]);
        end = start;
    }
    parts.reverse();
    format!("{},{tail}", parts.join(","))
}
