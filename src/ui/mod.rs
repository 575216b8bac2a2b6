//! egui rendering. Reads snapshots from the session and forwards widget
//! events to it; holds no business logic of its own.

pub mod panels;
pub mod plot;
pub mod table;

/// Whole-dollar amount with thousands separators, e.g. `$123,457`.
pub fn format_usd(value: f64) -> String {
    format!("${}", group_thousands(value.round() as i64))
}

/// Integer with thousands separators, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    group_thousands(n as i64)
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_are_grouped_and_rounded() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(123_456.6), "$123,457");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(5), "5");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }
}
