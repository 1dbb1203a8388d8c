// Formatting utilities
// Aggregated stats stay unrounded; rounding lives here

/// Format a number with thousands separators (elo, match counts)
pub fn format_number(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if n < 0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// K/D ratio, two decimals
pub fn format_kd(kd: f64) -> String {
    format!("{:.2}", kd)
}

/// Percentages and per-round values, one decimal
pub fn format_rate(value: f64) -> String {
    format!("{:.1}", value)
}

/// Truncate string to max chars with ellipsis (Discord field limits)
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format relative time (e.g., "2 hours ago")
pub fn format_relative_time(seconds_ago: i64) -> String {
    if seconds_ago < 60 {
        "just now".to_string()
    } else if seconds_ago < 3600 {
        let mins = seconds_ago / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if seconds_ago < 86400 {
        let hours = seconds_ago / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = seconds_ago / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(-2500), "-2,500");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_kd(2.0), "2.00");
        assert_eq!(format_kd(10.0 / 3.0), "3.33");
        assert_eq!(format_rate(80.0), "80.0");
        assert_eq!(format_rate(200.0 / 3.0), "66.7");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("привет мир", 7), "прив...");
    }

    #[test]
    fn test_format_relative_time() {
        assert_eq!(format_relative_time(30), "just now");
        assert_eq!(format_relative_time(120), "2 minutes ago");
        assert_eq!(format_relative_time(3600), "1 hour ago");
        assert_eq!(format_relative_time(3 * 86400), "3 days ago");
    }
}
