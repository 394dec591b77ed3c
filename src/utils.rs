//! Common formatting helpers for command output.

/// Format a number with thousands separators (commas).
///
/// # Examples
/// ```
/// use ipshard::utils::format_count_with_separator;
/// assert_eq!(format_count_with_separator(1000), "1,000");
/// assert_eq!(format_count_with_separator(1234567), "1,234,567");
/// ```
pub fn format_count_with_separator(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// `"1 line"` / `"3 lines"`.
///
/// # Examples
/// ```
/// use ipshard::utils::plural;
/// assert_eq!(plural(1, "address", "addresses"), "1 address");
/// assert_eq!(plural(2048, "address", "addresses"), "2,048 addresses");
/// ```
pub fn plural(n: usize, singular: &str, plural: &str) -> String {
    let word = if n == 1 { singular } else { plural };
    format!("{} {}", format_count_with_separator(n), word)
}
