// Helpers for FACEIT's label-keyed stat dictionaries
//
// Upstream values may be numbers, numeric strings or percentages ("42%"),
// and the same metric shows up under several labels. Every call site goes
// through the ordered alias lookup below.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Value under the first alias that exists, blank or not
pub fn lookup<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| map.get(*alias))
}

/// First alias (in priority order) holding a non-blank value
pub fn first_present<'a>(
    map: &'a Map<String, Value>,
    aliases: &[&'a str],
) -> Option<(&'a str, &'a Value)> {
    aliases.iter().find_map(|alias| {
        map.get(*alias)
            .filter(|value| !is_blank(value))
            .map(|value| (*alias, value))
    })
}

/// First label (in map order) accepted by `matches`, skipping blanks
pub fn find_label<'a>(
    map: &'a Map<String, Value>,
    matches: impl Fn(&str) -> bool,
) -> Option<(&'a str, &'a Value)> {
    map.iter()
        .find(|(key, value)| matches(key.as_str()) && !is_blank(value))
        .map(|(key, value)| (key.as_str(), value))
}

/// Null and empty strings count as absent
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Textual form of a stat value; strings are not re-quoted
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Parse a loosely typed stat: keep ASCII digits and dots, then read the
/// longest leading decimal. Anything unparseable is 0.
pub fn parse_stat_number(value: &Value) -> f64 {
    let cleaned: String = value_text(value)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    leading_decimal(&cleaned)
}

/// Numeric stat under the first non-blank alias, 0 when missing
pub fn stat_number(map: &Map<String, Value>, aliases: &[&str]) -> f64 {
    first_present(map, aliases)
        .map(|(_, value)| parse_stat_number(value))
        .unwrap_or(0.0)
}

fn leading_decimal(digits_and_dots: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in digits_and_dots.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }

    digits_and_dots[..end].parse::<f64>().unwrap_or(0.0)
}
