// src/config/coerce.rs

//! Raw string -> typed value conversions used by the parameter schema.
//!
//! Every function here is pure. Errors are plain strings; the builder wraps
//! them into [`crate::errors::SysConfigError::InvalidValue`] together with
//! the offending key.

use std::time::Duration;

use crate::types::{LogLevel, ParamValue};

pub type Coercion = fn(&str) -> Result<ParamValue, String>;

pub fn string(raw: &str) -> Result<ParamValue, String> {
    Ok(ParamValue::Str(raw.to_string()))
}

/// `true`/`yes` and `false`/`no`; an empty value is the flag form and means true.
pub fn boolean(raw: &str) -> Result<ParamValue, String> {
    match raw.trim().to_lowercase().as_str() {
        "" | "true" | "yes" => Ok(ParamValue::Bool(true)),
        "false" | "no" => Ok(ParamValue::Bool(false)),
        other => Err(format!("expected true, false, yes or no, got '{other}'")),
    }
}

pub fn level(raw: &str) -> Result<ParamValue, String> {
    raw.parse::<LogLevel>().map(ParamValue::Level)
}

pub fn time(raw: &str) -> Result<ParamValue, String> {
    parse_duration(raw).map(ParamValue::Time)
}

/// Octal digits, e.g. `"0644"`.
pub fn permission(raw: &str) -> Result<ParamValue, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("empty permission string".to_string());
    }
    u32::from_str_radix(s, 8)
        .map(ParamValue::Permission)
        .map_err(|e| format!("expected octal digits: {e}"))
}

/// Parse a duration like `"60"`, `"1.5"`, `"250ms"`, `"3s"`, `"10m"`, `"2h"`, `"1d"`.
///
/// A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    let (num_part, unit_part) = s.split_at(idx);
    if num_part.is_empty() {
        return Err(format!("duration '{s}' does not start with a number"));
    }
    let value: f64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;

    let secs = match unit_part.trim().to_lowercase().as_str() {
        "ms" => value / 1000.0,
        "" | "s" => value,
        "m" => value * 60.0,
        "h" => value * 60.0 * 60.0,
        "d" => value * 24.0 * 60.0 * 60.0,
        unit => {
            return Err(format!(
                "unsupported duration unit '{unit}'; expected ms, s, m, h or d"
            ));
        }
    };

    Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("duration '{s}' out of range: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_accept_units_and_bare_seconds() {
        assert_eq!(parse_duration("60"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("3s"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("10m"), Ok(Duration::from_secs(600)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("1.5"), Ok(Duration::from_millis(1500)));
    }

    #[test]
    fn malformed_durations_are_rejected() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("10 parsecs").is_err());
        assert!(parse_duration("1.2.3s").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn permissions_are_base_eight() {
        assert_eq!(permission("0655"), Ok(ParamValue::Permission(429)));
        assert_eq!(permission("0765"), Ok(ParamValue::Permission(501)));
        assert_eq!(permission("755"), Ok(ParamValue::Permission(0o755)));
        assert!(permission("0855").is_err());
        assert!(permission("rwx").is_err());
        assert!(permission("").is_err());
    }

    #[test]
    fn booleans_follow_flag_grammar() {
        assert_eq!(boolean("true"), Ok(ParamValue::Bool(true)));
        assert_eq!(boolean("yes"), Ok(ParamValue::Bool(true)));
        assert_eq!(boolean(""), Ok(ParamValue::Bool(true)));
        assert_eq!(boolean("no"), Ok(ParamValue::Bool(false)));
        assert_eq!(boolean("False"), Ok(ParamValue::Bool(false)));
        assert!(boolean("maybe").is_err());
    }

    #[test]
    fn levels_map_to_log_level() {
        assert_eq!(level("error"), Ok(ParamValue::Level(LogLevel::Error)));
        assert!(level("loud").is_err());
    }
}
