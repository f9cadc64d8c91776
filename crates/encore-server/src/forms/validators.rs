//! Field-level validators and the flexible date/time parser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,

    #[error("Invalid phone number. Please use a valid format like xxx-xxx-xxxx.")]
    InvalidPhone,

    #[error("Invalid URL format.")]
    InvalidUrl,

    #[error("'{0}' is not a valid choice for this field.")]
    InvalidChoice(String),

    #[error("Not a valid integer value.")]
    InvalidInteger,

    #[error("Not a valid datetime value.")]
    InvalidDateTime,
}

/// Accepts blank input. Otherwise, after dropping parentheses, whitespace
/// and hyphens, the rest must be 10 to 15 digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-') && !c.is_whitespace())
        .collect();

    let len = digits.chars().count();
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(10..=15).contains(&len) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Accepts blank input. A value without an `http://` or `https://` prefix
/// is checked as if it had `http://`.
pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let candidate = if starts_with_ignore_case(value, "http://")
        || starts_with_ignore_case(value, "https://")
    {
        value.to_string()
    } else {
        format!("http://{value}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl)?;
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    if parsed.scheme().is_empty() || !has_host {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(())
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%I:%M %p",
    "%I:%M%p",
    "%I:%M:%S %p",
    "%I %p",
];

const DATE_TIME_SEPARATORS: &[&str] = &[" ", "T", ", ", " at "];

/// Parse free-form date/time input, joining multi-part values with a space.
///
/// Blank input and unreadable input both yield `None`. A result at exactly
/// midnight is taken to mean "date only" and moved to 22:00 the same day.
pub fn parse_flexible_datetime<S: AsRef<str>>(parts: &[S]) -> Option<NaiveDateTime> {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let input = joined.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = parse_datetime(input)?;
    if parsed.hour() == 0 && parsed.minute() == 0 && parsed.second() == 0 {
        return parsed.with_hour(22);
    }
    Some(parsed)
}

fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    for date in DATE_FORMATS {
        for sep in DATE_TIME_SEPARATORS {
            for time in TIME_FORMATS {
                let format = format!("{date}{sep}{time}");
                if let Ok(dt) = NaiveDateTime::parse_from_str(input, &format) {
                    return Some(dt);
                }
            }
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_phone_accepts_blank() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("   ").is_ok());
    }

    #[test]
    fn test_phone_accepts_10_to_15_digits_after_stripping() {
        assert!(validate_phone("123-123-1234").is_ok());
        assert!(validate_phone("(415) 555-0100").is_ok());
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("123456789012345").is_ok());
    }

    #[test]
    fn test_phone_rejects_wrong_length_or_non_digits() {
        assert_eq!(validate_phone("123-4567"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("1234567890123456"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("123-abc-12345"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("123.123.1234"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("+1 415 555 0100"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_url_accepts_blank_and_schemed() {
        assert!(validate_url("").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://www.facebook.com/TheMusicalHop").is_ok());
        assert!(validate_url("HTTPS://EXAMPLE.COM/path").is_ok());
    }

    #[test]
    fn test_url_prefixes_missing_scheme() {
        assert!(validate_url("example.com").is_ok());
        assert!(validate_url("www.themusicalhop.com/events").is_ok());
    }

    #[test]
    fn test_url_rejects_garbage() {
        assert_eq!(validate_url("not a url"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("http://"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_date_only_defaults_to_ten_pm() {
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01"]),
            Some(dt(2024, 5, 1, 22, 0, 0))
        );
        assert_eq!(
            parse_flexible_datetime(&["May 1, 2024"]),
            Some(dt(2024, 5, 1, 22, 0, 0))
        );
    }

    #[test]
    fn test_date_and_time_kept_as_is() {
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01 14:30"]),
            Some(dt(2024, 5, 1, 14, 30, 0))
        );
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01T14:30:15"]),
            Some(dt(2024, 5, 1, 14, 30, 15))
        );
        assert_eq!(
            parse_flexible_datetime(&["05/01/2024 8:00 PM"]),
            Some(dt(2024, 5, 1, 20, 0, 0))
        );
    }

    #[test]
    fn test_multi_part_input_is_joined() {
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01", "21:15"]),
            Some(dt(2024, 5, 1, 21, 15, 0))
        );
    }

    #[test]
    fn test_explicit_midnight_becomes_ten_pm() {
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01 00:00"]),
            Some(dt(2024, 5, 1, 22, 0, 0))
        );
    }

    #[test]
    fn test_offset_input_converted_to_utc() {
        assert_eq!(
            parse_flexible_datetime(&["2024-05-01T14:30:00+02:00"]),
            Some(dt(2024, 5, 1, 12, 30, 0))
        );
    }

    #[test]
    fn test_blank_and_unreadable_yield_none() {
        assert_eq!(parse_flexible_datetime::<&str>(&[]), None);
        assert_eq!(parse_flexible_datetime(&["  "]), None);
        assert_eq!(parse_flexible_datetime(&["next tuesday-ish"]), None);
        assert_eq!(parse_flexible_datetime(&["2024-13-45"]), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::Required.to_string(), "This field is required.");
        assert_eq!(
            ValidationError::InvalidChoice("ZZ".into()).to_string(),
            "'ZZ' is not a valid choice for this field."
        );
    }
}
