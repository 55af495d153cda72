// Timecode parsing and formatting
// Scene cuts arrive as "HH:MM:SS.mmm" strings; audio peaks sometimes drop
// the hour field. Parse failures are reported, never mapped to 0.0.

use crate::error::{ReelRankError, Result};

/// Parse a colon-separated timecode into seconds.
///
/// Accepts `H:M:S` (fractional seconds allowed) and `M:S` (hours implied
/// zero). Any other field count, a non-numeric field, or a negative field
/// is an error.
pub fn parse_timecode(text: &str) -> Result<f64> {
    let fields: Vec<&str> = text.split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (parse_field(text, h)?, parse_field(text, m)?, parse_field(text, s)?),
        [m, s] => (0.0, parse_field(text, m)?, parse_field(text, s)?),
        _ => {
            return Err(ReelRankError::Timecode {
                input: text.to_string(),
                reason: format!("expected 2 or 3 colon-separated fields, got {}", fields.len()),
            });
        }
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_field(input: &str, field: &str) -> Result<f64> {
    let value: f64 = field.trim().parse().map_err(|_| ReelRankError::Timecode {
        input: input.to_string(),
        reason: format!("field '{}' is not numeric", field),
    })?;

    if value < 0.0 || !value.is_finite() {
        return Err(ReelRankError::Timecode {
            input: input.to_string(),
            reason: format!("field '{}' is out of range", field),
        });
    }

    Ok(value)
}

/// Format seconds as `HH:MM:SS.mmm`, the form the scene detector emits.
/// Round-trips through `parse_timecode` at millisecond precision.
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_timecode() {
        assert_eq!(parse_timecode("00:00:04.500").unwrap(), 4.5);
        assert_eq!(parse_timecode("01:02:03").unwrap(), 3723.0);
        assert_eq!(parse_timecode("00:00:00.000").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_short_timecode() {
        // Hours implied zero when only two fields are present
        assert_eq!(parse_timecode("1:30").unwrap(), 90.0);
        assert_eq!(parse_timecode("0:59.95").unwrap(), 59.95);
    }

    #[test]
    fn test_parse_rejects_bad_field_count() {
        assert!(parse_timecode("42").is_err());
        assert!(parse_timecode("1:2:3:4").is_err());
        assert!(parse_timecode("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_timecode("aa:bb").unwrap_err();
        assert!(err.to_string().contains("not numeric"), "got: {}", err);
        assert!(parse_timecode("00:00:bad").is_err());
    }

    #[test]
    fn test_parse_rejects_negative_fields() {
        assert!(parse_timecode("0:-1:30").is_err());
        assert!(parse_timecode("-1:30").is_err());
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(4.5), "00:00:04.500");
        assert_eq!(format_timecode(3723.0), "01:02:03.000");
        assert_eq!(format_timecode(0.0), "00:00:00.000");
    }

    #[test]
    fn test_round_trip_at_millisecond_precision() {
        for &secs in &[0.0, 4.5, 59.95, 90.0, 3599.999, 3723.25, 86399.001] {
            let text = format_timecode(secs);
            let parsed = parse_timecode(&text).unwrap();
            assert!(
                (parsed - secs).abs() < 1e-9,
                "{} -> {} -> {}",
                secs,
                text,
                parsed
            );
        }
    }
}
