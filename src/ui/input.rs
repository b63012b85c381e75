//! Numeric input parsing
//!
//! Rejected input never turns into a fallback number. The caller keeps the
//! previous value and leaves the raw text in the box for the user to fix.

use thiserror::Error;

use crate::sim::TrackLength;

/// Why a numeric input was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is negative")]
    Negative(f64),
}

/// Parse a velocity or acceleration field (finite, >= 0)
pub fn parse_non_negative(raw: &str) -> Result<f64, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NotANumber(text.to_string()));
    }
    if value < 0.0 {
        return Err(InputError::Negative(value));
    }
    // Normalize -0.0
    Ok(value.abs())
}

/// Parse a track-length field; an empty box means the track is unset
pub fn parse_track_length(raw: &str) -> Result<TrackLength, InputError> {
    match parse_non_negative(raw) {
        Ok(m) => Ok(TrackLength::Meters(m)),
        Err(InputError::Empty) => Ok(TrackLength::Unset),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("12.5"), Ok(12.5));
        assert_eq!(parse_non_negative(" 3 "), Ok(3.0));
        assert_eq!(parse_non_negative("0"), Ok(0.0));
        assert_eq!(parse_non_negative(""), Err(InputError::Empty));
        assert_eq!(parse_non_negative("-2"), Err(InputError::Negative(-2.0)));
        assert!(matches!(parse_non_negative("abc"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_non_negative("inf"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_non_negative("NaN"), Err(InputError::NotANumber(_))));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let v = parse_non_negative("-0").unwrap();
        assert!(v.is_sign_positive());
    }

    #[test]
    fn test_parse_track_length() {
        assert_eq!(parse_track_length("250"), Ok(TrackLength::Meters(250.0)));
        assert_eq!(parse_track_length(""), Ok(TrackLength::Unset));
        assert_eq!(parse_track_length("   "), Ok(TrackLength::Unset));
        assert_eq!(parse_track_length("-1"), Err(InputError::Negative(-1.0)));
        assert!(parse_track_length("1e").is_err());
    }
}
