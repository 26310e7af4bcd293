//! Stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// An opaque stop identifier (NaPTAN/ATCO-style code).
///
/// Stop code formats vary between data sources, so this type only enforces
/// the shape every source agrees on: non-empty printable ASCII with no
/// whitespace. Any `StopId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use stop_board::domain::StopId;
///
/// let stop = StopId::parse("490008660N").unwrap();
/// assert_eq!(stop.as_str(), "490008660N");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("bad id").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

/// Longest stop code we accept; real codes are far shorter.
const MAX_LEN: usize = 64;

impl StopId {
    /// Parse a stop identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidStopId {
                reason: "too long (max 64 characters)",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidStopId {
                reason: "must be printable ASCII without whitespace",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StopId::parse("490008660N").is_ok());
        assert!(StopId::parse("3390BB01").is_ok());
        assert!(StopId::parse("x").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(StopId::parse("490 008").is_err());
        assert!(StopId::parse(" 490008").is_err());
        assert!(StopId::parse("490008\n").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "a".repeat(65);
        assert!(StopId::parse(&long).is_err());
        let max = "a".repeat(64);
        assert!(StopId::parse(&max).is_ok());
    }

    #[test]
    fn reject_non_ascii() {
        assert!(StopId::parse("stöp").is_err());
    }

    #[test]
    fn display_matches_input() {
        let stop = StopId::parse("490008660N").unwrap();
        assert_eq!(stop.to_string(), "490008660N");
    }
}
