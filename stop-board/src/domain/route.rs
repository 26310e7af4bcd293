//! Route identifier type.

use std::fmt;

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// An opaque route identifier.
///
/// Same validation rules as [`StopId`](super::StopId): route id formats
/// vary by operator and region, so only the universally safe shape is
/// enforced.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

const MAX_LEN: usize = 64;

impl RouteId {
    /// Parse a route identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidRouteId {
                reason: "too long (max 64 characters)",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidRouteId {
                reason: "must be printable ASCII without whitespace",
            });
        }

        Ok(RouteId(s.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
