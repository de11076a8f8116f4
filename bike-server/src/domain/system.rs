//! Bike-share system identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid system identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid system id: {reason}")]
pub struct InvalidSystemId {
    reason: &'static str,
}

/// Identifier of a bike-share system (e.g. "citibike").
///
/// Always non-empty lowercase ASCII alphanumerics, guaranteed by
/// construction.
///
/// # Examples
///
/// ```
/// use bike_server::domain::SystemId;
///
/// let citibike = SystemId::parse("citibike").unwrap();
/// assert_eq!(citibike.as_str(), "citibike");
///
/// // Uppercase is rejected
/// assert!(SystemId::parse("CitiBike").is_err());
///
/// // Empty is rejected
/// assert!(SystemId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SystemId(String);

impl SystemId {
    /// Parse a system identifier from a string.
    ///
    /// The input must be non-empty lowercase ASCII alphanumerics.
    pub fn parse(s: &str) -> Result<Self, InvalidSystemId> {
        if s.is_empty() {
            return Err(InvalidSystemId {
                reason: "must be non-empty",
            });
        }

        for b in s.bytes() {
            if !(b.is_ascii_lowercase() || b.is_ascii_digit()) {
                return Err(InvalidSystemId {
                    reason: "must be lowercase ASCII alphanumerics",
                });
            }
        }

        Ok(SystemId(s.to_string()))
    }

    /// The Citi Bike system (New York City).
    pub fn citibike() -> Self {
        SystemId("citibike".to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SystemId {
    type Error = InvalidSystemId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        SystemId::parse(&s)
    }
}

impl From<SystemId> for String {
    fn from(id: SystemId) -> String {
        id.0
    }
}

impl fmt::Debug for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemId({})", self.0)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(SystemId::parse("citibike").is_ok());
        assert!(SystemId::parse("divvy").is_ok());
        assert!(SystemId::parse("bike2go").is_ok());
    }

    #[test]
    fn reject_invalid() {
        assert!(SystemId::parse("").is_err());
        assert!(SystemId::parse("Citi Bike").is_err());
        assert!(SystemId::parse("citi-bike").is_err());
        assert!(SystemId::parse("CITIBIKE").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let id = SystemId::citibike();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"citibike\"");
        let back: SystemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let result: Result<SystemId, _> = serde_json::from_str("\"Citi Bike\"");
        assert!(result.is_err());
    }
}
