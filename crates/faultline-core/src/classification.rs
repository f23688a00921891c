//! Error classifications and their transport status codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse-grained failure category.
///
/// Drives the transport status a boundary layer answers with and the
/// severity an error is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Classification {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Timeout,
    InternalError,
    NotImplemented,
    Unavailable,
    Unknown,
    /// Not classified
    #[default]
    None,
}

impl Classification {
    /// Every classification, in status order
    pub const ALL: [Classification; 10] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Timeout,
        Self::InternalError,
        Self::NotImplemented,
        Self::Unavailable,
        Self::Unknown,
        Self::None,
    ];

    /// Stable name used in records and reports
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::Timeout => "Timeout",
            Self::InternalError => "InternalError",
            Self::NotImplemented => "NotImplemented",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "Unknown",
            Self::None => "None",
        }
    }

    /// HTTP-style status for this classification. `None` has no status.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Timeout => Some(441),
            Self::InternalError => Some(500),
            Self::NotImplemented => Some(501),
            Self::Unavailable => Some(503),
            Self::Unknown => Some(520),
            Self::None => None,
        }
    }

    /// Reverse lookup from a status code
    pub fn from_status_code(status: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.status_code() == Some(status))
    }

    /// Whether the failure is on the serving side (5xx-class)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification: {0}")]
pub struct UnknownClassification(pub String);

impl FromStr for Classification {
    type Err = UnknownClassification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownClassification(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Classification::BadRequest.status_code(), Some(400));
        assert_eq!(Classification::Unauthorized.status_code(), Some(401));
        assert_eq!(Classification::Forbidden.status_code(), Some(403));
        assert_eq!(Classification::NotFound.status_code(), Some(404));
        assert_eq!(Classification::Timeout.status_code(), Some(441));
        assert_eq!(Classification::InternalError.status_code(), Some(500));
        assert_eq!(Classification::NotImplemented.status_code(), Some(501));
        assert_eq!(Classification::Unavailable.status_code(), Some(503));
        assert_eq!(Classification::Unknown.status_code(), Some(520));
        assert_eq!(Classification::None.status_code(), None);
    }

    #[test]
    fn test_from_status_code() {
        assert_eq!(
            Classification::from_status_code(441),
            Some(Classification::Timeout)
        );
        assert_eq!(Classification::from_status_code(418), None);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for class in Classification::ALL {
            assert_eq!(class.as_str().parse::<Classification>(), Ok(class));
        }
        assert_eq!(
            "notfound".parse::<Classification>(),
            Ok(Classification::NotFound)
        );
        assert!("Teapot".parse::<Classification>().is_err());
    }

    #[test]
    fn test_server_error() {
        assert!(Classification::InternalError.is_server_error());
        assert!(Classification::Unknown.is_server_error());
        assert!(!Classification::NotFound.is_server_error());
        assert!(!Classification::None.is_server_error());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Classification::NotImplemented).unwrap();
        assert_eq!(json, "\"NotImplemented\"");
    }
}
