//! Submission identifier
//!
//! The id a client picks for one benchmark run. It doubles as the token
//! nonce and the primary key, so it has exactly one textual form: a
//! hyphenated UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ```
/// use kernel::id::SubmissionId;
///
/// let id: SubmissionId = "6f1c1c3e-4a0b-4d2e-9b7f-0a1b2c3d4e5f".parse().unwrap();
/// assert_eq!(id.to_string(), "6f1c1c3e-4a0b-4d2e-9b7f-0a1b2c3d4e5f");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid submission id: {0}")]
pub struct IdParseError(String);

impl SubmissionId {
    /// Fresh random (v4) id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubmissionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubmissionId({})", self.0)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surrounding whitespace from header values is tolerated
impl FromStr for SubmissionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "6f1c1c3e-4a0b-4d2e-9b7f-0a1b2c3d4e5f";

    #[test]
    fn test_parse() {
        let id: SubmissionId = RAW.parse().unwrap();
        assert_eq!(id.to_string(), RAW);
        assert_eq!(format!(" {RAW} ").parse::<SubmissionId>().unwrap(), id);

        assert!("not-a-uuid".parse::<SubmissionId>().is_err());
        assert!("".parse::<SubmissionId>().is_err());
    }

    #[test]
    fn test_simple_form_displays_hyphenated() {
        let id: SubmissionId = RAW.replace('-', "").parse().unwrap();
        assert_eq!(id.to_string(), RAW);
    }

    #[test]
    fn test_fresh_ids_differ() {
        let a = SubmissionId::new();
        let b = SubmissionId::new();
        assert_ne!(a, b);
        assert_eq!(SubmissionId::from(a.into_uuid()), a);
    }

    #[test]
    fn test_serde_as_plain_uuid() {
        let id: SubmissionId = RAW.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{RAW}\""));
        let back: SubmissionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
