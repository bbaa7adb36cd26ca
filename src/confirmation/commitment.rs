//! Commitment levels for commitment-based confirmation semantics
//!
//! Solana-family chains label transaction finality with a three-tier
//! commitment level rather than a confirmation count. A status report carries
//! the highest level the transaction has reached so far.
//!
//! Reference: <https://solana.com/docs/rpc#configuring-state-commitment>

use std::fmt;

use serde::{Deserialize, Serialize};

/// Commitment level reported for (or requested of) a transaction
///
/// Matching against a target level follows a directional subsumption rule:
/// a report satisfies a target when it equals the target, or when the target
/// is [`Confirmed`](Self::Confirmed) and the report is
/// [`Finalized`](Self::Finalized). Requesting `Finalized` is never satisfied
/// by a `Confirmed` report.
///
/// # Examples
///
/// ```rust
/// use txwatch_rs::CommitmentLevel;
///
/// assert!(CommitmentLevel::Finalized.satisfies(CommitmentLevel::Confirmed));
/// assert!(!CommitmentLevel::Confirmed.satisfies(CommitmentLevel::Finalized));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    /// The transaction was processed by a node's current fork
    Processed,
    /// A supermajority of the cluster voted on the transaction's block
    Confirmed,
    /// The block is rooted and cannot be rolled back
    Finalized,
}

impl CommitmentLevel {
    /// Returns true if a status report at this level satisfies `target`
    ///
    /// The rule is equality plus the one-way `Finalized ⊇ Confirmed`
    /// subsumption. A `Finalized` target is only met by a `Finalized` report.
    ///
    /// # Example
    ///
    /// ```rust
    /// use txwatch_rs::CommitmentLevel;
    ///
    /// assert!(CommitmentLevel::Confirmed.satisfies(CommitmentLevel::Confirmed));
    /// assert!(CommitmentLevel::Finalized.satisfies(CommitmentLevel::Confirmed));
    /// assert!(!CommitmentLevel::Finalized.satisfies(CommitmentLevel::Processed));
    /// ```
    #[inline]
    pub const fn satisfies(self, target: CommitmentLevel) -> bool {
        matches!(
            (self, target),
            (CommitmentLevel::Processed, CommitmentLevel::Processed)
                | (CommitmentLevel::Confirmed, CommitmentLevel::Confirmed)
                | (CommitmentLevel::Finalized, CommitmentLevel::Finalized)
                | (CommitmentLevel::Finalized, CommitmentLevel::Confirmed)
        )
    }

    /// Returns the RPC wire name for this level
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    /// Returns true if this is the strongest commitment level
    #[inline]
    pub const fn is_finalized(self) -> bool {
        matches!(self, Self::Finalized)
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CommitmentLevel {
    type Error = InvalidCommitmentLevel;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(InvalidCommitmentLevel(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized commitment level name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCommitmentLevel(pub String);

impl fmt::Display for InvalidCommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid commitment level: {:?} (expected processed, confirmed, or finalized)",
            self.0
        )
    }
}

impl std::error::Error for InvalidCommitmentLevel {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CommitmentLevel::Processed, CommitmentLevel::Processed, true)]
    #[case(CommitmentLevel::Confirmed, CommitmentLevel::Confirmed, true)]
    #[case(CommitmentLevel::Finalized, CommitmentLevel::Finalized, true)]
    #[case(CommitmentLevel::Finalized, CommitmentLevel::Confirmed, true)]
    #[case(CommitmentLevel::Confirmed, CommitmentLevel::Finalized, false)]
    #[case(CommitmentLevel::Processed, CommitmentLevel::Confirmed, false)]
    #[case(CommitmentLevel::Processed, CommitmentLevel::Finalized, false)]
    #[case(CommitmentLevel::Confirmed, CommitmentLevel::Processed, false)]
    #[case(CommitmentLevel::Finalized, CommitmentLevel::Processed, false)]
    fn test_satisfies_matrix(
        #[case] reported: CommitmentLevel,
        #[case] target: CommitmentLevel,
        #[case] expected: bool,
    ) {
        assert_eq!(reported.satisfies(target), expected);
    }

    #[test]
    fn test_subsumption_is_directional() {
        // finalized implies confirmed, never the reverse
        assert!(CommitmentLevel::Finalized.satisfies(CommitmentLevel::Confirmed));
        assert!(!CommitmentLevel::Confirmed.satisfies(CommitmentLevel::Finalized));
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(
            CommitmentLevel::try_from("processed").unwrap(),
            CommitmentLevel::Processed
        );
        assert_eq!(
            CommitmentLevel::try_from("confirmed").unwrap(),
            CommitmentLevel::Confirmed
        );
        assert_eq!(
            CommitmentLevel::try_from("finalized").unwrap(),
            CommitmentLevel::Finalized
        );
    }

    #[test]
    fn test_try_from_invalid() {
        let err = CommitmentLevel::try_from("final").unwrap_err();
        assert_eq!(err, InvalidCommitmentLevel("final".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CommitmentLevel::Processed), "processed");
        assert_eq!(format!("{}", CommitmentLevel::Confirmed), "confirmed");
        assert_eq!(format!("{}", CommitmentLevel::Finalized), "finalized");
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&CommitmentLevel::Finalized).unwrap();
        assert_eq!(json, "\"finalized\"");
        let parsed: CommitmentLevel = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(parsed, CommitmentLevel::Confirmed);
    }
}
