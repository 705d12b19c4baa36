//! Global DAO parameters, fixed at initialization.

use crate::error::GovernanceError;
use civitas_types::AssetId;
use serde::{Deserialize, Serialize};

/// The DAO-wide configuration every operation is evaluated against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoParams {
    /// Governance tokens a proposer must deposit to record a proposal.
    pub deposit: u64,
    /// Minimum affirmative voting power for a proposal to pass.
    pub min_support: u64,
    /// Shortest allowed voting window, in seconds.
    pub min_duration: u64,
    /// Longest allowed voting window, in seconds.
    pub max_duration: u64,
    /// Where to find more information about the DAO.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub dao_name: String,
    /// Token used for proposal deposits and voting power.
    pub gov_token_id: AssetId,
}

impl DaoParams {
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.min_duration == 0 {
            return Err(GovernanceError::InvalidParams(
                "min_duration must be greater than zero".into(),
            ));
        }
        if self.min_duration >= self.max_duration {
            return Err(GovernanceError::InvalidParams(format!(
                "min_duration ({}) must be less than max_duration ({})",
                self.min_duration, self.max_duration
            )));
        }
        Ok(())
    }

    /// Whether a voting window of `secs` seconds is within bounds.
    pub fn allows_duration(&self, secs: u64) -> bool {
        (self.min_duration..=self.max_duration).contains(&secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: u64, max: u64) -> DaoParams {
        DaoParams {
            deposit: 15,
            min_support: 5,
            min_duration: min,
            max_duration: max,
            url: "www.my-url.com".into(),
            dao_name: "dao".into(),
            gov_token_id: AssetId(1),
        }
    }

    #[test]
    fn rejects_zero_min_duration() {
        assert!(matches!(
            params(0, 10).validate(),
            Err(GovernanceError::InvalidParams(_))
        ));
    }

    #[test]
    fn rejects_min_not_below_max() {
        assert!(params(10, 10).validate().is_err());
        assert!(params(11, 10).validate().is_err());
        assert!(params(60, 300).validate().is_ok());
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        let p = params(60, 300);
        assert!(p.allows_duration(60));
        assert!(p.allows_duration(300));
        assert!(!p.allows_duration(59));
        assert!(!p.allows_duration(301));
    }
}
