//! Governance configuration.

use agora_types::amount::milliether;
use agora_types::{TokenAmount, Wei};

/// Protocol fees and faucet sizing.
#[derive(Debug, Clone)]
pub struct GovConfig {
    /// Tokens debited from the proposer on submission
    pub proposal_token_fee: TokenAmount,
    /// Wei that must accompany a proposal, exactly
    pub proposal_wei_fee: Wei,
    /// Tokens debited from the survey owner on submission
    pub survey_token_fee: TokenAmount,
    /// Wei that must accompany a survey, exactly
    pub survey_wei_fee: Wei,
    /// Tokens handed out by the one-time faucet claim
    pub faucet_grant: TokenAmount,
}

impl Default for GovConfig {
    fn default() -> Self {
        Self {
            proposal_token_fee: 5,
            proposal_wei_fee: milliether(100), // 0.1 ether
            survey_token_fee: 2,
            survey_wei_fee: milliether(40), // 0.04 ether
            faucet_grant: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fees() {
        let config = GovConfig::default();
        assert_eq!(config.proposal_token_fee, 5);
        assert_eq!(config.proposal_wei_fee, 100_000_000_000_000_000);
        assert_eq!(config.survey_token_fee, 2);
        assert_eq!(config.survey_wei_fee, 40_000_000_000_000_000);
        assert_eq!(config.faucet_grant, 1);
    }
}
