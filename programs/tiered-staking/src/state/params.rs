use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::StakingError;

/// One duration bracket of the yield schedule.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateTier {
    /// Minimum held duration (seconds) for this rate to apply
    pub min_duration: i64,

    /// Annual rate in tenths of a percent (109 == 10.9%)
    pub rate_tenths: u16,
}

impl RateTier {
    pub const SIZE: usize = 8 + 2;
}

/// Deployment-fixed configuration, validated once at initialize.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakingParams {
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,

    /// Lock maturity, measured from the deposit
    pub min_staking_period: i64,

    /// Wait between requesting and executing a withdrawal
    pub withdrawal_delay: i64,

    /// Per-account payout ceiling within one UTC day
    pub daily_withdrawal_limit: u64,

    pub base_rate_tenths: u16,

    /// Ordered from the longest duration down
    pub tiers: [RateTier; RATE_TIER_COUNT],
}

impl Default for StakingParams {
    fn default() -> Self {
        let mut tiers = [RateTier::default(); RATE_TIER_COUNT];
        for (tier, (min_duration, rate_tenths)) in tiers.iter_mut().zip(DEFAULT_RATE_TIERS) {
            *tier = RateTier {
                min_duration,
                rate_tenths,
            };
        }

        Self {
            min_stake_amount: DEFAULT_MIN_STAKE_AMOUNT,
            max_stake_amount: DEFAULT_MAX_STAKE_AMOUNT,
            min_staking_period: DEFAULT_MIN_STAKING_PERIOD,
            withdrawal_delay: DEFAULT_WITHDRAWAL_DELAY,
            daily_withdrawal_limit: DEFAULT_DAILY_WITHDRAWAL_LIMIT,
            base_rate_tenths: DEFAULT_BASE_RATE_TENTHS,
            tiers,
        }
    }
}

impl StakingParams {
    pub const SIZE: usize = 8 + // min_stake_amount
        8 +  // max_stake_amount
        8 +  // min_staking_period
        8 +  // withdrawal_delay
        8 +  // daily_withdrawal_limit
        2 +  // base_rate_tenths
        RateTier::SIZE * RATE_TIER_COUNT; // tiers

    pub fn validate(&self) -> Result<()> {
        require!(
            self.min_stake_amount > 0 && self.min_stake_amount <= self.max_stake_amount,
            StakingError::InvalidParameters
        );
        require!(
            self.min_staking_period >= 0 && self.withdrawal_delay >= 0,
            StakingError::InvalidParameters
        );
        // A reward-free exit of the largest stake must fit in one day
        require!(
            self.daily_withdrawal_limit >= self.max_stake_amount,
            StakingError::InvalidParameters
        );
        require!(
            self.base_rate_tenths <= MAX_RATE_TENTHS,
            StakingError::InvalidParameters
        );

        // Longer holds must never earn less than shorter ones
        let mut floor_rate = self.base_rate_tenths;
        let mut prev_duration = i64::MAX;
        for tier in self.tiers.iter().rev() {
            require!(
                tier.rate_tenths >= floor_rate && tier.rate_tenths <= MAX_RATE_TENTHS,
                StakingError::InvalidParameters
            );
            floor_rate = tier.rate_tenths;
        }
        for tier in self.tiers.iter() {
            require!(
                tier.min_duration > 0 && tier.min_duration < prev_duration,
                StakingError::InvalidParameters
            );
            prev_duration = tier.min_duration;
        }

        Ok(())
    }

    pub fn check_stake_amount(&self, amount: u64) -> Result<()> {
        require!(
            amount >= self.min_stake_amount && amount <= self.max_stake_amount,
            StakingError::InvalidAmount
        );
        Ok(())
    }
}
