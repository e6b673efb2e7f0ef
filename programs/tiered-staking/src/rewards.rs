//! Reward accrual. Pure functions over a position snapshot; callers apply the
//! result themselves.

use anchor_lang::prelude::*;

use crate::constants::{RATE_DENOMINATOR, SECONDS_PER_YEAR};
use crate::errors::StakingError;
use crate::state::{StakePosition, StakingParams};

/// Annual rate (tenths of a percent) for a stake held `held` seconds.
pub fn rate_for_duration(params: &StakingParams, held: i64) -> u16 {
    params
        .tiers
        .iter()
        .find(|tier| held >= tier.min_duration)
        .map(|tier| tier.rate_tenths)
        .unwrap_or(params.base_rate_tenths)
}

/// Reward for `elapsed` seconds at `rate_tenths`, rounded down.
pub fn reward_for_window(principal: u64, rate_tenths: u16, elapsed: i64) -> Result<u64> {
    if elapsed <= 0 {
        return Ok(0);
    }

    let reward = (principal as u128)
        .checked_mul(rate_tenths as u128)
        .and_then(|v| v.checked_mul(elapsed as u128))
        .ok_or(StakingError::Overflow)?
        / SECONDS_PER_YEAR
        / RATE_DENOMINATOR;

    Ok(u64::try_from(reward).map_err(|_| StakingError::Overflow)?)
}

/// Total reward owed to `position` at `now`: the carried/frozen reward plus
/// whatever the open window has accrued.
///
/// Nothing accrues until the stake has been held for the minimum staking
/// period since its deposit. A withdrawing position's window ends at the
/// request, so repeated calls return the frozen value.
pub fn accrued_reward(position: &StakePosition, params: &StakingParams, now: i64) -> Result<u64> {
    let end = position.accrual_end(now);
    let held = position.held_for(end);
    if held < params.min_staking_period {
        return Ok(position.pending_reward);
    }

    let rate = rate_for_duration(params, held);
    let elapsed = end.saturating_sub(position.last_reward_time);
    let accrued = reward_for_window(position.principal, rate, elapsed)?;

    Ok(position
        .pending_reward
        .checked_add(accrued)
        .ok_or(StakingError::Overflow)?)
}
