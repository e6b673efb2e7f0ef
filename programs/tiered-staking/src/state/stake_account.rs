use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::errors::StakingError;

/// An active stake. At most one per ledger slot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakePosition {
    /// Tokens locked by the deposit
    pub principal: u64,

    /// Deposit timestamp; lock maturity and tiers are measured from here
    pub start_time: i64,

    /// Start of the current accrual window
    pub last_reward_time: i64,

    /// Reward carried forward, frozen once withdrawal is requested
    pub pending_reward: u64,

    pub is_withdrawing: bool,

    pub withdrawal_request_time: i64,
}

impl StakePosition {
    pub const SIZE: usize = 8 + // principal
        8 +  // start_time
        8 +  // last_reward_time
        8 +  // pending_reward
        1 +  // is_withdrawing
        8; // withdrawal_request_time

    pub fn new(principal: u64, now: i64) -> Self {
        Self {
            principal,
            start_time: now,
            last_reward_time: now,
            pending_reward: 0,
            is_withdrawing: false,
            withdrawal_request_time: 0,
        }
    }

    /// End of the accrual window: frozen at the request once withdrawing
    pub fn accrual_end(&self, now: i64) -> i64 {
        if self.is_withdrawing {
            self.withdrawal_request_time
        } else {
            now
        }
    }

    pub fn held_for(&self, now: i64) -> i64 {
        now.saturating_sub(self.start_time)
    }

    /// Fold `reward` into the position and stop further accrual
    pub fn freeze(&mut self, reward: u64, now: i64) {
        self.pending_reward = reward;
        self.last_reward_time = now;
        self.is_withdrawing = true;
        self.withdrawal_request_time = now;
    }

    /// Reset after a claim paid everything accrued up to `now`
    pub fn checkpoint(&mut self, now: i64) {
        self.pending_reward = 0;
        self.last_reward_time = now;
    }
}

/// Rolling per-account payout counter after charging a withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyWindow {
    pub day: i64,
    pub withdrawn: u64,
}

pub fn day_index(now: i64) -> i64 {
    now.div_euclid(SECONDS_PER_DAY)
}

/// Per-owner ledger slot
/// PDA: ["stake-account", vault, owner]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakeAccount {
    /// Owner of this slot
    pub owner: Pubkey,

    /// The vault this slot belongs to
    pub vault: Pubkey,

    /// Active stake; `None` once withdrawn or force-exited
    pub position: Option<StakePosition>,

    /// Amount paid out within `last_daily_reset`'s day
    pub daily_withdrawn_amount: u64,

    /// Day index (unix time / 86400) of the last payout window
    pub last_daily_reset: i64,

    /// Lifetime rewards claimed without exiting
    pub total_claimed: u64,

    /// Lifetime principal + reward paid on exit
    pub total_withdrawn: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl StakeAccount {
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        32 + // vault
        1 + StakePosition::SIZE + // position
        8 +  // daily_withdrawn_amount
        8 +  // last_daily_reset
        8 +  // total_claimed
        8 +  // total_withdrawn
        1 +  // bump
        16; // reserved

    pub fn is_bound(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Attach a freshly created slot to its owner and vault
    pub fn bind(&mut self, owner: Pubkey, vault: Pubkey, bump: u8) {
        self.owner = owner;
        self.vault = vault;
        self.bump = bump;
    }

    pub fn ensure_owner(&self, owner: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *owner, StakingError::NotStakeOwner);
        Ok(())
    }

    pub fn active_position(&self) -> Result<StakePosition> {
        self.position.ok_or_else(|| error!(StakingError::NoActiveStake))
    }

    pub fn open_position(&mut self, principal: u64, now: i64) -> Result<()> {
        require!(self.position.is_none(), StakingError::AlreadyStaked);
        self.position = Some(StakePosition::new(principal, now));
        Ok(())
    }

    /// Delete the active position; the slot and its daily window survive
    pub fn close_position(&mut self) -> Option<StakePosition> {
        self.position.take()
    }

    /// Charge `amount` against today's window without mutating the slot
    pub fn charge_daily(&self, amount: u64, limit: u64, now: i64) -> Result<DailyWindow> {
        let day = day_index(now);
        let used = if day == self.last_daily_reset {
            self.daily_withdrawn_amount
        } else {
            0
        };
        let withdrawn = used.checked_add(amount).ok_or(StakingError::Overflow)?;
        require!(withdrawn <= limit, StakingError::DailyLimitExceeded);

        Ok(DailyWindow { day, withdrawn })
    }

    pub fn apply_daily(&mut self, window: DailyWindow) {
        self.last_daily_reset = window.day;
        self.daily_withdrawn_amount = window.withdrawn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = SECONDS_PER_DAY;

    fn bound_slot() -> StakeAccount {
        let mut slot = StakeAccount::default();
        slot.bind(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        slot
    }

    #[test]
    fn test_single_position_per_slot() {
        let mut slot = bound_slot();
        slot.open_position(1_000, 10).unwrap();
        assert!(slot.open_position(1_000, 20).is_err());
        assert_eq!(slot.active_position().unwrap().start_time, 10);

        let closed = slot.close_position().unwrap();
        assert_eq!(closed.principal, 1_000);
        assert!(slot.active_position().is_err());
        assert!(slot.open_position(2_000, 30).is_ok());
    }

    #[test]
    fn test_freeze_moves_window_end() {
        let mut position = StakePosition::new(1_000, 0);
        assert_eq!(position.accrual_end(50), 50);

        position.freeze(42, 40);
        assert_eq!(position.pending_reward, 42);
        assert_eq!(position.last_reward_time, 40);
        assert_eq!(position.accrual_end(500), 40);
    }

    #[test]
    fn test_daily_window_resets_on_new_day() {
        let mut slot = bound_slot();
        let window = slot.charge_daily(600, 1_000, 5 * DAY + 10).unwrap();
        slot.apply_daily(window);
        assert_eq!(slot.last_daily_reset, 5);

        // same day: 600 + 500 > 1000
        assert!(slot.charge_daily(500, 1_000, 6 * DAY - 1).is_err());

        // next day starts from zero
        let window = slot.charge_daily(1_000, 1_000, 6 * DAY).unwrap();
        assert_eq!(window, DailyWindow { day: 6, withdrawn: 1_000 });
    }

    #[test]
    fn test_day_index_negative_time() {
        assert_eq!(day_index(-1), -1);
        assert_eq!(day_index(0), 0);
    }
}
