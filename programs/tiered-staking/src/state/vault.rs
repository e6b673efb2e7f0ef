use anchor_lang::prelude::*;

use crate::errors::StakingError;
use crate::guard::Lockable;
use crate::state::{Role, RoleTable, StakingParams};

/// Global staking vault for a single mint
/// PDA: ["staking-vault", mint]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakingVault {
    /// Initializer; holds every role at creation
    pub authority: Pubkey,

    /// The staked (and reward) token
    pub stake_mint: Pubkey,

    /// Custody token account owned by this PDA
    pub vault_token_account: Pubkey,

    /// Sum of all active principals
    pub total_staked: u64,

    /// Tokens reserved for yield, disjoint from principal
    pub reward_pool: u64,

    /// Number of active positions
    pub staker_count: u32,

    /// Lifetime rewards paid out through claims and exits
    pub total_rewards_paid: u64,

    pub params: StakingParams,

    pub roles: RoleTable,

    /// User-facing operations are rejected while set
    pub paused: bool,

    /// Set while a mutating operation is in flight
    pub locked: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl StakingVault {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // stake_mint
        32 + // vault_token_account
        8 +  // total_staked
        8 +  // reward_pool
        4 +  // staker_count
        8 +  // total_rewards_paid
        StakingParams::SIZE + // params
        RoleTable::SIZE + // roles
        1 +  // paused
        1 +  // locked
        1 +  // bump
        32; // reserved

    pub fn initialize(
        &mut self,
        authority: Pubkey,
        stake_mint: Pubkey,
        vault_token_account: Pubkey,
        params: StakingParams,
        bump: u8,
    ) -> Result<()> {
        params.validate()?;

        *self = Self {
            authority,
            stake_mint,
            vault_token_account,
            params,
            bump,
            ..Self::default()
        };
        for role in Role::ALL {
            self.roles.grant(role, authority)?;
        }
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, StakingError::SystemPaused);
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total_staked: self.total_staked,
            reward_pool: self.reward_pool,
            staker_count: self.staker_count,
            total_rewards_paid: self.total_rewards_paid,
        }
    }

    pub fn commit(&mut self, totals: Totals) {
        self.total_staked = totals.total_staked;
        self.reward_pool = totals.reward_pool;
        self.staker_count = totals.staker_count;
        self.total_rewards_paid = totals.total_rewards_paid;
    }
}

impl Lockable for StakingVault {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// Global counters, computed with checked arithmetic before being committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    pub total_staked: u64,
    pub reward_pool: u64,
    pub staker_count: u32,
    pub total_rewards_paid: u64,
}

impl Totals {
    pub fn add_stake(self, principal: u64) -> Result<Self> {
        Ok(Self {
            total_staked: self
                .total_staked
                .checked_add(principal)
                .ok_or(StakingError::Overflow)?,
            staker_count: self
                .staker_count
                .checked_add(1)
                .ok_or(StakingError::Overflow)?,
            ..self
        })
    }

    pub fn remove_stake(self, principal: u64) -> Result<Self> {
        Ok(Self {
            total_staked: self
                .total_staked
                .checked_sub(principal)
                .ok_or(StakingError::Overflow)?,
            staker_count: self
                .staker_count
                .checked_sub(1)
                .ok_or(StakingError::Overflow)?,
            ..self
        })
    }

    pub fn credit_pool(self, amount: u64) -> Result<Self> {
        Ok(Self {
            reward_pool: self
                .reward_pool
                .checked_add(amount)
                .ok_or(StakingError::Overflow)?,
            ..self
        })
    }

    /// Pool debit for a discretionary drain
    pub fn debit_pool(self, amount: u64) -> Result<Self> {
        require!(
            amount <= self.reward_pool,
            StakingError::InsufficientRewardPool
        );
        Ok(Self {
            reward_pool: self.reward_pool - amount,
            ..self
        })
    }

    /// Pool debit for a reward paid to a staker
    pub fn pay_reward(self, reward: u64) -> Result<Self> {
        let debited = self.debit_pool(reward)?;
        Ok(Self {
            total_rewards_paid: debited.total_rewards_paid.saturating_add(reward),
            ..debited
        })
    }

    /// Custody left after paying `outflow` must cover principal plus pool
    pub fn ensure_solvent(&self, custody_balance: u64, outflow: u64) -> Result<()> {
        let remaining = custody_balance
            .checked_sub(outflow)
            .ok_or(StakingError::InsufficientCustody)?;
        let liabilities = self
            .total_staked
            .checked_add(self.reward_pool)
            .ok_or(StakingError::Overflow)?;
        require!(remaining >= liabilities, StakingError::InsolventVault);
        Ok(())
    }
}
