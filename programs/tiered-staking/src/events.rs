use anchor_lang::prelude::*;

/// Emitted when the vault is created
#[event]
pub struct VaultInitialized {
    pub authority: Pubkey,
    pub stake_mint: Pubkey,
    pub vault_token_account: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a user opens a stake
#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

/// Emitted when a user freezes rewards and starts the withdrawal delay
#[event]
pub struct WithdrawalRequested {
    pub user: Pubkey,
    pub principal: u64,
    pub frozen_reward: u64,
    pub available_at: i64,
    pub timestamp: i64,
}

/// Emitted when a requested withdrawal is paid out
#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub daily_withdrawn: u64,
    pub timestamp: i64,
}

/// Emitted when rewards are claimed without exiting
#[event]
pub struct RewardsClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub reward_pool: u64,
    pub timestamp: i64,
}

/// Emitted when an operator force-exits an account
#[event]
pub struct EmergencyWithdrawn {
    pub user: Pubkey,
    pub operator: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub timestamp: i64,
}

/// Emitted when the reward pool is funded
#[event]
pub struct RewardsDeposited {
    pub manager: Pubkey,
    pub amount: u64,
    pub reward_pool: u64,
    pub timestamp: i64,
}

/// Emitted when surplus rewards are drained from the pool
#[event]
pub struct RewardsWithdrawn {
    pub manager: Pubkey,
    pub amount: u64,
    pub reward_pool: u64,
    pub timestamp: i64,
}

#[event]
pub struct PauseUpdated {
    pub admin: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct RoleUpdated {
    pub admin: Pubkey,
    pub member: Pubkey,
    pub role: u8,
    pub granted: bool,
    pub timestamp: i64,
}
