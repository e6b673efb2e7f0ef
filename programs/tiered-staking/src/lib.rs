use anchor_lang::prelude::*;

pub mod constants;
pub mod custody;
pub mod errors;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod lifecycle;
pub mod rewards;
pub mod state;

use instructions::*;
use state::{Role, StakingParams};

declare_id!("TierStake1111111111111111111111111111111111");

/// Tiered Staking Vault
///
/// Single-token staking with duration-tiered yield:
/// - Stakes lock for a minimum period before earning
/// - Exits are requested, delayed, then executed under a daily cap
/// - Rewards come from a segregated, operator-funded pool
/// - Operators can force-exit accounts and pause user operations
#[program]
pub mod tiered_staking {
    use super::*;

    /// Create the vault and its custody account (one-time setup)
    pub fn initialize(ctx: Context<Initialize>, params: StakingParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Lock tokens; one active stake per account
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Freeze rewards and start the withdrawal delay
    pub fn request_withdrawal(ctx: Context<RequestWithdrawal>) -> Result<()> {
        instructions::request_withdrawal::handler(ctx)
    }

    /// Receive principal plus frozen reward after the delay
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Claim accrued rewards while staying staked
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    /// Force-exit an account (emergency role)
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx)
    }

    /// Fund the reward pool (reward manager role)
    pub fn deposit_rewards(ctx: Context<DepositRewards>, amount: u64) -> Result<()> {
        instructions::deposit_rewards::handler(ctx, amount)
    }

    /// Drain undistributed rewards (reward manager role)
    pub fn withdraw_rewards(ctx: Context<WithdrawRewards>, amount: u64) -> Result<()> {
        instructions::withdraw_rewards::handler(ctx, amount)
    }

    /// Pause or resume user operations (admin role)
    pub fn set_paused(ctx: Context<AdminControl>, paused: bool) -> Result<()> {
        instructions::admin::set_paused_handler(ctx, paused)
    }

    /// Grant or revoke a role (admin role)
    pub fn set_role(
        ctx: Context<AdminControl>,
        member: Pubkey,
        role: Role,
        granted: bool,
    ) -> Result<()> {
        instructions::admin::set_role_handler(ctx, member, role, granted)
    }
}
