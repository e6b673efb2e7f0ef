use anchor_lang::prelude::*;

use crate::constants::{STAKE_ACCOUNT_SEED, VAULT_SEED};
use crate::errors::StakingError;
use crate::lifecycle;
use crate::state::{StakeAccount, StakingVault};

#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.stake_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, StakingVault>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, vault.key().as_ref(), user.key().as_ref()],
        bump = stake_account.bump,
        constraint = stake_account.owner == user.key() @ StakingError::NotStakeOwner
    )]
    pub stake_account: Account<'info, StakeAccount>,
}

/// Freeze rewards and start the withdrawal delay
pub fn handler(ctx: Context<RequestWithdrawal>) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let frozen = lifecycle::request_withdrawal(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.stake_account,
        user,
        clock.unix_timestamp,
    )?;

    let ready_at = clock
        .unix_timestamp
        .saturating_add(ctx.accounts.vault.params.withdrawal_delay);
    msg!("Withdrawal requested, reward frozen at {}", frozen);
    msg!("Can withdraw after: {}", ready_at);

    Ok(())
}
