use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{VAULT_SEED, VAULT_TOKENS_SEED};
use crate::events::VaultInitialized;
use crate::state::{StakingParams, StakingVault};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The token that is staked and paid as reward
    pub stake_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = StakingVault::SIZE,
        seeds = [VAULT_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, StakingVault>,

    /// Custody for principal and reward pool, owned by the vault PDA
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_TOKENS_SEED, vault.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = vault,
        token::token_program = token_program
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, params: StakingParams) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();
    let stake_mint = ctx.accounts.stake_mint.key();
    let vault_token_account = ctx.accounts.vault_token_account.key();

    ctx.accounts.vault.initialize(
        authority,
        stake_mint,
        vault_token_account,
        params,
        ctx.bumps.vault,
    )?;

    emit!(VaultInitialized {
        authority,
        stake_mint,
        vault_token_account,
        timestamp: clock.unix_timestamp,
    });

    msg!("Initialized staking vault for mint: {}", stake_mint);
    msg!(
        "Stake range: {}..={}, lock: {}s, delay: {}s",
        params.min_stake_amount,
        params.max_stake_amount,
        params.min_staking_period,
        params.withdrawal_delay
    );
    msg!("Daily withdrawal limit: {}", params.daily_withdrawal_limit);

    Ok(())
}
