use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{STAKE_ACCOUNT_SEED, VAULT_SEED};
use crate::custody::SplCustody;
use crate::errors::StakingError;
use crate::lifecycle;
use crate::state::{StakeAccount, StakingVault};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
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

    #[account(address = vault.stake_mint @ StakingError::InvalidMint)]
    pub stake_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == vault.stake_mint @ StakingError::InvalidMint,
        constraint = user_token_account.owner == user.key() @ StakingError::Unauthorized
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, address = vault.vault_token_account)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Withdraw<'info> {
    fn custody(&self) -> SplCustody<'info> {
        SplCustody {
            token_program: self.token_program.to_account_info(),
            mint: self.stake_mint.to_account_info(),
            vault: self.vault.to_account_info(),
            vault_tokens: self.vault_token_account.to_account_info(),
            counterparty: self.user.to_account_info(),
            counterparty_tokens: self.user_token_account.to_account_info(),
            decimals: self.stake_mint.decimals,
            vault_bump: self.vault.bump,
            balance: self.vault_token_account.amount,
        }
    }
}

/// Execute a requested withdrawal once the delay has passed
pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();
    let mut custody = ctx.accounts.custody();

    let payout = lifecycle::withdraw(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.stake_account,
        user,
        clock.unix_timestamp,
        &mut custody,
    )?;

    msg!(
        "Withdrew {} principal and {} reward",
        payout.principal,
        payout.reward
    );
    msg!(
        "Withdrawn today: {}",
        ctx.accounts.stake_account.daily_withdrawn_amount
    );

    Ok(())
}
