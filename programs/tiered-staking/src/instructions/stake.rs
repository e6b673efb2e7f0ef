use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{STAKE_ACCOUNT_SEED, VAULT_SEED};
use crate::custody::SplCustody;
use crate::errors::StakingError;
use crate::lifecycle;
use crate::state::{StakeAccount, StakingVault};

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.stake_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, StakingVault>,

    /// Ledger slot, created on the owner's first stake
    #[account(
        init_if_needed,
        payer = user,
        space = StakeAccount::SIZE,
        seeds = [STAKE_ACCOUNT_SEED, vault.key().as_ref(), user.key().as_ref()],
        bump
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
    pub system_program: Program<'info, System>,
}

impl<'info> Stake<'info> {
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

pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();
    let vault_key = ctx.accounts.vault.key();
    let mut custody = ctx.accounts.custody();

    let stake_account = &mut ctx.accounts.stake_account;
    if !stake_account.is_bound() {
        stake_account.bind(user, vault_key, ctx.bumps.stake_account);
    }

    lifecycle::stake(
        &mut ctx.accounts.vault,
        stake_account,
        user,
        amount,
        clock.unix_timestamp,
        &mut custody,
    )?;

    msg!("Staked {} tokens", amount);
    msg!("Total staked: {}", ctx.accounts.vault.total_staked);

    Ok(())
}
