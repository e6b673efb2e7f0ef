use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{STAKE_ACCOUNT_SEED, VAULT_SEED};
use crate::custody::SplCustody;
use crate::errors::StakingError;
use crate::lifecycle;
use crate::state::{StakeAccount, StakingVault};

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    /// Holder of the emergency role
    pub operator: Signer<'info>,

    /// CHECK: Stake owner; only used to derive the slot and receive the payout
    pub owner: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.stake_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, StakingVault>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump = stake_account.bump,
        constraint = stake_account.owner == owner.key() @ StakingError::NotStakeOwner
    )]
    pub stake_account: Account<'info, StakeAccount>,

    #[account(address = vault.stake_mint @ StakingError::InvalidMint)]
    pub stake_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = owner_token_account.mint == vault.stake_mint @ StakingError::InvalidMint,
        constraint = owner_token_account.owner == owner.key() @ StakingError::Unauthorized
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, address = vault.vault_token_account)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> EmergencyWithdraw<'info> {
    fn custody(&self) -> SplCustody<'info> {
        SplCustody {
            token_program: self.token_program.to_account_info(),
            mint: self.stake_mint.to_account_info(),
            vault: self.vault.to_account_info(),
            vault_tokens: self.vault_token_account.to_account_info(),
            counterparty: self.owner.to_account_info(),
            counterparty_tokens: self.owner_token_account.to_account_info(),
            decimals: self.stake_mint.decimals,
            vault_bump: self.vault.bump,
            balance: self.vault_token_account.amount,
        }
    }
}

/// Force-exit an account, bypassing the withdrawal delay and daily cap
pub fn handler(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let operator = ctx.accounts.operator.key();
    let mut custody = ctx.accounts.custody();

    let payout = lifecycle::emergency_withdraw(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.stake_account,
        operator,
        clock.unix_timestamp,
        &mut custody,
    )?;

    msg!("Emergency exit for {}", ctx.accounts.owner.key());
    msg!(
        "Paid {} principal and {} reward",
        payout.principal,
        payout.reward
    );

    Ok(())
}
