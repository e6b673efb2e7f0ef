use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::VAULT_SEED;
use crate::custody::SplCustody;
use crate::errors::StakingError;
use crate::lifecycle;
use crate::state::StakingVault;

#[derive(Accounts)]
pub struct WithdrawRewards<'info> {
    /// Holder of the reward manager role
    pub manager: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.stake_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, StakingVault>,

    #[account(address = vault.stake_mint @ StakingError::InvalidMint)]
    pub stake_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = manager_token_account.mint == vault.stake_mint @ StakingError::InvalidMint
    )]
    pub manager_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, address = vault.vault_token_account)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> WithdrawRewards<'info> {
    fn custody(&self) -> SplCustody<'info> {
        SplCustody {
            token_program: self.token_program.to_account_info(),
            mint: self.stake_mint.to_account_info(),
            vault: self.vault.to_account_info(),
            vault_tokens: self.vault_token_account.to_account_info(),
            counterparty: self.manager.to_account_info(),
            counterparty_tokens: self.manager_token_account.to_account_info(),
            decimals: self.stake_mint.decimals,
            vault_bump: self.vault.bump,
            balance: self.vault_token_account.amount,
        }
    }
}

/// Drain undistributed rewards; staked principal stays fully covered
pub fn handler(ctx: Context<WithdrawRewards>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let manager = ctx.accounts.manager.key();
    let mut custody = ctx.accounts.custody();

    lifecycle::withdraw_rewards(
        &mut ctx.accounts.vault,
        manager,
        amount,
        clock.unix_timestamp,
        &mut custody,
    )?;

    msg!("Withdrew {} tokens from the reward pool", amount);
    msg!("Reward pool: {}", ctx.accounts.vault.reward_pool);

    Ok(())
}
