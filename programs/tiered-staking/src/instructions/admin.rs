use anchor_lang::prelude::*;

use crate::constants::VAULT_SEED;
use crate::lifecycle;
use crate::state::{Role, StakingVault};

#[derive(Accounts)]
pub struct AdminControl<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.stake_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, StakingVault>,
}

pub fn set_paused_handler(ctx: Context<AdminControl>, paused: bool) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();

    lifecycle::set_paused(&mut ctx.accounts.vault, admin, paused, clock.unix_timestamp)?;

    msg!("Paused: {}", paused);
    Ok(())
}

pub fn set_role_handler(
    ctx: Context<AdminControl>,
    member: Pubkey,
    role: Role,
    granted: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();

    lifecycle::set_role(
        &mut ctx.accounts.vault,
        admin,
        member,
        role,
        granted,
        clock.unix_timestamp,
    )?;

    msg!("Role {:?} for {}: {}", role, member, granted);
    Ok(())
}
