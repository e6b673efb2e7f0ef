//! Stake lifecycle and reward pool operations.
//!
//! Every operation holds the vault's reentrancy guard for its whole duration
//! and runs checks, then effects, then the custody call. Checks compute the
//! new global [`Totals`] without touching state; if the final custody call
//! fails, the vault counters and ledger slot are put back exactly as they
//! were before the error is returned.

use anchor_lang::prelude::*;

use crate::custody::TokenCustody;
use crate::errors::StakingError;
use crate::events::*;
use crate::guard::ReentrancyGuard;
use crate::rewards;
use crate::state::*;

/// Tokens paid out when a position is closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub principal: u64,
    pub reward: u64,
}

impl Payout {
    pub fn total(&self) -> Result<u64> {
        Ok(self
            .principal
            .checked_add(self.reward)
            .ok_or(StakingError::Overflow)?)
    }
}

/// Pull `amount` into custody; anything short of it is refused so the
/// credited counters always match what custody holds.
fn pull_exact<C: TokenCustody>(custody: &mut C, amount: u64) -> Result<()> {
    let received = custody.transfer_in(amount)?;
    require!(received == amount, StakingError::TransferFeeUnsupported);
    Ok(())
}

/// Open a stake of `amount` and pull it into custody.
pub fn stake<C: TokenCustody>(
    vault: &mut StakingVault,
    account: &mut StakeAccount,
    owner: Pubkey,
    amount: u64,
    now: i64,
    custody: &mut C,
) -> Result<()> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.ensure_not_paused()?;
    account.ensure_owner(&owner)?;
    vault.params.check_stake_amount(amount)?;
    let totals = vault.totals().add_stake(amount)?;

    let totals_before = vault.totals();
    let account_before = account.clone();
    account.open_position(amount, now)?;
    vault.commit(totals);

    if let Err(err) = pull_exact(custody, amount) {
        vault.commit(totals_before);
        *account = account_before;
        return Err(err);
    }

    emit!(Staked {
        user: owner,
        amount,
        total_staked: vault.total_staked,
        timestamp: now,
    });
    Ok(())
}

/// Freeze the reward and start the withdrawal delay. Returns the frozen reward.
pub fn request_withdrawal(
    vault: &mut StakingVault,
    account: &mut StakeAccount,
    owner: Pubkey,
    now: i64,
) -> Result<u64> {
    let vault = ReentrancyGuard::enter(vault)?;
    vault.ensure_not_paused()?;
    account.ensure_owner(&owner)?;

    let mut position = account.active_position()?;
    require!(!position.is_withdrawing, StakingError::AlreadyWithdrawing);
    require!(
        position.held_for(now) >= vault.params.min_staking_period,
        StakingError::LockPeriodActive
    );
    let available_at = now
        .checked_add(vault.params.withdrawal_delay)
        .ok_or(StakingError::Overflow)?;
    let frozen = rewards::accrued_reward(&position, &vault.params, now)?;

    // A frozen exit larger than the daily limit could never be withdrawn.
    // The owner claims first (uncapped) and requests again.
    let exit = position
        .principal
        .checked_add(frozen)
        .ok_or(StakingError::Overflow)?;
    require!(
        exit <= vault.params.daily_withdrawal_limit,
        StakingError::DailyLimitExceeded
    );

    position.freeze(frozen, now);
    account.position = Some(position);

    emit!(WithdrawalRequested {
        user: owner,
        principal: position.principal,
        frozen_reward: frozen,
        available_at,
        timestamp: now,
    });
    Ok(frozen)
}

/// Pay out principal plus frozen reward once the delay has passed.
pub fn withdraw<C: TokenCustody>(
    vault: &mut StakingVault,
    account: &mut StakeAccount,
    owner: Pubkey,
    now: i64,
    custody: &mut C,
) -> Result<Payout> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.ensure_not_paused()?;
    account.ensure_owner(&owner)?;

    let position = account.active_position()?;
    require!(position.is_withdrawing, StakingError::WithdrawalNotRequested);
    let ready_at = position
        .withdrawal_request_time
        .checked_add(vault.params.withdrawal_delay)
        .ok_or(StakingError::Overflow)?;
    require!(now >= ready_at, StakingError::WithdrawalDelayActive);

    let payout = Payout {
        principal: position.principal,
        reward: rewards::accrued_reward(&position, &vault.params, now)?,
    };
    let amount = payout.total()?;
    let window = account.charge_daily(amount, vault.params.daily_withdrawal_limit, now)?;
    let totals = vault
        .totals()
        .pay_reward(payout.reward)?
        .remove_stake(payout.principal)?;
    totals.ensure_solvent(custody.balance(), amount)?;
    let total_withdrawn = account
        .total_withdrawn
        .checked_add(amount)
        .ok_or(StakingError::Overflow)?;

    let totals_before = vault.totals();
    let account_before = account.clone();
    vault.commit(totals);
    account.close_position();
    account.apply_daily(window);
    account.total_withdrawn = total_withdrawn;

    if let Err(err) = custody.transfer_out(amount) {
        vault.commit(totals_before);
        *account = account_before;
        return Err(err);
    }

    emit!(Withdrawn {
        user: owner,
        principal: payout.principal,
        reward: payout.reward,
        daily_withdrawn: window.withdrawn,
        timestamp: now,
    });
    Ok(payout)
}

/// Pay out the reward accrued so far without exiting. Returns the amount paid.
pub fn claim_rewards<C: TokenCustody>(
    vault: &mut StakingVault,
    account: &mut StakeAccount,
    owner: Pubkey,
    now: i64,
    custody: &mut C,
) -> Result<u64> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.ensure_not_paused()?;
    account.ensure_owner(&owner)?;

    let mut position = account.active_position()?;
    require!(!position.is_withdrawing, StakingError::AlreadyWithdrawing);

    let reward = rewards::accrued_reward(&position, &vault.params, now)?;
    require!(reward > 0, StakingError::NoRewardsToClaim);
    let totals = vault.totals().pay_reward(reward)?;
    totals.ensure_solvent(custody.balance(), reward)?;
    let total_claimed = account
        .total_claimed
        .checked_add(reward)
        .ok_or(StakingError::Overflow)?;

    let totals_before = vault.totals();
    let account_before = account.clone();
    position.checkpoint(now);
    vault.commit(totals);
    account.position = Some(position);
    account.total_claimed = total_claimed;

    if let Err(err) = custody.transfer_out(reward) {
        vault.commit(totals_before);
        *account = account_before;
        return Err(err);
    }

    emit!(RewardsClaimed {
        user: owner,
        amount: reward,
        reward_pool: vault.reward_pool,
        timestamp: now,
    });
    Ok(reward)
}

/// Force-exit `account` on behalf of its owner, skipping the delay and the
/// daily cap. Requires the emergency role; works while paused.
pub fn emergency_withdraw<C: TokenCustody>(
    vault: &mut StakingVault,
    account: &mut StakeAccount,
    operator: Pubkey,
    now: i64,
    custody: &mut C,
) -> Result<Payout> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.roles.require(Role::Emergency, &operator)?;

    let position = account.active_position()?;
    let payout = Payout {
        principal: position.principal,
        reward: rewards::accrued_reward(&position, &vault.params, now)?,
    };
    let amount = payout.total()?;
    let totals = vault
        .totals()
        .pay_reward(payout.reward)?
        .remove_stake(payout.principal)?;
    totals.ensure_solvent(custody.balance(), amount)?;
    let total_withdrawn = account
        .total_withdrawn
        .checked_add(amount)
        .ok_or(StakingError::Overflow)?;

    let totals_before = vault.totals();
    let account_before = account.clone();
    vault.commit(totals);
    account.close_position();
    account.total_withdrawn = total_withdrawn;

    if let Err(err) = custody.transfer_out(amount) {
        vault.commit(totals_before);
        *account = account_before;
        return Err(err);
    }

    emit!(EmergencyWithdrawn {
        user: account.owner,
        operator,
        principal: payout.principal,
        reward: payout.reward,
        timestamp: now,
    });
    Ok(payout)
}

/// Fund the reward pool from the manager's tokens.
pub fn deposit_rewards<C: TokenCustody>(
    vault: &mut StakingVault,
    manager: Pubkey,
    amount: u64,
    now: i64,
    custody: &mut C,
) -> Result<()> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.roles.require(Role::RewardManager, &manager)?;
    require!(amount > 0, StakingError::InvalidAmount);
    let totals = vault.totals().credit_pool(amount)?;

    let totals_before = vault.totals();
    vault.commit(totals);

    if let Err(err) = pull_exact(custody, amount) {
        vault.commit(totals_before);
        return Err(err);
    }

    emit!(RewardsDeposited {
        manager,
        amount,
        reward_pool: vault.reward_pool,
        timestamp: now,
    });
    Ok(())
}

/// Drain `amount` of undistributed rewards back to the manager. Principal
/// must stay fully covered by custody afterwards.
pub fn withdraw_rewards<C: TokenCustody>(
    vault: &mut StakingVault,
    manager: Pubkey,
    amount: u64,
    now: i64,
    custody: &mut C,
) -> Result<()> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.roles.require(Role::RewardManager, &manager)?;
    require!(amount > 0, StakingError::InvalidAmount);

    let totals = vault.totals().debit_pool(amount)?;
    let remaining = custody
        .balance()
        .checked_sub(amount)
        .ok_or(StakingError::InsufficientCustody)?;
    require!(
        remaining >= totals.total_staked,
        StakingError::PrincipalNotCovered
    );
    totals.ensure_solvent(custody.balance(), amount)?;

    let totals_before = vault.totals();
    vault.commit(totals);

    if let Err(err) = custody.transfer_out(amount) {
        vault.commit(totals_before);
        return Err(err);
    }

    emit!(RewardsWithdrawn {
        manager,
        amount,
        reward_pool: vault.reward_pool,
        timestamp: now,
    });
    Ok(())
}

pub fn set_paused(vault: &mut StakingVault, admin: Pubkey, paused: bool, now: i64) -> Result<()> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.roles.require(Role::Admin, &admin)?;
    vault.paused = paused;

    emit!(PauseUpdated {
        admin,
        paused,
        timestamp: now,
    });
    Ok(())
}

pub fn set_role(
    vault: &mut StakingVault,
    admin: Pubkey,
    member: Pubkey,
    role: Role,
    granted: bool,
    now: i64,
) -> Result<()> {
    let mut vault = ReentrancyGuard::enter(vault)?;
    vault.roles.require(Role::Admin, &admin)?;

    if granted {
        vault.roles.grant(role, member)?;
    } else {
        require!(
            !(role == Role::Admin && member == admin),
            StakingError::SelfRevocation
        );
        vault.roles.revoke(role, &member);
    }

    emit!(RoleUpdated {
        admin,
        member,
        role: role as u8,
        granted,
        timestamp: now,
    });
    Ok(())
}
