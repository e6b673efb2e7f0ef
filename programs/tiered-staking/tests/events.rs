mod common;

use common::*;
use tiered_staking::errors::StakingError;
use tiered_staking::events::*;
use tiered_staking::state::Role;

const TOKEN: u64 = 1_000_000_000;
const PRINCIPAL: u64 = 365 * TOKEN;
const POOL: u64 = 1_000 * TOKEN;

#[test]
fn test_round_trip_audit_trail() {
    capture_events();
    let mut h = Harness::with_defaults();
    h.seed_pool(POOL);
    let user = h.user(PRINCIPAL);
    let staked_at = h.now;
    h.stake(user, PRINCIPAL).unwrap();

    h.advance(90 * DAY);
    let claimed = h.claim(user).unwrap();
    h.advance(10 * DAY);
    let requested_at = h.now;
    let frozen = h.request_withdrawal(user).unwrap();
    h.advance(7 * DAY);
    h.withdraw(user).unwrap();

    let deposited = events::<RewardsDeposited>();
    assert_eq!(deposited.len(), 1);
    assert_eq!(deposited[0].manager, h.admin);
    assert_eq!(deposited[0].amount, POOL);
    assert_eq!(deposited[0].reward_pool, POOL);

    let staked = events::<Staked>();
    assert_eq!(staked.len(), 1);
    assert_eq!(staked[0].user, user);
    assert_eq!(staked[0].amount, PRINCIPAL);
    assert_eq!(staked[0].total_staked, PRINCIPAL);
    assert_eq!(staked[0].timestamp, staked_at);

    let claims = events::<RewardsClaimed>();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].amount, claimed);
    assert_eq!(claims[0].reward_pool, POOL - claimed);

    let requests = events::<WithdrawalRequested>();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].principal, PRINCIPAL);
    assert_eq!(requests[0].frozen_reward, frozen);
    assert_eq!(requests[0].available_at, requested_at + 7 * DAY);

    let exits = events::<Withdrawn>();
    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].user, user);
    assert_eq!(exits[0].principal, PRINCIPAL);
    assert_eq!(exits[0].reward, frozen);
    assert_eq!(exits[0].daily_withdrawn, PRINCIPAL + frozen);
    assert_eq!(exits[0].timestamp, h.now);
}

#[test]
fn test_operator_actions_are_recorded() {
    capture_events();
    let mut h = Harness::with_defaults();
    h.seed_pool(POOL);
    let operator = h.user(0);
    h.grant(Role::Emergency, operator);
    let user = h.user(PRINCIPAL);
    h.stake(user, PRINCIPAL).unwrap();
    h.advance(DAY);

    let admin = h.admin;
    h.emergency_withdraw(operator, user).unwrap();
    h.withdraw_rewards(admin, TOKEN).unwrap();

    let roles = events::<RoleUpdated>();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].member, operator);
    assert_eq!(roles[0].role, Role::Emergency as u8);
    assert!(roles[0].granted);

    let forced = events::<EmergencyWithdrawn>();
    assert_eq!(forced.len(), 1);
    assert_eq!(forced[0].user, user);
    assert_eq!(forced[0].operator, operator);
    assert_eq!(forced[0].principal, PRINCIPAL);
    assert_eq!(forced[0].reward, 0);

    let drains = events::<RewardsWithdrawn>();
    assert_eq!(drains.len(), 1);
    assert_eq!(drains[0].amount, TOKEN);
    assert_eq!(drains[0].reward_pool, POOL - TOKEN);
}

#[test]
fn test_failed_operations_emit_nothing() {
    capture_events();
    let mut h = Harness::with_defaults();
    let user = h.user(PRINCIPAL);
    let before = event_count();

    assert_staking_err(h.stake(user, 0), StakingError::InvalidAmount);
    assert_staking_err(h.claim(user), StakingError::NoActiveStake);
    h.ledger.fail_transfers = true;
    assert!(h.stake(user, PRINCIPAL).is_err());

    assert_eq!(event_count(), before);
    assert!(events::<Staked>().is_empty());
}
