#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Once;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_stubs::{set_syscall_stubs, SyscallStubs};
use anchor_lang::Event;
use tiered_staking::constants::SECONDS_PER_DAY;
use tiered_staking::custody::TokenCustody;
use tiered_staking::errors::StakingError;
use tiered_staking::lifecycle::{self, Payout};
use tiered_staking::state::{Role, StakeAccount, StakingParams, StakingVault};

pub const DAY: i64 = SECONDS_PER_DAY;

/// 2023-11-14, early in a UTC day
pub const GENESIS: i64 = 1_699_920_000;

/// In-memory token ledger: vault custody plus user wallets.
#[derive(Default)]
pub struct TokenLedger {
    pub custody: u64,
    pub wallets: HashMap<Pubkey, u64>,
    pub fail_transfers: bool,
    /// Withheld from every inbound transfer, like a Token-2022 transfer fee
    pub inbound_fee: u64,
}

impl TokenLedger {
    pub fn bind(&mut self, counterparty: Pubkey) -> BoundCustody<'_> {
        BoundCustody {
            ledger: self,
            counterparty,
        }
    }

    pub fn wallet(&self, who: &Pubkey) -> u64 {
        self.wallets.get(who).copied().unwrap_or(0)
    }
}

pub struct BoundCustody<'a> {
    ledger: &'a mut TokenLedger,
    counterparty: Pubkey,
}

impl TokenCustody for BoundCustody<'_> {
    fn balance(&self) -> u64 {
        self.ledger.custody
    }

    fn transfer_in(&mut self, amount: u64) -> Result<u64> {
        let wallet = self.ledger.wallets.entry(self.counterparty).or_default();
        if self.ledger.fail_transfers || *wallet < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        *wallet -= amount;
        let received = amount.saturating_sub(self.ledger.inbound_fee);
        self.ledger.custody += received;
        Ok(received)
    }

    fn transfer_out(&mut self, amount: u64) -> Result<()> {
        if self.ledger.fail_transfers || self.ledger.custody < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.ledger.custody -= amount;
        *self.ledger.wallets.entry(self.counterparty).or_default() += amount;
        Ok(())
    }
}

/// A vault plus everything around it, driven through `lifecycle`.
pub struct Harness {
    pub vault: StakingVault,
    pub ledger: TokenLedger,
    pub slots: HashMap<Pubkey, StakeAccount>,
    pub admin: Pubkey,
    pub now: i64,
}

impl Harness {
    pub fn new(params: StakingParams) -> Self {
        let admin = Pubkey::new_unique();
        let mut vault = StakingVault::default();
        vault
            .initialize(
                admin,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                params,
                255,
            )
            .unwrap();

        Self {
            vault,
            ledger: TokenLedger::default(),
            slots: HashMap::new(),
            admin,
            now: GENESIS,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StakingParams::default())
    }

    /// New user holding `balance` tokens with a bound ledger slot
    pub fn user(&mut self, balance: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.ledger.wallets.insert(user, balance);

        let mut slot = StakeAccount::default();
        slot.bind(user, Pubkey::new_unique(), 254);
        self.slots.insert(user, slot);
        user
    }

    pub fn fund(&mut self, who: Pubkey, amount: u64) {
        *self.ledger.wallets.entry(who).or_default() += amount;
    }

    pub fn advance(&mut self, secs: i64) {
        self.now += secs;
    }

    pub fn slot(&self, user: &Pubkey) -> &StakeAccount {
        &self.slots[user]
    }

    pub fn grant(&mut self, role: Role, member: Pubkey) {
        lifecycle::set_role(&mut self.vault, self.admin, member, role, true, self.now).unwrap();
    }

    pub fn stake(&mut self, user: Pubkey, amount: u64) -> Result<()> {
        let slot = self.slots.get_mut(&user).unwrap();
        lifecycle::stake(
            &mut self.vault,
            slot,
            user,
            amount,
            self.now,
            &mut self.ledger.bind(user),
        )
    }

    pub fn request_withdrawal(&mut self, user: Pubkey) -> Result<u64> {
        let slot = self.slots.get_mut(&user).unwrap();
        lifecycle::request_withdrawal(&mut self.vault, slot, user, self.now)
    }

    pub fn withdraw(&mut self, user: Pubkey) -> Result<Payout> {
        let slot = self.slots.get_mut(&user).unwrap();
        lifecycle::withdraw(
            &mut self.vault,
            slot,
            user,
            self.now,
            &mut self.ledger.bind(user),
        )
    }

    pub fn claim(&mut self, user: Pubkey) -> Result<u64> {
        let slot = self.slots.get_mut(&user).unwrap();
        lifecycle::claim_rewards(
            &mut self.vault,
            slot,
            user,
            self.now,
            &mut self.ledger.bind(user),
        )
    }

    pub fn emergency_withdraw(&mut self, operator: Pubkey, user: Pubkey) -> Result<Payout> {
        let slot = self.slots.get_mut(&user).unwrap();
        lifecycle::emergency_withdraw(
            &mut self.vault,
            slot,
            operator,
            self.now,
            &mut self.ledger.bind(user),
        )
    }

    pub fn deposit_rewards(&mut self, manager: Pubkey, amount: u64) -> Result<()> {
        lifecycle::deposit_rewards(
            &mut self.vault,
            manager,
            amount,
            self.now,
            &mut self.ledger.bind(manager),
        )
    }

    pub fn withdraw_rewards(&mut self, manager: Pubkey, amount: u64) -> Result<()> {
        lifecycle::withdraw_rewards(
            &mut self.vault,
            manager,
            amount,
            self.now,
            &mut self.ledger.bind(manager),
        )
    }

    /// Admin tops up its wallet and funds the reward pool
    pub fn seed_pool(&mut self, amount: u64) {
        let admin = self.admin;
        self.fund(admin, amount);
        self.deposit_rewards(admin, amount).unwrap();
    }

    /// I1/I2 against the in-memory ledger
    pub fn assert_invariants(&self) {
        let principal: u64 = self
            .slots
            .values()
            .filter_map(|slot| slot.position.map(|p| p.principal))
            .sum();
        assert_eq!(self.vault.total_staked, principal);
        assert!(self.ledger.custody >= self.vault.total_staked + self.vault.reward_pool);
        assert!(!self.vault.locked);
    }
}

thread_local! {
    static EVENT_LOG: RefCell<Vec<Vec<u8>>> = RefCell::new(Vec::new());
}

/// Records `emit!` payloads on the calling test's thread.
struct EventCapture;

impl SyscallStubs for EventCapture {
    fn sol_log_data(&self, data: &[&[u8]]) {
        EVENT_LOG.with(|log| {
            log.borrow_mut()
                .extend(data.iter().map(|field| field.to_vec()))
        });
    }
}

static INSTALL_CAPTURE: Once = Once::new();

/// Start recording events for this test, dropping anything seen so far
pub fn capture_events() {
    INSTALL_CAPTURE.call_once(|| {
        set_syscall_stubs(Box::new(EventCapture));
    });
    EVENT_LOG.with(|log| log.borrow_mut().clear());
}

/// Every recorded event of type `E`, oldest first
pub fn events<E: Event>() -> Vec<E> {
    EVENT_LOG.with(|log| {
        log.borrow()
            .iter()
            .filter(|raw| raw.starts_with(&E::DISCRIMINATOR))
            .map(|raw| E::try_from_slice(&raw[E::DISCRIMINATOR.len()..]).unwrap())
            .collect()
    })
}

pub fn event_count() -> usize {
    EVENT_LOG.with(|log| log.borrow().len())
}

pub fn assert_staking_err<T: Debug>(result: Result<T>, expected: StakingError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(
                err.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                err.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
