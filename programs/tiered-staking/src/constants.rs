//! Seeds, time units and the default deployment parameters.

/// Vault PDA: ["staking-vault", mint]
pub const VAULT_SEED: &[u8] = b"staking-vault";

/// Custody token account PDA: ["vault-tokens", vault]
pub const VAULT_TOKENS_SEED: &[u8] = b"vault-tokens";

/// Per-owner ledger slot PDA: ["stake-account", vault, owner]
pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake-account";

pub const SECONDS_PER_DAY: i64 = 86_400;

/// 365-day year used by the accrual formula
pub const SECONDS_PER_YEAR: u128 = 365 * 86_400;

/// Rates are tenths of a percent, so 1000 == 100%
pub const RATE_DENOMINATOR: u128 = 1_000;

/// Highest annual rate a deployment may configure (100%)
pub const MAX_RATE_TENTHS: u16 = 1_000;

/// Number of duration tiers above the base rate
pub const RATE_TIER_COUNT: usize = 3;

/// Fixed capacity of the role table
pub const MAX_ROLE_MEMBERS: usize = 8;

/// Token decimals assumed by the default amounts below
pub const DEFAULT_DECIMALS: u8 = 9;

const ONE_TOKEN: u64 = 10u64.pow(DEFAULT_DECIMALS as u32);

pub const DEFAULT_MIN_STAKE_AMOUNT: u64 = 100 * ONE_TOKEN;
pub const DEFAULT_MAX_STAKE_AMOUNT: u64 = 1_000_000 * ONE_TOKEN;
pub const DEFAULT_MIN_STAKING_PERIOD: i64 = 30 * SECONDS_PER_DAY;
pub const DEFAULT_WITHDRAWAL_DELAY: i64 = 7 * SECONDS_PER_DAY;

/// Per-account payout ceiling per UTC day. Must be at least the maximum stake;
/// an exit whose frozen reward pushes it past this is refused at request time.
pub const DEFAULT_DAILY_WITHDRAWAL_LIMIT: u64 = 1_250_000 * ONE_TOKEN;

pub const DEFAULT_BASE_RATE_TENTHS: u16 = 109;

/// (minimum held duration, rate) from the longest tier down
pub const DEFAULT_RATE_TIERS: [(i64, u16); RATE_TIER_COUNT] = [
    (365 * SECONDS_PER_DAY, 189),
    (180 * SECONDS_PER_DAY, 149),
    (90 * SECONDS_PER_DAY, 129),
];
