use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Stake amount is outside the allowed range")]
    InvalidAmount,

    #[msg("Account already has an active stake")]
    AlreadyStaked,

    #[msg("No active stake for this account")]
    NoActiveStake,

    #[msg("Withdrawal already requested")]
    AlreadyWithdrawing,

    #[msg("Must request withdrawal first")]
    WithdrawalNotRequested,

    #[msg("No rewards to claim")]
    NoRewardsToClaim,

    #[msg("Invalid staking parameters")]
    InvalidParameters,

    #[msg("Signer does not own this stake account")]
    NotStakeOwner,

    #[msg("Token account mint does not match the vault")]
    InvalidMint,

    #[msg("Mint withholds a fee on transfer")]
    TransferFeeUnsupported,

    #[msg("Role table is full")]
    RoleTableFull,

    #[msg("Admin cannot revoke its own admin role")]
    SelfRevocation,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("System is paused")]
    SystemPaused,

    #[msg("Minimum staking period has not passed")]
    LockPeriodActive,

    #[msg("Withdrawal delay has not passed")]
    WithdrawalDelayActive,

    #[msg("Insufficient rewards in pool")]
    InsufficientRewardPool,

    #[msg("Insufficient custodial balance")]
    InsufficientCustody,

    #[msg("Staked principal would no longer be covered")]
    PrincipalNotCovered,

    #[msg("Custody would not cover principal plus reward pool")]
    InsolventVault,

    #[msg("Daily withdrawal limit exceeded")]
    DailyLimitExceeded,

    #[msg("Reentrant call rejected")]
    ReentrantCall,

    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Coarse failure classes callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Paused,
    Temporal,
    Solvency,
    CapExceeded,
    Reentrancy,
    Arithmetic,
}

impl StakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StakingError::InvalidAmount
            | StakingError::AlreadyStaked
            | StakingError::NoActiveStake
            | StakingError::AlreadyWithdrawing
            | StakingError::WithdrawalNotRequested
            | StakingError::NoRewardsToClaim
            | StakingError::InvalidParameters
            | StakingError::NotStakeOwner
            | StakingError::InvalidMint
            | StakingError::TransferFeeUnsupported
            | StakingError::RoleTableFull
            | StakingError::SelfRevocation => ErrorKind::Validation,
            StakingError::Unauthorized => ErrorKind::Authorization,
            StakingError::SystemPaused => ErrorKind::Paused,
            StakingError::LockPeriodActive | StakingError::WithdrawalDelayActive => {
                ErrorKind::Temporal
            }
            StakingError::InsufficientRewardPool
            | StakingError::InsufficientCustody
            | StakingError::PrincipalNotCovered
            | StakingError::InsolventVault => ErrorKind::Solvency,
            StakingError::DailyLimitExceeded => ErrorKind::CapExceeded,
            StakingError::ReentrantCall => ErrorKind::Reentrancy,
            StakingError::Overflow => ErrorKind::Arithmetic,
        }
    }
}
