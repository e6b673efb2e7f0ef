pub mod initialize;
pub mod stake;
pub mod request_withdrawal;
pub mod withdraw;
pub mod claim;
pub mod emergency_withdraw;
pub mod deposit_rewards;
pub mod withdraw_rewards;
pub mod admin;

pub use initialize::*;
pub use stake::*;
pub use request_withdrawal::*;
pub use withdraw::*;
pub use claim::*;
pub use emergency_withdraw::*;
pub use deposit_rewards::*;
pub use withdraw_rewards::*;
pub use admin::*;
