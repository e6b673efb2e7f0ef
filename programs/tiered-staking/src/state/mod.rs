pub mod params;
pub mod roles;
pub mod vault;
pub mod stake_account;

pub use params::*;
pub use roles::*;
pub use vault::*;
pub use stake_account::*;
