pub mod confidential_balance;
pub mod swap_authorization;
pub mod swap_config;

pub use confidential_balance::*;
pub use swap_authorization::*;
pub use swap_config::*;
