pub mod cancel_swap_request;
pub mod deposit;
pub mod initialize;
pub mod request_swap;
pub mod swap;
pub mod views;

pub use cancel_swap_request::*;
pub use deposit::*;
pub use initialize::*;
pub use request_swap::*;
pub use swap::*;
pub use views::*;
