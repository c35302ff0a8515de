pub mod contact;
pub mod health_check;

pub use contact::{contact, method_not_allowed, preflight};
pub use health_check::health_check;
