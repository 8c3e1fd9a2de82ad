// mesa/app/src/services/mod.rs

pub mod cart_sessions;
pub mod checkout;
pub mod hosted_checkout;
pub mod orders;
