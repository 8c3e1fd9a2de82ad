// mesa/app/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod order_handlers;
pub mod restaurant_handlers;
