pub mod health;
pub mod market;
pub mod metals;
pub mod page;
pub mod ws;
