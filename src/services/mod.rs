pub mod eastmoney;
pub mod market;
pub mod metals;
pub mod poller;
