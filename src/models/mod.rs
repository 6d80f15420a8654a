pub mod metals;
pub mod stock;
pub mod summary;
