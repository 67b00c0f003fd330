pub mod catalog;
pub mod reports;

pub use catalog::Catalog;
