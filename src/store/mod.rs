pub mod catalog;
pub mod user_store;

pub use catalog::Catalog;
pub use user_store::UserStore;
