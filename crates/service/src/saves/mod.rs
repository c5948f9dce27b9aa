//! Player save records: the store seam and the save/load rules.

pub mod domain;
pub mod store;
pub mod service;

pub use domain::SaveRecord;
pub use service::SaveService;
pub use store::SaveStore;
