//! Service layer for player saves.
//! - `storage` owns the single JSON save file.
//! - `saves` holds the validation and lookup rules the HTTP layer calls into.

pub mod errors;
pub mod storage;
pub mod saves;
