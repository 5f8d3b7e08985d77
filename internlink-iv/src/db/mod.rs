//! Database access for internlink-iv
//!
//! Schema creation lives in `internlink_common::db`; these modules hold the
//! queries the interview service runs against it.

pub mod profiles;
pub mod responses;
pub mod sessions;

pub use internlink_common::db::{init_database, init_memory_database};
