//! Logic Module - Console Engines
//!
//! - `records/` - security log record model
//! - `store/` - in-memory mock data source + dashboard metrics
//! - `filter/` - pure filter predicates over records
//! - `selection/` - per-view selection of record ids
//! - `analysis/` - mock AI analysis workflow + chat transcript
//! - `view/` - single-writer owner of one log table view

pub mod analysis;
pub mod filter;
pub mod records;
pub mod selection;
pub mod store;
pub mod view;
