//! ShieldView Console Core
//!
//! Security-log querying, filtering, selection and mock AI analysis for
//! a firewall operations console. Every record and metric originates
//! from an in-memory mock source; there is no real appliance behind
//! this crate.

pub mod config;
pub mod error;
pub mod logic;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult};
