//! `rollcall-recon`: roster reconciliation engine.
//!
//! Pure engine crate: receives two pre-loaded tables, returns the added and
//! removed rows. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod table;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ReconInput, ReconResult, Side};
pub use table::{CellValue, Table};
