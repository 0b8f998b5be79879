//! State engine for PERT project estimations.
//!
//! A [`Project`] holds lettered milestones, each with numbered tasks carrying
//! three-point estimates. All edits go through [`store::Command`]s; totals,
//! the synthesized management task and the exports are computed on demand
//! from the current value and never cached in it.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod ids;
pub mod management;
pub mod models;
pub mod pert;
pub mod store;

pub use error::SnapshotError;
pub use models::*;
pub use store::{apply, Command, Outcome};
