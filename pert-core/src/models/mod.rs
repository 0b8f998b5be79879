//! Domain models for PERT estimations.
//!
//! # Core Concepts
//!
//! - [`Project`]: Root aggregate holding client/project names, the ordered
//!   milestones and free-text remarks. Remarks never leave the snapshot.
//! - [`Milestone`]: Lettered group of tasks (`A`, `B`, …). Disabling a
//!   milestone removes all of its tasks from every total.
//! - [`Task`]: Unit of work with a three-point [`Estimates`] record, optional
//!   tests/definition of done and a positional list of [`QAndAEntry`].
//!
//! The JSON shape of these types is the persisted snapshot format, so field
//! names are camelCase on the wire.

mod project;
mod task;

pub use project::*;
pub use task::*;
