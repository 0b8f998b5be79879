//! PERT estimation tool: snapshot storage, configuration, the single-writer
//! session, a local HTTP API and the `pert` command line, all built on the
//! `pert_core` state engine.

pub mod api;
pub mod cli;
pub mod config;
pub mod render;
pub mod session;
pub mod snapshot;
