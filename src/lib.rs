//! JDSL: assembles a generated source file from pieces of a tracked file's
//! git history, guided by a small JSON manifest per unit.
//!
//! - [`models`]: manifest ([`models::UnitDescriptor`]) and run [`models::Options`].
//! - [`history`]: the [`history::HistoryStore`] capability and its git and in-memory backends.
//! - [`transpiler`]: the assembly engine and the orchestrator that drives it.
//! - [`cancel`]: cooperative cancellation checked between units.

pub mod cancel;
pub mod cli;
pub mod error;
pub mod history;
pub mod models;
pub mod runner;
pub mod transpiler;

pub use error::{Error, Result};
