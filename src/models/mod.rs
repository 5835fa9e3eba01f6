//! Domain models for JDSL.
//!
//! - [`UnitDescriptor`]: one decoded manifest. Immutable once loaded and
//!   discarded after its unit is assembled.
//! - [`Options`]: the run configuration, passed by reference to every stage.
//! - [`UnitPaths`]: the manifest, companion source and output paths derived
//!   from one input.

mod options;
mod paths;
mod unit;

pub use options::*;
pub use paths::*;
pub use unit::*;
