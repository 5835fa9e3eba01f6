//! Assembly of a single unit into a sink.
//!
//! Output layout:
//! ```text
//! // JDSL 1.0                 ┐
//! // File: athena.json        │
//! // Class: Athena            │ only with `annotate`
//! // Author: John Doe         │
//! // Purpose: Entry point     │
//!                             ┘
//! function Athena() {}
//! <athena.js at Functions[0]><athena.js at Functions[1]>...
//! ```
//! Revision contents are copied byte-for-byte with nothing between them.

use std::io::{self, Write};
use std::path::Path;

use crate::error::UnitError;
use crate::history::HistoryStore;
use crate::models::UnitDescriptor;

pub const FORMAT_MARKER: &str = "// JDSL 1.0";

/// Render the annotation block, including its trailing blank line.
pub fn render_header(unit: &UnitDescriptor) -> String {
    format!(
        "{}\n// File: {}\n// Class: {}\n// Author: {}\n// Purpose: {}\n\n",
        FORMAT_MARKER, unit.file, unit.class, unit.author, unit.purpose
    )
}

/// Render the stub declaration anchoring everything appended after it.
pub fn render_stub(unit: &UnitDescriptor) -> String {
    format!("function {}() {{}}\n", unit.class)
}

/// Write one unit to `sink`: optional header, stub, then the content of
/// `source` at each revision in `unit.functions`, in order.
///
/// Stops at the first failure and leaves whatever was already written on the
/// sink. The sink is neither flushed nor closed here.
pub fn assemble<H, W>(
    unit: &UnitDescriptor,
    source: &Path,
    history: &H,
    annotate: bool,
    sink: &mut W,
) -> Result<(), UnitError>
where
    H: HistoryStore + ?Sized,
    W: Write + ?Sized,
{
    if annotate {
        sink.write_all(render_header(unit).as_bytes())
            .map_err(|e| write_error("annotation", e))?;
    }
    sink.write_all(render_stub(unit).as_bytes())
        .map_err(|e| write_error("class definition", e))?;

    for revision in &unit.functions {
        tracing::debug!("reading {} at {}", source.display(), revision);

        let mut reader = history.resolve(revision, source)?;
        let copied = io::copy(&mut reader, sink).map_err(|e| {
            write_error(
                format!("contents of {} at {}", source.display(), revision),
                e,
            )
        })?;

        tracing::trace!(bytes = copied, "copied {} at {}", source.display(), revision);
    }

    Ok(())
}

fn write_error(target: impl Into<String>, source: io::Error) -> UnitError {
    UnitError::Write {
        target: target.into(),
        source,
    }
}
