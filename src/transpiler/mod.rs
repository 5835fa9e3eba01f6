//! Orchestration of a transpile run.
//!
//! Inputs are processed strictly in order, one at a time. Before each unit
//! the cancellation signal is checked; the first error from any unit ends
//! the run. Output is either one file per unit or a single combined file
//! opened once for the whole run.

mod assemble;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use assemble::{assemble, render_header, render_stub, FORMAT_MARKER};

use crate::cancel::CancelSignal;
use crate::error::{Error, Result, UnitError};
use crate::history::{GitHistory, HistoryStore};
use crate::models::{Options, OutputTarget, UnitDescriptor, UnitPaths};

/// Drives the assembly of every input in [`Options`] against one history store.
pub struct Transpiler<H> {
    history: H,
}

impl Transpiler<GitHistory> {
    /// Transpiler reading history from the git repository at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self::new(GitHistory::open(root)?))
    }
}

impl<H: HistoryStore> Transpiler<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// Assemble every input in `opts.inputs`, stopping at the first error or
    /// when `cancel` fires between units.
    pub fn transpile(&self, opts: &Options, cancel: &CancelSignal) -> Result<()> {
        tracing::info!(
            inputs = opts.inputs.len(),
            strict = opts.strict,
            annotate = opts.annotate,
            "transpiling into {:?}",
            opts.output
        );

        match &opts.output {
            OutputTarget::Combined(path) => {
                create_parent(path)?;
                let file = File::create(path).map_err(|source| Error::Output {
                    path: path.clone(),
                    source,
                })?;
                let mut sink = BufWriter::new(file);
                self.process_all(
                    opts,
                    cancel,
                    &mut Destination::Shared {
                        sink: &mut sink,
                        path,
                    },
                )?;
                sink.flush().map_err(|source| Error::Output {
                    path: path.clone(),
                    source,
                })?;
            }
            OutputTarget::Directory(root) => {
                fs::create_dir_all(root).map_err(|source| Error::Output {
                    path: root.clone(),
                    source,
                })?;
                self.process_all(opts, cancel, &mut Destination::Directory(root))?;
            }
        }

        tracing::info!(units = opts.inputs.len(), "transpile complete");
        Ok(())
    }

    fn process_all(
        &self,
        opts: &Options,
        cancel: &CancelSignal,
        destination: &mut Destination<'_>,
    ) -> Result<()> {
        for input in &opts.inputs {
            if let Some(reason) = cancel.reason() {
                tracing::warn!("stopping before {}: {}", input, reason);
                return Err(Error::Cancelled { reason });
            }

            self.process_input(opts, input, destination)
                .map_err(|source| Error::Unit {
                    input: input.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    fn process_input(
        &self,
        opts: &Options,
        input: &str,
        destination: &mut Destination<'_>,
    ) -> std::result::Result<(), UnitError> {
        let paths = UnitPaths::derive(&opts.root, input)?;
        let unit = UnitDescriptor::load(&opts.root.join(&paths.manifest))?;

        if opts.strict {
            unit.validate_name(&paths.manifest_file_name())?;
        }

        match destination {
            Destination::Shared { sink, path } => {
                assemble(&unit, &paths.source, &self.history, opts.annotate, &mut **sink)?;
                sink.flush().map_err(|source| write_error(path, source))?;
            }
            Destination::Directory(root) => {
                let output = paths.output_in(root);
                if let Some(parent) = output.parent() {
                    fs::create_dir_all(parent).map_err(|source| write_error(parent, source))?;
                }
                let file = File::create(&output).map_err(|source| write_error(&output, source))?;
                let mut sink = BufWriter::new(file);
                assemble(&unit, &paths.source, &self.history, opts.annotate, &mut sink)?;
                sink.flush().map_err(|source| write_error(&output, source))?;
            }
        }

        tracing::debug!(
            class = %unit.class,
            revisions = unit.functions.len(),
            "assembled {}",
            paths.source.display()
        );
        Ok(())
    }
}

/// Where the unit being processed is written.
enum Destination<'a> {
    /// The combined sink, opened once for the run, and its path.
    Shared {
        sink: &'a mut dyn Write,
        path: &'a Path,
    },
    /// A fresh file per unit under this directory.
    Directory(&'a Path),
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| Error::Output {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn write_error(path: &Path, source: std::io::Error) -> UnitError {
    UnitError::Write {
        target: path.display().to_string(),
        source,
    }
}
