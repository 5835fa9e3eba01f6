//! Command-line surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::models::{Options, OutputTarget};
use crate::runner::DEFAULT_INTERPRETER;

const RUN_OUTPUT_FILE: &str = "main.js";

#[derive(Debug, Parser)]
#[command(name = "jdsl")]
#[command(about = "Assemble JavaScript classes from their own git history", version)]
pub struct Cli {
    /// Input files to transpile (extension optional)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Write every unit into this single file instead
    #[arg(short = 'f', long)]
    pub outfile: Option<PathBuf>,

    /// Run the transpiled code
    #[arg(short, long)]
    pub run: bool,

    /// Require each manifest to declare its own file name
    #[arg(long)]
    pub strict: bool,

    /// Enable annotation comments
    #[arg(long)]
    pub annotate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Root of the git working copy (defaults to the current directory)
    #[arg(long, env = "JDSL_ROOT")]
    pub root: Option<PathBuf>,

    /// Interpreter used by --run
    #[arg(long, env = "JDSL_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    pub interpreter: String,
}

/// What the binary should do after parsing arguments.
#[derive(Debug, Clone)]
pub struct Plan {
    pub options: Options,
    /// Interpreter and script to run after a successful transpile.
    pub run: Option<(String, PathBuf)>,
}

impl Cli {
    /// Resolve arguments into run options.
    ///
    /// Output precedence: `--run` (combined file in a fresh temp directory),
    /// then `--outfile`, then `--output`.
    pub fn into_plan(self) -> Result<Plan> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("determining current directory")?,
        };

        let output = if self.run {
            let dir = tempfile::Builder::new()
                .prefix("jdsl-run")
                .tempdir()
                .context("creating run directory")?
                .keep();
            OutputTarget::Combined(dir.join(RUN_OUTPUT_FILE))
        } else if let Some(outfile) = self.outfile.filter(|p| !p.as_os_str().is_empty()) {
            OutputTarget::Combined(outfile)
        } else {
            OutputTarget::Directory(self.output)
        };

        let run = match (&output, self.run) {
            (OutputTarget::Combined(script), true) => Some((self.interpreter, script.clone())),
            _ => None,
        };

        let options = Options::new(root, self.inputs, output)
            .strict(self.strict)
            .annotate(self.annotate);

        Ok(Plan { options, run })
    }
}
