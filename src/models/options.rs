use std::path::PathBuf;

/// Where assembled units are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One file per unit at `<root>/<input>.js`, created fresh each time.
    Directory(PathBuf),
    /// Every unit appended, in input order, to a single file.
    Combined(PathBuf),
}

/// Configuration for one transpile run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Root of the git working copy. Inputs are relative to it.
    pub root: PathBuf,
    /// Inputs in processing order. Any extension is stripped.
    pub inputs: Vec<String>,
    pub output: OutputTarget,
    /// Require each manifest's `File` field to equal its own file name.
    pub strict: bool,
    /// Emit the metadata comment block before each stub.
    pub annotate: bool,
}

impl Options {
    pub fn new(root: impl Into<PathBuf>, inputs: Vec<String>, output: OutputTarget) -> Self {
        Self {
            root: root.into(),
            inputs,
            output,
            strict: false,
            annotate: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }
}
