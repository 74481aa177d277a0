use std::path::{Path, PathBuf};

/// What the inputs of an invocation contain. Shared by every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFileKind {
    /// Nothing to compile, e.g. the REPL.
    None,
    #[default]
    Source,
    /// Inputs are parsed as the standard library itself.
    SourceLibrary,
    SIL,
    LLVMIr,
    /// Previously emitted modules, e.g. for merging.
    Module,
}

impl InputFileKind {
    #[inline]
    pub const fn is_source(self) -> bool {
        matches!(self, Self::Source | Self::SourceLibrary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFile {
    pub path: PathBuf,
    /// Principal output path for this input only, overriding the invocation-wide one.
    pub output: Option<PathBuf>,
}

impl InputFile {
    #[inline]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output: None,
        }
    }

    #[inline]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `-` reads the input from standard input.
    #[inline]
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

/// The ordered inputs of one invocation. Never mutated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSet {
    files: Vec<InputFile>,
    kind: InputFileKind,
}

impl InputSet {
    #[inline]
    pub fn new(kind: InputFileKind) -> Self {
        Self {
            files: vec![],
            kind,
        }
    }

    #[inline]
    pub fn push(&mut self, file: InputFile) {
        self.files.push(file);
    }

    #[inline]
    pub fn with(mut self, file: InputFile) -> Self {
        self.push(file);
        self
    }

    #[inline]
    pub const fn kind(&self) -> InputFileKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[inline]
    pub fn has_single_input(&self) -> bool {
        self.files.len() == 1
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, InputFile> {
        self.files.iter()
    }

    #[inline]
    pub fn first(&self) -> Option<&InputFile> {
        self.files.first()
    }

    #[inline]
    pub fn is_compiling_exactly_one_source_file(&self) -> bool {
        self.kind.is_source() && self.has_single_input()
    }
}

impl<'a> IntoIterator for &'a InputSet {
    type Item = &'a InputFile;
    type IntoIter = std::slice::Iter<'a, InputFile>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl FromIterator<InputFile> for InputSet {
    fn from_iter<I: IntoIterator<Item = InputFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
            kind: InputFileKind::default(),
        }
    }
}
