use std::{
    collections::BTreeMap,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use rustc_hash::FxHasher;
use tracing::warn;

use kumo_action::{Action, OutputKind};

use crate::{FileSystem, InputSet, is_directory_like};

/// Configured auxiliary output paths, keyed by kind. Iterates in canonical [`OutputKind`] order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuxOutputPaths {
    paths: BTreeMap<OutputKind, PathBuf>,
}

impl AuxOutputPaths {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path of an auxiliary output, returning the one it replaces.
    ///
    /// [`OutputKind::PrincipalOutput`] is configured through [`FrontendOptions::output`]; it is
    /// ignored here and nothing is returned.
    pub fn insert(&mut self, kind: OutputKind, path: impl Into<PathBuf>) -> Option<PathBuf> {
        if !kind.is_auxiliary() {
            warn!(%kind, "ignoring non-auxiliary output path");
            return None;
        }

        self.paths.insert(kind, path.into())
    }

    #[inline]
    pub fn with(mut self, kind: OutputKind, path: impl Into<PathBuf>) -> Self {
        self.insert(kind, path);
        self
    }

    /// The configured path of `kind`. Empty paths count as not configured.
    #[inline]
    pub fn get(&self, kind: OutputKind) -> Option<&Path> {
        self.paths
            .get(&kind)
            .map(PathBuf::as_path)
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Non-empty paths in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (OutputKind, &Path)> {
        self.paths
            .iter()
            .map(|(kind, path)| (*kind, path.as_path()))
            .filter(|(_, path)| !path.as_os_str().is_empty())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(OutputKind, PathBuf)> for AuxOutputPaths {
    fn from_iter<I: IntoIterator<Item = (OutputKind, PathBuf)>>(iter: I) -> Self {
        let mut paths = Self::new();
        for (kind, path) in iter {
            paths.insert(kind, path);
        }

        paths
    }
}

/// Everything the configuration collaborator hands to output resolution.
#[derive(Debug, Clone, Default)]
pub struct FrontendOptions {
    pub action: Action,
    pub inputs: InputSet,

    /// Invocation-wide principal output: a file, a directory, or `-` for standard output.
    pub output: Option<PathBuf>,
    pub aux_outputs: AuxOutputPaths,

    pub module_name: Option<String>,
    /// A bridging header to import and make implicitly visible.
    pub implicit_objc_header_path: Option<PathBuf>,

    pub parse_stdlib: bool,
    pub enable_testing: bool,
    pub enable_resilience: bool,
    pub import_underlying_module: bool,
    pub serialize_bridging_header: bool,
}

#[derive(Hash)]
struct PchHashComponents<'a> {
    module_name: Option<&'a str>,
    enable_resilience: bool,
    enable_testing: bool,
    import_underlying_module: bool,
    serialize_bridging_header: bool,
    parse_stdlib: bool,
    implicit_objc_header_path: Option<&'a Path>,
}

impl FrontendOptions {
    #[inline]
    pub fn new(action: Action, inputs: InputSet) -> Self {
        Self {
            action,
            inputs,
            ..Default::default()
        }
    }

    pub fn is_output_file_directory(&self, fs: &impl FileSystem) -> bool {
        self.output
            .as_deref()
            .is_some_and(|output| is_directory_like(output) || fs.is_dir(output))
    }

    /// Hash of every option that decides whether a precompiled bridging header can be reused.
    /// Stable across runs, so it can key an on-disk cache.
    pub fn pch_hash_components(&self) -> u64 {
        let components = PchHashComponents {
            module_name: self.module_name.as_deref(),
            enable_resilience: self.enable_resilience,
            enable_testing: self.enable_testing,
            import_underlying_module: self.import_underlying_module,
            serialize_bridging_header: self.serialize_bridging_header,
            parse_stdlib: self.parse_stdlib,
            implicit_objc_header_path: self.implicit_objc_header_path.as_deref(),
        };

        let mut hasher = FxHasher::default();
        components.hash(&mut hasher);

        hasher.finish()
    }
}
