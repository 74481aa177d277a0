use std::{
    collections::hash_map::Entry,
    ffi::OsString,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use kumo_action::{Action, ActionPolicy, OutputKind, classify};

use crate::{
    AuxOutputPaths, FileSystem, FrontendOptions, InputFile, InputSet, OutputDiagnostic,
    UnusedPathWarning, is_directory_like, module_name,
};

/// Where the principal output of one input goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrincipalLocation {
    Explicit(PathBuf),
    /// A directory and the file name derived for the input inside it.
    InsideDirectory(PathBuf, OsString),
    /// The process-wide default stream.
    Stdout,
    /// Nothing is written.
    Suppressed,
}

impl PrincipalLocation {
    /// The file written to, if any.
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Explicit(path) => Some(path.clone()),
            Self::InsideDirectory(dir, name) => Some(dir.join(name)),
            Self::Stdout | Self::Suppressed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrincipalOutput {
    pub input: PathBuf,
    pub location: PrincipalLocation,
}

impl PrincipalOutput {
    #[inline]
    fn new(input: &InputFile, location: PrincipalLocation) -> Self {
        Self {
            input: input.path.clone(),
            location,
        }
    }
}

/// A configured output path, classified by what it names.
#[derive(Debug, Clone, Copy)]
enum Destination<'a> {
    Stdout,
    Directory(&'a Path),
    File(&'a Path),
}

impl<'a> Destination<'a> {
    /// `None` for an unset (empty) path.
    fn classify(path: &'a Path, fs: &impl FileSystem) -> Option<Self> {
        if path.as_os_str().is_empty() {
            None
        } else if path.as_os_str() == "-" {
            Some(Self::Stdout)
        } else if is_directory_like(path) || fs.is_dir(path) {
            Some(Self::Directory(path))
        } else {
            Some(Self::File(path))
        }
    }

    fn locate(self, input: &InputFile, suffix: Option<&str>) -> PrincipalLocation {
        match self {
            Self::Stdout => PrincipalLocation::Stdout,
            Self::Directory(dir) => {
                PrincipalLocation::InsideDirectory(dir.to_path_buf(), derived_name(input, suffix))
            }
            Self::File(path) => PrincipalLocation::Explicit(path.to_path_buf()),
        }
    }
}

/// The input's file stem plus `suffix`, keeping the stem's exact bytes.
fn derived_name(input: &InputFile, suffix: Option<&str>) -> OsString {
    let mut name = input
        .path()
        .file_stem()
        .filter(|_| !input.is_stdin())
        .map(OsString::from)
        .unwrap_or_else(|| module_name::FALLBACK_MODULE_NAME.into());

    if let Some(suffix) = suffix {
        name.push(".");
        name.push(suffix);
    }

    name
}

/// Fails when two inputs would write the same file, or both write standard output.
fn check_collisions(
    policy: &ActionPolicy,
    outputs: &[PrincipalOutput],
) -> Result<(), OutputDiagnostic> {
    let mut written = FxHashMap::<PathBuf, &Path>::default();

    for output in outputs {
        let target = match &output.location {
            PrincipalLocation::Stdout => PathBuf::from("-"),
            location => match location.path() {
                Some(path) => path,
                None => continue,
            },
        };

        match written.entry(target) {
            Entry::Vacant(entry) => {
                entry.insert(&output.input);
            }
            Entry::Occupied(entry) => {
                return Err(OutputDiagnostic::CollidingOutputs {
                    action: policy.action,
                    path: entry.key().clone(),
                    first: entry.get().to_path_buf(),
                    second: output.input.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Decides where each input's principal output is written.
///
/// Per-input outputs win over `output`. A directory receives one derived file per input,
/// while a file or `-` can only serve a single input. Without any path, textual output of a
/// single input goes to standard output and everything else is suppressed. No two inputs are
/// ever given the same destination.
pub fn resolve_principal(
    policy: &ActionPolicy,
    inputs: &InputSet,
    output: Option<&Path>,
    fs: &impl FileSystem,
) -> Result<Vec<PrincipalOutput>, OutputDiagnostic> {
    if !policy.produces_principal_output {
        return Ok(inputs
            .iter()
            .map(|input| PrincipalOutput::new(input, PrincipalLocation::Suppressed))
            .collect());
    }

    let shared = output.and_then(|path| Destination::classify(path, fs));
    trace!(?shared, "classified principal output path");

    if let Some(Destination::Stdout | Destination::File(_)) = shared {
        let unclaimed = inputs
            .iter()
            .filter(|input| {
                input
                    .output
                    .as_deref()
                    .and_then(|path| Destination::classify(path, fs))
                    .is_none()
            })
            .count();

        if unclaimed > 1 {
            return Err(OutputDiagnostic::ConfigurationInconsistency {
                action: policy.action,
                path: output.map(Path::to_path_buf).unwrap_or_default(),
                inputs: unclaimed,
            });
        }
    }

    let default_stream = policy.principal_output_is_textual && inputs.has_single_input();

    let outputs = inputs
        .iter()
        .map(|input| {
            let own = input
                .output
                .as_deref()
                .and_then(|path| Destination::classify(path, fs));

            let location = match own.or(shared) {
                Some(destination) => destination.locate(input, policy.principal_suffix),
                None if default_stream => PrincipalLocation::Stdout,
                None => PrincipalLocation::Suppressed,
            };
            debug!(input = %input.path.display(), ?location, "resolved principal output");

            PrincipalOutput::new(input, location)
        })
        .collect::<Vec<_>>();

    check_collisions(policy, &outputs)?;

    Ok(outputs)
}

/// Every configured auxiliary path the action cannot produce, in canonical order.
pub fn find_unused_aux_paths(
    policy: &ActionPolicy,
    configured: &AuxOutputPaths,
) -> Vec<UnusedPathWarning> {
    configured
        .iter()
        .filter(|(kind, _)| !policy.can_emit(*kind))
        .map(|(kind, path)| UnusedPathWarning {
            kind,
            path: path.to_path_buf(),
        })
        .collect()
}

/// The outcome of resolving one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub action: Action,
    /// `None` when the name could not be resolved; a diagnostic says why.
    pub module_name: Option<String>,
    /// One entry per input, in input order. Empty when the principal outputs are inconsistent.
    pub principal: Vec<PrincipalOutput>,
    /// Invocation-scoped auxiliary outputs the action will write, in canonical order.
    pub auxiliary: Vec<(OutputKind, PathBuf)>,
    pub diagnostics: Vec<OutputDiagnostic>,
}

impl ResolvedOutputs {
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(OutputDiagnostic::is_error)
    }

    #[inline]
    pub fn errors(&self) -> impl Iterator<Item = &OutputDiagnostic> {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_error())
    }

    #[inline]
    pub fn warnings(&self) -> impl Iterator<Item = &OutputDiagnostic> {
        self.diagnostics.iter().filter(|diagnostic| !diagnostic.is_error())
    }

    pub fn principal_for(&self, input: &Path) -> Option<&PrincipalLocation> {
        self.principal
            .iter()
            .find(|output| output.input == input)
            .map(|output| &output.location)
    }

    #[inline]
    pub fn auxiliary_path(&self, kind: OutputKind) -> Option<&Path> {
        self.auxiliary
            .iter()
            .find(|(aux, _)| *aux == kind)
            .map(|(_, path)| path.as_path())
    }

    /// Every file written on behalf of `input`: its principal output followed by the
    /// auxiliary outputs shared by the whole invocation.
    pub fn for_all_output_paths(&self, input: &Path) -> Vec<PathBuf> {
        self.principal_for(input)
            .and_then(PrincipalLocation::path)
            .into_iter()
            .chain(self.auxiliary.iter().map(|(_, path)| path.clone()))
            .collect()
    }
}

/// Resolves output locations and the module name for one invocation.
#[derive(Debug)]
pub struct OutputPathResolver<'a, F> {
    options: &'a FrontendOptions,
    policy: &'static ActionPolicy,
    fs: F,
}

impl<'a, F: FileSystem> OutputPathResolver<'a, F> {
    #[inline]
    pub fn new(options: &'a FrontendOptions, fs: F) -> Self {
        Self {
            options,
            policy: classify(options.action),
            fs,
        }
    }

    #[inline]
    pub const fn policy(&self) -> &'static ActionPolicy {
        self.policy
    }

    #[inline]
    pub const fn principal_output_identity(&self) -> (Option<&'static str>, bool) {
        self.policy.principal_output_identity()
    }

    #[inline]
    pub fn resolve_principal(&self) -> Result<Vec<PrincipalOutput>, OutputDiagnostic> {
        resolve_principal(
            self.policy,
            &self.options.inputs,
            self.options.output.as_deref(),
            &self.fs,
        )
    }

    #[inline]
    pub fn fallback_module_name(&self) -> String {
        module_name::fallback_module_name(&self.options.inputs, self.policy.is_immediate)
    }

    #[inline]
    pub fn resolve_module_name(&self) -> Result<String, OutputDiagnostic> {
        module_name::resolve_module_name(
            self.options.module_name.as_deref(),
            self.policy,
            &self.options.inputs,
            self.options.parse_stdlib,
        )
    }

    #[inline]
    pub fn find_unused_aux_paths(&self) -> Vec<UnusedPathWarning> {
        find_unused_aux_paths(self.policy, &self.options.aux_outputs)
    }

    /// Runs every resolution step, recording each detected condition exactly once.
    pub fn resolve(&self) -> ResolvedOutputs {
        let action = self.options.action;

        if !self.policy.is_runnable() {
            return ResolvedOutputs {
                action,
                module_name: None,
                principal: vec![],
                auxiliary: vec![],
                diagnostics: vec![OutputDiagnostic::MissingAction],
            };
        }

        let mut diagnostics = vec![];

        let principal = self.resolve_principal().unwrap_or_else(|diagnostic| {
            diagnostics.push(diagnostic);
            vec![]
        });

        let module_name = match self.resolve_module_name() {
            Ok(name) => Some(name),
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                None
            }
        };

        diagnostics.extend(
            self.find_unused_aux_paths()
                .into_iter()
                .map(OutputDiagnostic::from),
        );

        let auxiliary = self
            .options
            .aux_outputs
            .iter()
            .filter(|(kind, _)| self.policy.can_emit(*kind))
            .map(|(kind, path)| (kind, path.to_path_buf()))
            .collect();

        debug!(
            %action,
            module_name = module_name.as_deref().unwrap_or("<unresolved>"),
            diagnostics = diagnostics.len(),
            "resolved frontend outputs"
        );

        ResolvedOutputs {
            action,
            module_name,
            principal,
            auxiliary,
            diagnostics,
        }
    }
}
