use std::path::PathBuf;

use kumo_action::{Action, OutputKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// An auxiliary path that was configured for an action unable to produce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnusedPathWarning {
    pub kind: OutputKind,
    pub path: PathBuf,
}

impl std::fmt::Display for UnusedPathWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ignoring `{} {}`: the requested action does not produce a {}",
            self.kind.flag(),
            self.path.display(),
            self.kind.description(),
        )
    }
}

/// A condition detected while resolving outputs. Each one is reported exactly once; whether
/// it stops the compilation is up to the caller, guided by [`OutputDiagnostic::severity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum OutputDiagnostic {
    #[error("no frontend action was requested")]
    MissingAction,
    #[error(
        "cannot write {inputs} outputs of `{action}` to the single destination `{}`; pass a directory or one output per input",
        .path.display()
    )]
    ConfigurationInconsistency {
        action: Action,
        path: PathBuf,
        inputs: usize,
    },
    #[error(
        "`{}` and `{}` would both write the `{action}` output `{}`",
        .first.display(),
        .second.display(),
        .path.display()
    )]
    CollidingOutputs {
        action: Action,
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{0}")]
    UnusedOutputOption(UnusedPathWarning),
    #[error("`{action}` with {inputs} inputs needs an explicit module name")]
    UnresolvableModuleName { action: Action, inputs: usize },
    #[error("module name `{name}` is not a valid identifier, as `{action}` requires")]
    InvalidModuleName { name: String, action: Action },
}

impl OutputDiagnostic {
    #[inline]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnusedOutputOption(_) => Severity::Warning,
            Self::MissingAction
            | Self::ConfigurationInconsistency { .. }
            | Self::CollidingOutputs { .. }
            | Self::UnresolvableModuleName { .. }
            | Self::InvalidModuleName { .. } => Severity::Error,
        }
    }

    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity(), Severity::Error)
    }
}

impl From<UnusedPathWarning> for OutputDiagnostic {
    #[inline]
    fn from(warning: UnusedPathWarning) -> Self {
        Self::UnusedOutputOption(warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_path_message() {
        let diagnostic = OutputDiagnostic::from(UnusedPathWarning {
            kind: OutputKind::DependenciesFile,
            path: "main.d".into(),
        });

        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert_eq!(
            diagnostic.to_string(),
            "ignoring `--emit-dependencies-path main.d`: the requested action does not produce a dependencies file"
        );
    }

    #[test]
    fn test_errors() {
        let diagnostic = OutputDiagnostic::ConfigurationInconsistency {
            action: Action::EmitObject,
            path: "out.o".into(),
            inputs: 2,
        };

        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.to_string(),
            "cannot write 2 outputs of `emit-object` to the single destination `out.o`; pass a directory or one output per input"
        );
        assert!(OutputDiagnostic::MissingAction.is_error());
    }

    #[test]
    fn test_colliding_outputs_message() {
        let diagnostic = OutputDiagnostic::CollidingOutputs {
            action: Action::EmitObject,
            path: "out/a.o".into(),
            first: "src/a.swift".into(),
            second: "lib/a.swift".into(),
        };

        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.to_string(),
            "`src/a.swift` and `lib/a.swift` would both write the `emit-object` output `out/a.o`"
        );
    }
}
