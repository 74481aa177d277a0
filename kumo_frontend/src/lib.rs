mod diagnostic;
mod fs;
mod input;
mod module_name;
mod options;
mod resolver;

pub use kumo_action::{Action, ActionCategory, ActionPolicy, OutputKind, OutputKindSet, classify};

pub use crate::diagnostic::{OutputDiagnostic, Severity, UnusedPathWarning};
pub use crate::fs::{FileSystem, RealFileSystem, is_directory_like};
pub use crate::input::{InputFile, InputFileKind, InputSet};
pub use crate::module_name::{
    FALLBACK_MODULE_NAME, REPL_MODULE_NAME, STDLIB_MODULE_NAME, fallback_module_name,
    is_valid_identifier, resolve_module_name, sanitize_module_name,
};
pub use crate::options::{AuxOutputPaths, FrontendOptions};
pub use crate::resolver::{
    OutputPathResolver, PrincipalLocation, PrincipalOutput, ResolvedOutputs,
    find_unused_aux_paths, resolve_principal,
};
