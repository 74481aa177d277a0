use std::path::PathBuf;

use kumo_action::{Action, OutputKind};
use kumo_frontend::{AuxOutputPaths, FrontendOptions, InputFile, InputFileKind, InputSet};

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Plans the outputs of a `kumo` frontend invocation.")]
pub struct Args {
    #[arg(help = "Input files; `-` reads from standard input")]
    pub inputs: Vec<PathBuf>,
    #[arg(value_enum, short, long, default_value = "emit-object")]
    pub action: ActionArg,
    #[arg(value_enum, long, default_value = "source", help = "What the inputs contain")]
    pub input_kind: InputKindArg,

    #[arg(
        short,
        long,
        help = "Output file or directory; `-` writes to standard output"
    )]
    pub output: Option<PathBuf>,
    #[arg(
        long = "primary-output",
        value_name = "PATH",
        help = "Output of a single input, matched to inputs in order"
    )]
    pub primary_outputs: Vec<PathBuf>,

    #[arg(long, help = "Name of the module being built")]
    pub module_name: Option<String>,
    #[arg(long, help = "Bridging header to import implicitly")]
    pub import_objc_header: Option<PathBuf>,

    #[arg(long)]
    pub emit_module_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_module_doc_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_objc_header_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_dependencies_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_reference_dependencies_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_loaded_module_trace_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_tbd_path: Option<PathBuf>,
    #[arg(long)]
    pub emit_fixits_path: Option<PathBuf>,
    #[arg(long)]
    pub serialize_diagnostics_path: Option<PathBuf>,
    #[arg(long)]
    pub group_info_path: Option<PathBuf>,
    #[arg(long)]
    pub dump_api_path: Option<PathBuf>,

    #[arg(long, help = "Parse the inputs as the standard library")]
    pub parse_stdlib: bool,
    #[arg(long)]
    pub enable_testing: bool,
    #[arg(long)]
    pub enable_resilience: bool,
    #[arg(long)]
    pub import_underlying_module: bool,
    #[arg(long)]
    pub serialize_bridging_header: bool,

    #[arg(long, help = "Print the time taken by each phase")]
    pub debug_time_compilation: bool,
    #[arg(long, help = "Print statistics upon termination")]
    pub print_stats: bool,
}

/// Process-wide debugging toggles. Kept apart from [`FrontendOptions`] since resolution
/// never looks at them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugSettings {
    pub time_compilation: bool,
    pub print_stats: bool,
}

impl Args {
    pub fn into_options(self) -> miette::Result<(FrontendOptions, DebugSettings)> {
        if self.primary_outputs.len() > self.inputs.len() {
            miette::bail!(
                "{} primary outputs were given for {} inputs",
                self.primary_outputs.len(),
                self.inputs.len()
            );
        }

        let debug = DebugSettings {
            time_compilation: self.debug_time_compilation,
            print_stats: self.print_stats,
        };

        let mut primary_outputs = self.primary_outputs.into_iter();
        let inputs = self
            .inputs
            .into_iter()
            .map(|path| InputFile {
                path,
                output: primary_outputs.next(),
            })
            .fold(InputSet::new(self.input_kind.into()), InputSet::with);

        let aux_outputs = [
            (OutputKind::Module, self.emit_module_path),
            (OutputKind::ModuleDoc, self.emit_module_doc_path),
            (OutputKind::ObjCHeader, self.emit_objc_header_path),
            (OutputKind::DependenciesFile, self.emit_dependencies_path),
            (
                OutputKind::ReferenceDependenciesFile,
                self.emit_reference_dependencies_path,
            ),
            (OutputKind::LoadedModuleTrace, self.emit_loaded_module_trace_path),
            (OutputKind::TBD, self.emit_tbd_path),
            (OutputKind::Fixits, self.emit_fixits_path),
            (OutputKind::SerializedDiagnostics, self.serialize_diagnostics_path),
            (OutputKind::GroupInfo, self.group_info_path),
            (OutputKind::DumpAPI, self.dump_api_path),
        ]
        .into_iter()
        .filter_map(|(kind, path)| Some((kind, path?)))
        .collect::<AuxOutputPaths>();

        let options = FrontendOptions {
            action: self.action.into(),
            inputs,
            output: self.output,
            aux_outputs,
            module_name: self.module_name,
            implicit_objc_header_path: self.import_objc_header,
            parse_stdlib: self.parse_stdlib,
            enable_testing: self.enable_testing,
            enable_resilience: self.enable_resilience,
            import_underlying_module: self.import_underlying_module,
            serialize_bridging_header: self.serialize_bridging_header,
        };

        Ok((options, debug))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, clap::ValueEnum)]
pub enum ActionArg {
    #[value(help = "Parse only")]
    Parse,
    #[value(help = "Parse and dump the AST")]
    DumpParse,
    #[value(help = "Parse and dump the interface token hash")]
    DumpInterfaceHash,
    #[value(help = "Parse and dump the syntax tree as JSON")]
    EmitSyntax,
    #[value(help = "Parse and dump scope maps")]
    DumpScopeMaps,
    #[value(help = "Parse and type-check only")]
    Typecheck,
    #[value(help = "Type-check and dump the AST")]
    DumpAst,
    #[value(help = "Type-check and pretty-print the AST")]
    PrintAst,
    #[value(help = "Type-check and dump the type refinement contexts")]
    DumpTypeRefinementContexts,
    #[value(help = "Emit the modules imported by this one")]
    EmitImportedModules,
    #[value(help = "Emit a precompiled bridging header")]
    EmitPch,
    #[value(help = "Emit raw SIL")]
    EmitSilgen,
    #[value(help = "Emit canonical SIL")]
    EmitSil,
    #[value(help = "Emit serialized AST and raw SIL")]
    EmitSibgen,
    #[value(help = "Emit serialized AST and canonical SIL")]
    EmitSib,
    #[value(name = "emit-module", help = "Emit the module only")]
    EmitModuleOnly,
    #[value(help = "Merge partial modules")]
    MergeModules,
    #[value(name = "interpret", help = "Run the program immediately")]
    Immediate,
    #[value(help = "Start a REPL")]
    Repl,
    #[value(help = "Emit assembly")]
    EmitAssembly,
    #[value(help = "Emit LLVM IR")]
    EmitIr,
    #[value(help = "Emit LLVM bitcode")]
    EmitBc,
    #[default]
    #[value(help = "Emit an object file")]
    EmitObject,
}

impl From<ActionArg> for Action {
    #[inline]
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Parse => Self::Parse,
            ActionArg::DumpParse => Self::DumpParse,
            ActionArg::DumpInterfaceHash => Self::DumpInterfaceHash,
            ActionArg::EmitSyntax => Self::EmitSyntax,
            ActionArg::DumpScopeMaps => Self::DumpScopeMaps,
            ActionArg::Typecheck => Self::Typecheck,
            ActionArg::DumpAst => Self::DumpAST,
            ActionArg::PrintAst => Self::PrintAST,
            ActionArg::DumpTypeRefinementContexts => Self::DumpTypeRefinementContexts,
            ActionArg::EmitImportedModules => Self::EmitImportedModules,
            ActionArg::EmitPch => Self::EmitPCH,
            ActionArg::EmitSilgen => Self::EmitSILGen,
            ActionArg::EmitSil => Self::EmitSIL,
            ActionArg::EmitSibgen => Self::EmitSIBGen,
            ActionArg::EmitSib => Self::EmitSIB,
            ActionArg::EmitModuleOnly => Self::EmitModuleOnly,
            ActionArg::MergeModules => Self::MergeModules,
            ActionArg::Immediate => Self::Immediate,
            ActionArg::Repl => Self::REPL,
            ActionArg::EmitAssembly => Self::EmitAssembly,
            ActionArg::EmitIr => Self::EmitIR,
            ActionArg::EmitBc => Self::EmitBC,
            ActionArg::EmitObject => Self::EmitObject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, clap::ValueEnum)]
pub enum InputKindArg {
    None,
    #[default]
    Source,
    #[value(help = "Source of the standard library")]
    SourceLibrary,
    Sil,
    #[value(name = "llvm-ir")]
    LlvmIr,
    Module,
}

impl From<InputKindArg> for InputFileKind {
    #[inline]
    fn from(kind: InputKindArg) -> Self {
        match kind {
            InputKindArg::None => Self::None,
            InputKindArg::Source => Self::Source,
            InputKindArg::SourceLibrary => Self::SourceLibrary,
            InputKindArg::Sil => Self::SIL,
            InputKindArg::LlvmIr => Self::LLVMIr,
            InputKindArg::Module => Self::Module,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser as _};

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_action_names_match() {
        use clap::ValueEnum as _;

        for arg in ActionArg::value_variants() {
            let name = arg.to_possible_value().unwrap();

            assert_eq!(name.get_name(), Action::from(*arg).name());
        }
    }

    #[test]
    fn test_into_options() {
        let args = Args::parse_from([
            "kumo",
            "a.swift",
            "b.swift",
            "--action",
            "typecheck",
            "--primary-output",
            "a.out",
            "--emit-dependencies-path",
            "deps.d",
        ]);

        let (options, debug) = args.into_options().unwrap();

        assert_eq!(options.action, Action::Typecheck);
        assert_eq!(options.inputs.len(), 2);
        assert_eq!(
            options.inputs.iter().map(|input| input.output.clone()).collect::<Vec<_>>(),
            [Some(PathBuf::from("a.out")), None]
        );
        assert_eq!(
            options.aux_outputs.get(OutputKind::DependenciesFile),
            Some(std::path::Path::new("deps.d"))
        );
        assert!(!debug.time_compilation);
    }

    #[test]
    fn test_too_many_primary_outputs() {
        let args = Args::parse_from([
            "kumo",
            "a.swift",
            "--primary-output",
            "a.o",
            "--primary-output",
            "b.o",
        ]);

        assert!(args.into_options().is_err());
    }
}
