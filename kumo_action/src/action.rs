/// The single compilation mode requested for one frontend invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Action {
    /// No action was requested; not valid for running the pipeline.
    #[default]
    None,

    Parse,
    DumpParse,
    DumpInterfaceHash,
    EmitSyntax,
    DumpScopeMaps,

    Typecheck,
    DumpAST,
    PrintAST,
    DumpTypeRefinementContexts,

    EmitImportedModules,
    EmitPCH,

    /// Raw SIL.
    EmitSILGen,
    /// Canonical SIL.
    EmitSIL,
    /// Serialized AST + raw SIL.
    EmitSIBGen,
    /// Serialized AST + canonical SIL.
    EmitSIB,

    EmitModuleOnly,
    MergeModules,

    Immediate,
    REPL,

    EmitAssembly,
    EmitIR,
    EmitBC,
    EmitObject,
}

impl Action {
    /// Every action, in declaration order. `Action::ALL[a as usize] == a` holds for all `a`.
    pub const ALL: [Action; 24] = [
        Self::None,
        Self::Parse,
        Self::DumpParse,
        Self::DumpInterfaceHash,
        Self::EmitSyntax,
        Self::DumpScopeMaps,
        Self::Typecheck,
        Self::DumpAST,
        Self::PrintAST,
        Self::DumpTypeRefinementContexts,
        Self::EmitImportedModules,
        Self::EmitPCH,
        Self::EmitSILGen,
        Self::EmitSIL,
        Self::EmitSIBGen,
        Self::EmitSIB,
        Self::EmitModuleOnly,
        Self::MergeModules,
        Self::Immediate,
        Self::REPL,
        Self::EmitAssembly,
        Self::EmitIR,
        Self::EmitBC,
        Self::EmitObject,
    ];

    #[inline]
    pub const fn category(self) -> ActionCategory {
        match self {
            Self::None => ActionCategory::None,
            Self::Parse
            | Self::DumpParse
            | Self::DumpInterfaceHash
            | Self::EmitSyntax
            | Self::DumpScopeMaps => ActionCategory::ParseOnly,
            Self::Typecheck | Self::DumpAST | Self::PrintAST | Self::DumpTypeRefinementContexts => {
                ActionCategory::TypeCheckOnly
            }
            Self::EmitImportedModules => ActionCategory::ModuleIntrospection,
            Self::EmitPCH => ActionCategory::BridgingHeader,
            Self::EmitSILGen | Self::EmitSIL | Self::EmitSIBGen | Self::EmitSIB => {
                ActionCategory::SILStage
            }
            Self::EmitModuleOnly | Self::MergeModules => ActionCategory::ModuleEmission,
            Self::Immediate | Self::REPL => ActionCategory::Interpretation,
            Self::EmitAssembly | Self::EmitIR | Self::EmitBC | Self::EmitObject => {
                ActionCategory::CodeGeneration
            }
        }
    }

    /// Flag-style name, as spelled on the command line.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Parse => "parse",
            Self::DumpParse => "dump-parse",
            Self::DumpInterfaceHash => "dump-interface-hash",
            Self::EmitSyntax => "emit-syntax",
            Self::DumpScopeMaps => "dump-scope-maps",
            Self::Typecheck => "typecheck",
            Self::DumpAST => "dump-ast",
            Self::PrintAST => "print-ast",
            Self::DumpTypeRefinementContexts => "dump-type-refinement-contexts",
            Self::EmitImportedModules => "emit-imported-modules",
            Self::EmitPCH => "emit-pch",
            Self::EmitSILGen => "emit-silgen",
            Self::EmitSIL => "emit-sil",
            Self::EmitSIBGen => "emit-sibgen",
            Self::EmitSIB => "emit-sib",
            Self::EmitModuleOnly => "emit-module",
            Self::MergeModules => "merge-modules",
            Self::Immediate => "interpret",
            Self::REPL => "repl",
            Self::EmitAssembly => "emit-assembly",
            Self::EmitIR => "emit-ir",
            Self::EmitBC => "emit-bc",
            Self::EmitObject => "emit-object",
        }
    }

    /// Whether the action runs SIL generation or anything past it.
    #[inline]
    pub const fn is_creating_sil(self) -> bool {
        matches!(
            self.category(),
            ActionCategory::SILStage
                | ActionCategory::ModuleEmission
                | ActionCategory::Interpretation
                | ActionCategory::CodeGeneration
        )
    }
}

impl std::fmt::Display for Action {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    None,
    ParseOnly,
    TypeCheckOnly,
    ModuleIntrospection,
    BridgingHeader,
    SILStage,
    ModuleEmission,
    Interpretation,
    CodeGeneration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (index, action) in Action::ALL.iter().enumerate() {
            assert_eq!(*action as usize, index, "{action:?} is out of order");
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names = Action::ALL.map(Action::name).to_vec();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), Action::ALL.len());
    }

    #[test]
    fn test_creating_sil() {
        assert!(!Action::Typecheck.is_creating_sil());
        assert!(!Action::EmitPCH.is_creating_sil());
        assert!(Action::EmitSILGen.is_creating_sil());
        assert!(Action::MergeModules.is_creating_sil());
        assert!(Action::REPL.is_creating_sil());
        assert!(Action::EmitObject.is_creating_sil());
    }
}
