use crate::{Action, ActionCategory, OutputKind, OutputKindSet};

/// Static properties of an [`Action`]. Derived from the action alone and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionPolicy {
    pub action: Action,
    pub category: ActionCategory,
    /// Runs the program directly instead of persisting an artifact.
    pub is_immediate: bool,
    pub produces_principal_output: bool,
    pub principal_output_is_textual: bool,
    /// File extension of the principal output, without the leading dot.
    pub principal_suffix: Option<&'static str>,
    /// Outputs this action is able to write. Contains [`OutputKind::PrincipalOutput`]
    /// exactly when `produces_principal_output` is set.
    pub permitted_outputs: OutputKindSet,
    pub requires_resolved_module_name: bool,
}

// written by the diagnostic engine, so every runnable action can produce them
const DIAGNOSTIC_OUTPUTS: OutputKindSet =
    OutputKindSet::of(&[OutputKind::Fixits, OutputKind::SerializedDiagnostics]);

const DEPENDENCY_OUTPUTS: OutputKindSet = OutputKindSet::of(&[
    OutputKind::DependenciesFile,
    OutputKind::ReferenceDependenciesFile,
]);

const TRACED_OUTPUTS: OutputKindSet = DEPENDENCY_OUTPUTS.with(OutputKind::LoadedModuleTrace);

const MODULE_OUTPUTS: OutputKindSet = OutputKindSet::of(&[
    OutputKind::Module,
    OutputKind::ModuleDoc,
    OutputKind::ObjCHeader,
]);

impl ActionPolicy {
    const fn build(action: Action) -> Self {
        let category = action.category();

        // (produces, textual, suffix)
        let (produces, textual, suffix) = match action {
            Action::None | Action::Parse | Action::Typecheck => (false, false, None),
            Action::DumpParse
            | Action::DumpInterfaceHash
            | Action::EmitSyntax
            | Action::DumpScopeMaps
            | Action::DumpAST
            | Action::PrintAST
            | Action::DumpTypeRefinementContexts => (false, true, None),
            Action::EmitImportedModules => (true, true, Some("importedmodules")),
            Action::EmitPCH => (true, false, Some("pch")),
            Action::EmitSILGen | Action::EmitSIL => (true, true, Some("sil")),
            Action::EmitSIBGen | Action::EmitSIB => (true, false, Some("sib")),
            Action::EmitModuleOnly | Action::MergeModules => (false, false, None),
            Action::Immediate | Action::REPL => (false, false, None),
            Action::EmitAssembly => (true, true, Some("s")),
            Action::EmitIR => (true, true, Some("ll")),
            Action::EmitBC => (true, false, Some("bc")),
            Action::EmitObject => (true, false, Some("o")),
        };

        let auxiliary = match action {
            Action::None => OutputKindSet::EMPTY,
            Action::Parse
            | Action::DumpParse
            | Action::DumpInterfaceHash
            | Action::EmitSyntax
            | Action::DumpScopeMaps
            | Action::PrintAST
            | Action::DumpTypeRefinementContexts => DIAGNOSTIC_OUTPUTS,
            Action::Typecheck => DIAGNOSTIC_OUTPUTS
                .union(TRACED_OUTPUTS)
                .with(OutputKind::DumpAPI),
            Action::DumpAST => DIAGNOSTIC_OUTPUTS.union(DEPENDENCY_OUTPUTS),
            Action::EmitImportedModules | Action::EmitPCH => {
                DIAGNOSTIC_OUTPUTS.union(TRACED_OUTPUTS)
            }
            Action::EmitSILGen | Action::EmitSIL => DIAGNOSTIC_OUTPUTS.union(TRACED_OUTPUTS),
            // serializing SIL serializes the module along with it
            Action::EmitSIBGen | Action::EmitSIB => DIAGNOSTIC_OUTPUTS
                .union(TRACED_OUTPUTS)
                .union(MODULE_OUTPUTS),
            Action::EmitModuleOnly | Action::MergeModules => DIAGNOSTIC_OUTPUTS
                .union(TRACED_OUTPUTS)
                .union(MODULE_OUTPUTS)
                .with(OutputKind::TBD)
                .with(OutputKind::GroupInfo),
            Action::Immediate | Action::REPL => DIAGNOSTIC_OUTPUTS,
            Action::EmitAssembly | Action::EmitIR | Action::EmitBC | Action::EmitObject => {
                DIAGNOSTIC_OUTPUTS
                    .union(TRACED_OUTPUTS)
                    .union(MODULE_OUTPUTS)
                    .with(OutputKind::TBD)
            }
        };

        let permitted_outputs = if produces {
            auxiliary.with(OutputKind::PrincipalOutput)
        } else {
            auxiliary
        };

        let requires_resolved_module_name = matches!(
            category,
            ActionCategory::ModuleIntrospection
                | ActionCategory::SILStage
                | ActionCategory::ModuleEmission
                | ActionCategory::CodeGeneration
        );

        Self {
            action,
            category,
            is_immediate: matches!(category, ActionCategory::Interpretation),
            produces_principal_output: produces,
            principal_output_is_textual: textual,
            principal_suffix: suffix,
            permitted_outputs,
            requires_resolved_module_name,
        }
    }

    /// Suffix and textual nature of the principal output, for collaborators that need the
    /// artifact's identity without resolving any paths.
    #[inline]
    pub const fn principal_output_identity(&self) -> (Option<&'static str>, bool) {
        (self.principal_suffix, self.principal_output_is_textual)
    }

    #[inline]
    pub const fn can_emit(&self, kind: OutputKind) -> bool {
        self.permitted_outputs.contains(kind)
    }

    #[inline]
    pub const fn can_emit_dependencies(&self) -> bool {
        self.can_emit(OutputKind::DependenciesFile)
    }

    #[inline]
    pub const fn can_emit_header(&self) -> bool {
        self.can_emit(OutputKind::ObjCHeader)
    }

    #[inline]
    pub const fn can_emit_loaded_module_trace(&self) -> bool {
        self.can_emit(OutputKind::LoadedModuleTrace)
    }

    #[inline]
    pub const fn can_emit_module(&self) -> bool {
        self.can_emit(OutputKind::Module)
    }

    #[inline]
    pub const fn can_emit_module_doc(&self) -> bool {
        self.can_emit(OutputKind::ModuleDoc)
    }

    #[inline]
    pub const fn only_parses(&self) -> bool {
        matches!(self.category, ActionCategory::ParseOnly)
    }

    /// `false` only for [`Action::None`].
    #[inline]
    pub const fn is_runnable(&self) -> bool {
        !matches!(self.category, ActionCategory::None)
    }
}

static POLICIES: [ActionPolicy; Action::ALL.len()] = {
    let mut table = [ActionPolicy::build(Action::None); Action::ALL.len()];

    let mut i = 0;
    while i < Action::ALL.len() {
        table[i] = ActionPolicy::build(Action::ALL[i]);
        i += 1;
    }

    table
};

/// Looks up the policy of `action`. The table is built at compile time.
#[inline]
pub fn classify(action: Action) -> &'static ActionPolicy {
    &POLICIES[action as usize]
}

impl Action {
    #[inline]
    pub fn policy(self) -> &'static ActionPolicy {
        classify(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident: * => |$policy:ident| $check:expr $(, $comment:literal)?) => {
            #[test]
            fn $name() {
                for action in Action::ALL {
                    let $policy = classify(action);
                    assert!($check, "{action:?} {}", concat!($($comment)?));
                }
            }
        };
        ($name:ident: $category:pat => |$policy:ident| $check:expr $(, $comment:literal)?) => {
            #[test]
            fn $name() {
                for action in Action::ALL {
                    let $policy = classify(action);
                    if matches!($policy.category, $category) {
                        assert!($check, "{action:?} {}", concat!($($comment)?));
                    }
                }
            }
        };
    }

    #[test]
    fn test_table_is_total_and_indexed_by_action() {
        for action in Action::ALL {
            let policy = classify(action);

            assert_eq!(policy.action, action);
            assert_eq!(policy.category, action.category());
            assert_eq!(policy, &ActionPolicy::build(action));
            assert!(std::ptr::eq(policy, classify(action)));
        }
    }

    test!(test_interpretation_is_immediate: ActionCategory::Interpretation => |policy|
        policy.is_immediate
            && !policy.produces_principal_output
            && !policy.requires_resolved_module_name);

    test!(test_only_interpretation_is_immediate: * => |policy|
        policy.is_immediate == matches!(policy.category, ActionCategory::Interpretation));

    test!(test_module_emission_needs_module_name: ActionCategory::ModuleEmission => |policy|
        policy.requires_resolved_module_name
            && policy.can_emit_module()
            && policy.can_emit_module_doc()
            && policy.can_emit_header()
            && policy.can_emit(OutputKind::TBD));

    test!(test_dumps_produce_no_file:
        ActionCategory::ParseOnly | ActionCategory::TypeCheckOnly => |policy|
        !policy.produces_principal_output && !policy.requires_resolved_module_name);

    test!(test_codegen_needs_module_name: ActionCategory::CodeGeneration => |policy|
        policy.produces_principal_output
            && policy.requires_resolved_module_name
            && policy.can_emit_dependencies()
            && policy.can_emit_loaded_module_trace()
            && policy.can_emit(OutputKind::TBD));

    test!(test_principal_output_has_suffix: * => |policy|
        policy.produces_principal_output == policy.principal_suffix.is_some(),
        "producing a principal output requires a suffix");

    test!(test_principal_output_is_permitted: * => |policy|
        policy.produces_principal_output == policy.can_emit(OutputKind::PrincipalOutput));

    test!(test_parse_only_emits_no_dependencies: ActionCategory::ParseOnly => |policy|
        !policy.can_emit_dependencies() && policy.only_parses());

    #[test]
    fn test_none_permits_nothing() {
        let policy = classify(Action::None);

        assert!(!policy.is_runnable());
        assert!(policy.permitted_outputs.is_empty());
        assert!(!policy.produces_principal_output);
    }

    #[test]
    fn test_typecheck_emits_dependencies() {
        assert!(classify(Action::Typecheck).can_emit_dependencies());
        assert!(classify(Action::DumpAST).can_emit_dependencies());
        assert!(!classify(Action::PrintAST).can_emit_dependencies());
    }

    #[test]
    fn test_sil_serialization_emits_module() {
        assert!(!classify(Action::EmitSILGen).can_emit_module());
        assert!(!classify(Action::EmitSIL).can_emit_module_doc());
        assert!(classify(Action::EmitSIBGen).can_emit_module());
        assert!(classify(Action::EmitSIB).can_emit_module_doc());
    }

    #[test]
    fn test_principal_output_identity() {
        #[rustfmt::skip]
        let expected = [
            (Action::EmitSILGen, (Some("sil"), true)),
            (Action::EmitSIL, (Some("sil"), true)),
            (Action::EmitSIBGen, (Some("sib"), false)),
            (Action::EmitSIB, (Some("sib"), false)),
            (Action::EmitPCH, (Some("pch"), false)),
            (Action::EmitAssembly, (Some("s"), true)),
            (Action::EmitIR, (Some("ll"), true)),
            (Action::EmitBC, (Some("bc"), false)),
            (Action::EmitObject, (Some("o"), false)),
            (Action::REPL, (None, false)),
            (Action::Typecheck, (None, false)),
        ];

        for (action, identity) in expected {
            assert_eq!(classify(action).principal_output_identity(), identity, "{action:?}");
        }
    }
}
