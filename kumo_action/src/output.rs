/// An artifact a frontend invocation may write. Each one is configured independently.
///
/// The declaration order is the canonical order: anything reported per kind is reported in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputKind {
    PrincipalOutput,
    Module,
    ModuleDoc,
    ObjCHeader,
    DependenciesFile,
    ReferenceDependenciesFile,
    LoadedModuleTrace,
    TBD,
    Fixits,
    SerializedDiagnostics,
    GroupInfo,
    DumpAPI,
}

impl OutputKind {
    pub const ALL: [OutputKind; 12] = [
        Self::PrincipalOutput,
        Self::Module,
        Self::ModuleDoc,
        Self::ObjCHeader,
        Self::DependenciesFile,
        Self::ReferenceDependenciesFile,
        Self::LoadedModuleTrace,
        Self::TBD,
        Self::Fixits,
        Self::SerializedDiagnostics,
        Self::GroupInfo,
        Self::DumpAPI,
    ];

    /// Every kind except [`OutputKind::PrincipalOutput`], in canonical order.
    pub const AUXILIARY: [OutputKind; 11] = [
        Self::Module,
        Self::ModuleDoc,
        Self::ObjCHeader,
        Self::DependenciesFile,
        Self::ReferenceDependenciesFile,
        Self::LoadedModuleTrace,
        Self::TBD,
        Self::Fixits,
        Self::SerializedDiagnostics,
        Self::GroupInfo,
        Self::DumpAPI,
    ];

    #[inline]
    pub const fn is_auxiliary(self) -> bool {
        !matches!(self, Self::PrincipalOutput)
    }

    /// The command line option that configures this output's path.
    #[inline]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::PrincipalOutput => "-o",
            Self::Module => "--emit-module-path",
            Self::ModuleDoc => "--emit-module-doc-path",
            Self::ObjCHeader => "--emit-objc-header-path",
            Self::DependenciesFile => "--emit-dependencies-path",
            Self::ReferenceDependenciesFile => "--emit-reference-dependencies-path",
            Self::LoadedModuleTrace => "--emit-loaded-module-trace-path",
            Self::TBD => "--emit-tbd-path",
            Self::Fixits => "--emit-fixits-path",
            Self::SerializedDiagnostics => "--serialize-diagnostics-path",
            Self::GroupInfo => "--group-info-path",
            Self::DumpAPI => "--dump-api-path",
        }
    }

    #[inline]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PrincipalOutput => "principal output",
            Self::Module => "module",
            Self::ModuleDoc => "module documentation",
            Self::ObjCHeader => "Objective-C header",
            Self::DependenciesFile => "dependencies file",
            Self::ReferenceDependenciesFile => "reference dependencies file",
            Self::LoadedModuleTrace => "loaded module trace",
            Self::TBD => "TBD file",
            Self::Fixits => "fix-its file",
            Self::SerializedDiagnostics => "serialized diagnostics",
            Self::GroupInfo => "group info",
            Self::DumpAPI => "API dump",
        }
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl std::fmt::Display for OutputKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A set of [`OutputKind`]s, usable in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputKindSet(u16);

impl OutputKindSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn of(kinds: &[OutputKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    #[inline]
    pub const fn with(self, kind: OutputKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: OutputKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates in canonical order.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = OutputKind> {
        OutputKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<OutputKind> for OutputKindSet {
    fn from_iter<I: IntoIterator<Item = OutputKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (index, kind) in OutputKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }

        assert_eq!(&OutputKind::ALL[1..], &OutputKind::AUXILIARY);
    }

    #[test]
    fn test_set_membership() {
        let set = OutputKindSet::of(&[OutputKind::Module, OutputKind::TBD]);

        assert!(set.contains(OutputKind::Module));
        assert!(set.contains(OutputKind::TBD));
        assert!(!set.contains(OutputKind::ModuleDoc));
        assert_eq!(set.len(), 2);
        assert!(OutputKindSet::EMPTY.is_empty());
    }

    #[test]
    fn test_set_iterates_in_canonical_order() {
        let set = [OutputKind::DumpAPI, OutputKind::Module, OutputKind::Fixits]
            .into_iter()
            .collect::<OutputKindSet>();

        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [OutputKind::Module, OutputKind::Fixits, OutputKind::DumpAPI]
        );
    }
}
