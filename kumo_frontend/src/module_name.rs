use tracing::debug;
use unicode_xid::UnicodeXID;

use kumo_action::ActionPolicy;

use crate::{InputSet, OutputDiagnostic};

/// Module name used when running code immediately.
pub const REPL_MODULE_NAME: &str = "REPL";
/// Module name used when nothing better can be derived.
pub const FALLBACK_MODULE_NAME: &str = "main";
/// Reserved for the standard library; only usable while parsing it.
pub const STDLIB_MODULE_NAME: &str = "Core";

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c == '_' || c.is_xid_start() => chars.all(UnicodeXID::is_xid_continue),
        _ => false,
    }
}

/// Turns a file stem into an identifier by replacing every character that can't appear at its
/// position with `_`. Returns `None` for an empty stem.
pub fn sanitize_module_name(stem: &str) -> Option<String> {
    if stem.is_empty() {
        return None;
    }

    let name = stem
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let valid = if i == 0 {
                c == '_' || c.is_xid_start()
            } else {
                c.is_xid_continue()
            };

            if valid { c } else { '_' }
        })
        .collect();

    Some(name)
}

/// Module name to use when none was given explicitly. Reads only the names already held by
/// `inputs`.
pub fn fallback_module_name(inputs: &InputSet, is_immediate: bool) -> String {
    if is_immediate {
        return REPL_MODULE_NAME.into();
    }

    if inputs.is_compiling_exactly_one_source_file() {
        let derived = inputs
            .first()
            .filter(|input| !input.is_stdin())
            .and_then(|input| input.path().file_stem())
            .and_then(|stem| sanitize_module_name(&stem.to_string_lossy()));

        if let Some(name) = derived {
            return name;
        }
    }

    FALLBACK_MODULE_NAME.into()
}

/// Settles the module name of an invocation, or the one diagnostic explaining why it can't be.
pub fn resolve_module_name(
    explicit: Option<&str>,
    policy: &ActionPolicy,
    inputs: &InputSet,
    parse_stdlib: bool,
) -> Result<String, OutputDiagnostic> {
    let is_usable = |name: &str| {
        is_valid_identifier(name) && (parse_stdlib || name != STDLIB_MODULE_NAME)
    };
    let lenient =
        !policy.requires_resolved_module_name || inputs.is_compiling_exactly_one_source_file();

    match explicit.filter(|name| !name.is_empty()) {
        Some(name) if is_usable(name) => Ok(name.into()),
        Some(_) if lenient => Ok(FALLBACK_MODULE_NAME.into()),
        Some(name) => Err(OutputDiagnostic::InvalidModuleName {
            name: name.into(),
            action: policy.action,
        }),
        None if policy.requires_resolved_module_name && inputs.len() > 1 => {
            Err(OutputDiagnostic::UnresolvableModuleName {
                action: policy.action,
                inputs: inputs.len(),
            })
        }
        None => {
            let name = fallback_module_name(inputs, policy.is_immediate);
            debug!(%name, "derived fallback module name");

            if is_usable(name.as_str()) {
                Ok(name)
            } else {
                Ok(FALLBACK_MODULE_NAME.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kumo_action::{Action, classify};

    use super::*;
    use crate::{InputFile, InputFileKind};

    fn sources(paths: &[&str]) -> InputSet {
        paths
            .iter()
            .fold(InputSet::new(InputFileKind::Source), |inputs, path| {
                inputs.with(InputFile::new(*path))
            })
    }

    macro_rules! test {
        ($name:ident: sanitize $stem:literal -> $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!(sanitize_module_name($stem).as_deref(), $expected);
            }
        };
        ($name:ident: fallback $inputs:expr, immediate = $immediate:literal -> $expected:literal) => {
            #[test]
            fn $name() {
                assert_eq!(fallback_module_name(&$inputs, $immediate), $expected);
            }
        };
    }

    test!(test_sanitize_valid: sanitize "MyLib" -> Some("MyLib"));
    test!(test_sanitize_dashes: sanitize "my-lib.v2" -> Some("my_lib_v2"));
    test!(test_sanitize_leading_digit: sanitize "2fast" -> Some("_fast"));
    test!(test_sanitize_unicode: sanitize "café" -> Some("café"));
    test!(test_sanitize_empty: sanitize "" -> None);

    test!(test_fallback_single_file: fallback sources(&["src/MyLib.swift"]), immediate = false -> "MyLib");
    test!(test_fallback_invalid_chars: fallback sources(&["my lib.swift"]), immediate = false -> "my_lib");
    test!(test_fallback_many_files: fallback sources(&["a.swift", "b.swift"]), immediate = false -> "main");
    test!(test_fallback_no_files: fallback sources(&[]), immediate = false -> "main");
    test!(test_fallback_stdin: fallback sources(&["-"]), immediate = false -> "main");
    test!(test_fallback_immediate: fallback sources(&["a.swift", "b.swift"]), immediate = true -> "REPL");
    test!(test_fallback_immediate_single: fallback sources(&["MyLib.swift"]), immediate = true -> "REPL");

    #[test]
    fn test_fallback_non_source() {
        let inputs = InputSet::new(InputFileKind::SIL).with(InputFile::new("MyLib.sil"));

        assert_eq!(fallback_module_name(&inputs, false), "main");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_valid_identifier("_"));
        assert!(is_valid_identifier("Foo_1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1Foo"));
        assert!(!is_valid_identifier("foo-bar"));
    }

    #[test]
    fn test_explicit_name_wins() {
        let name = resolve_module_name(
            Some("Kit"),
            classify(Action::EmitObject),
            &sources(&["a.swift", "b.swift"]),
            false,
        );

        assert_eq!(name, Ok("Kit".into()));
    }

    #[test]
    fn test_unresolvable_module_name() {
        let name = resolve_module_name(
            None,
            classify(Action::EmitObject),
            &sources(&["a.swift", "b.swift"]),
            false,
        );

        assert_eq!(
            name,
            Err(OutputDiagnostic::UnresolvableModuleName {
                action: Action::EmitObject,
                inputs: 2,
            })
        );
    }

    #[test]
    fn test_many_inputs_without_proper_name_need() {
        let name = resolve_module_name(
            None,
            classify(Action::Typecheck),
            &sources(&["a.swift", "b.swift"]),
            false,
        );

        assert_eq!(name, Ok("main".into()));
    }

    #[test]
    fn test_invalid_explicit_name() {
        let inputs = sources(&["a.swift", "b.swift"]);

        assert_eq!(
            resolve_module_name(
                Some("not valid"),
                classify(Action::EmitModuleOnly),
                &inputs,
                false
            ),
            Err(OutputDiagnostic::InvalidModuleName {
                name: "not valid".into(),
                action: Action::EmitModuleOnly,
            })
        );
        assert_eq!(
            resolve_module_name(Some("not valid"), classify(Action::Parse), &inputs, false),
            Ok("main".into())
        );
        assert_eq!(
            resolve_module_name(
                Some("not valid"),
                classify(Action::EmitObject),
                &sources(&["a.swift"]),
                false
            ),
            Ok("main".into())
        );
    }

    #[test]
    fn test_stdlib_name_is_reserved() {
        let inputs = sources(&["a.swift", "b.swift"]);
        let policy = classify(Action::EmitModuleOnly);

        assert!(resolve_module_name(Some("Core"), policy, &inputs, false).is_err());
        assert_eq!(
            resolve_module_name(Some("Core"), policy, &inputs, true),
            Ok("Core".into())
        );
        assert_eq!(
            resolve_module_name(
                None,
                classify(Action::EmitObject),
                &sources(&["Core.swift"]),
                false
            ),
            Ok("main".into())
        );
    }
}
