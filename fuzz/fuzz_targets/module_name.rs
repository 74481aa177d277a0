#![no_main]

use libfuzzer_sys::fuzz_target;

use kumo_frontend::{is_valid_identifier, sanitize_module_name};

fuzz_target!(|data: &str| {
    if let Some(name) = sanitize_module_name(data) {
        assert!(is_valid_identifier(&name), "{data:?} sanitized to {name:?}");
        assert_eq!(name.chars().count(), data.chars().count());
    }
});
