//! Property-based tests for load/serialize round-trips
//!
//! These tests ensure that serializing a loaded store and loading the output
//! again reproduces the same store, for keys and values free of the
//! format's reserved characters (`=`, `[`, `]`, `;`, newlines).

use std::collections::HashMap;

use dotini::Ini;
use proptest::prelude::*;

fn safe_key() -> impl Strategy<Value = String> {
    // First character must not be `.` so the line is never read as the
    // shorthand form.
    "[A-Za-z0-9_][A-Za-z0-9_.]{0,11}"
}

fn safe_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.:/-]{0,16}"
}

proptest! {
    #[test]
    fn roundtrip_flat_assignments(
        pairs in proptest::collection::vec((safe_key(), safe_value()), 1..8),
    ) {
        let text: String = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();

        let mut first = Ini::new();
        first.load_str(&text).expect("generated input is valid");

        let mut second = Ini::new();
        second
            .load_str(&first.to_string())
            .expect("serialized output re-loads");

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn last_assignment_wins(
        pairs in proptest::collection::vec((safe_key(), safe_value()), 1..8),
    ) {
        let text: String = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();

        let mut ini = Ini::new();
        ini.load_str(&text).expect("generated input is valid");

        let mut expected = HashMap::new();
        for (key, value) in &pairs {
            expected.insert(key.as_str(), value.as_str());
        }
        for (key, value) in expected {
            prop_assert_eq!(ini.get_last(key), Some(value));
        }
    }
}

#[test]
fn roundtrip_kitchen_sink() {
    let source = "\
;top note
[server]
host=localhost
;tried in order
port=8080
.=8081
[.tls]
cert=/etc/ssl/server.pem
[]
debug=1
";
    let mut first = Ini::new();
    first.load_str(source).unwrap();

    let canonical = first.to_string();
    let mut second = Ini::new();
    second.load_str(&canonical).unwrap();

    assert_eq!(first, second);
    assert_eq!(canonical, second.to_string());
}

#[test]
fn serialized_form_is_canonical_crlf() {
    let mut ini = Ini::new();
    ini.load_str("[a]\n;why\nk=v").unwrap();
    assert_eq!(ini.to_string(), ";why\r\na.k=v\r\n");
}

#[test]
fn emit_fragments_concatenate_to_display() {
    let mut ini = Ini::new();
    ini.load_str("[a]\nx=1\n.=2").unwrap();

    let mut collected = String::new();
    ini.emit(|fragment| collected.push_str(fragment));
    assert_eq!(collected, ini.to_string());
}
