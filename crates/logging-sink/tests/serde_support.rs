//! Integration tests for the optional serde derives.
//!
//! Priorities and destination kinds serialize as their lowercase names.

#![cfg(feature = "serde")]

use logging_sink::{DestinationKind, Priority};

/// Verifies priorities round through their lowercase names.
#[test]
fn priority_uses_lowercase_names() {
    assert_eq!(
        serde_json::to_string(&Priority::Warning).expect("serialize"),
        "\"warning\""
    );
    let parsed: Priority = serde_json::from_str("\"emergency\"").expect("deserialize");
    assert_eq!(parsed, Priority::Emergency);
}

/// Verifies destination kinds serialize as their names.
#[test]
fn destination_kind_uses_lowercase_names() {
    let kinds = [
        DestinationKind::Discard,
        DestinationKind::Syslog,
        DestinationKind::File,
        DestinationKind::Console,
    ];
    assert_eq!(
        serde_json::to_string(&kinds).expect("serialize"),
        r#"["discard","syslog","file","console"]"#
    );
}

/// Verifies unknown names are rejected.
#[test]
fn unknown_priority_is_rejected() {
    assert!(serde_json::from_str::<Priority>("\"verbose\"").is_err());
}
