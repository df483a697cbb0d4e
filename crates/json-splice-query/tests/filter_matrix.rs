//! Operator coverage for filter evaluation, driven by a fixture table.

use json_splice_query::matches;

const DALE: &[u8] =
    br#"{"first": "Dale", "last": "Murphy", "age": 44, "nets": ["ig", "fb", "tw"]}"#;
const ROGER: &[u8] = br#"{"first": "Roger", "last": "Craig", "age": 68, "nets": ["fb", "tw"]}"#;

#[test]
fn equality_operators() {
    let table: &[(&[u8], &str, bool)] = &[
        (DALE, "last=\"Murphy\"", true),
        (DALE, "last==\"Murphy\"", true),
        (ROGER, "last=\"Murphy\"", false),
        (DALE, "last!=\"Murphy\"", false),
        (ROGER, "last!=\"Murphy\"", true),
        (DALE, "age=44", true),
        (DALE, "age=44.0", true),
        (DALE, "age!=44", false),
    ];
    for (elem, expr, want) in table {
        assert_eq!(matches(elem, expr), *want, "{expr}");
    }
}

#[test]
fn ordering_operators() {
    let table: &[(&[u8], &str, bool)] = &[
        (DALE, "age<68", true),
        (DALE, "age<=44", true),
        (DALE, "age>44", false),
        (ROGER, "age>=68", true),
        (ROGER, "age>100", false),
        // Strings order lexicographically.
        (ROGER, "last<\"Murphy\"", true),
        (DALE, "last<\"Craig\"", false),
        // Mismatched kinds never match.
        (DALE, "last>44", false),
        (DALE, "age<\"zzz\"", false),
    ];
    for (elem, expr, want) in table {
        assert_eq!(matches(elem, expr), *want, "{expr}");
    }
}

#[test]
fn pattern_operators() {
    let table: &[(&[u8], &str, bool)] = &[
        (DALE, "last%\"M*\"", true),
        (DALE, "last%\"*phy\"", true),
        (DALE, "last%\"Murph?\"", true),
        (DALE, "last%\"C*\"", false),
        (DALE, "last!%\"C*\"", true),
        (ROGER, "first%\"?oger\"", true),
    ];
    for (elem, expr, want) in table {
        assert_eq!(matches(elem, expr), *want, "{expr}");
    }
}

#[test]
fn existence_checks() {
    assert!(matches(DALE, "nets"));
    assert!(!matches(DALE, "missing"));
    assert!(!matches(br#"{"flag":false}"#, "flag"));
    assert!(!matches(br#"{"flag":null}"#, "flag"));
    assert!(matches(br#"{"flag":0}"#, "flag"));
}

#[test]
fn nested_keys_and_indexes() {
    assert!(matches(DALE, "nets.1=\"fb\""));
    assert!(!matches(ROGER, "nets.1=\"fb\""));
    let elem = br#"{"nested":{"id":"one","deep":{"n":5}}}"#;
    assert!(matches(elem, "nested.id=\"one\""));
    assert!(matches(elem, "nested.deep.n>4"));
}

#[test]
fn scalar_elements_compare_directly() {
    assert!(matches(br#""fb""#, "==\"fb\""));
    assert!(matches(b"7", ">=7"));
    assert!(matches(b"true", "=true"));
    assert!(matches(b"null", "=null"));
    assert!(!matches(b"null", "!=null"));
}

#[test]
fn garbage_never_matches_and_never_panics() {
    assert!(!matches(b"", "a=1"));
    assert!(!matches(b"{broken", "a=1"));
    assert!(!matches(DALE, ""));
    assert!(!matches(DALE, "((("));
    assert!(!matches(DALE, "age=*invalid["));
}
