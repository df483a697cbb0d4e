//! Delete scenarios, checked byte-for-byte: a delete must remove the
//! member, its key, and exactly one adjacent comma, and nothing else.

use json_splice::{delete, delete_bytes};
use serde_json::Value;

fn check(expect: &str, json: &str, path: &str) {
    assert_eq!(delete(json, path).unwrap(), expect, "delete({json:?}, {path:?})");
    assert_eq!(
        delete_bytes(json.as_bytes(), path).unwrap(),
        expect.as_bytes(),
        "delete_bytes({json:?}, {path:?})"
    );
}

#[test]
fn array_elements() {
    check("[456]", "[123,456]", "0");
    check("[123,789]", "[123,456,789]", "1");
    check("[123,456]", "[123,456,789]", "-1");
    check(r#"{"a":[123,456]}"#, r#"{"a":[123,456,789]}"#, "a.-1");
}

#[test]
fn object_members() {
    check(
        r#"{"and":"another"}"#,
        r#"{"this":"that","and":"another"}"#,
        "this",
    );
    check(
        r#"{"this":"that"}"#,
        r#"{"this":"that","and":"another"}"#,
        "and",
    );
    check("{}", r#"{"and":"another"}"#, "and");
}

#[test]
fn missing_key_is_a_noop() {
    check(r#"{"1":"2"}"#, r#"{"1":"2"}"#, "3");
    check("[1,2,3]", "[1,2,3]", "9");
    check("[]", "[]", "-1");
}

#[test]
fn middle_member_of_a_flat_record() {
    let json = r#"{"country_code_from":"NZ","country_code_to":"SA","date_created":"2018-09-13T02:56:11.25783Z","date_updated":"2018-09-14T03:15:16.67356Z","disabled":false,"last_edited_by":"Developers","id":"a3e...bc454","merchant_id":"f2b...b91abf","signed_date":"2018-02-01T00:00:00Z","start_date":"2018-03-01T00:00:00Z","url":"https://www.google.com"}"#;
    let expect = r#"{"country_code_from":"NZ","country_code_to":"SA","date_created":"2018-09-13T02:56:11.25783Z","disabled":false,"last_edited_by":"Developers","id":"a3e...bc454","merchant_id":"f2b...b91abf","signed_date":"2018-02-01T00:00:00Z","start_date":"2018-03-01T00:00:00Z","url":"https://www.google.com"}"#;
    let got = delete(json, "date_updated").unwrap();
    assert_eq!(got, expect);
    let doc: Value = serde_json::from_str(&got).unwrap();
    assert!(doc.get("date_updated").is_none());
    assert!(doc.get("date_created").is_some());
}

// Three consecutive prefix lengths around the historical boundary: the
// bytes before the deleted member measure 307, 308, and 309.

#[test]
fn boundary_prefix_len_307() {
    check(
        r#"{"1":"","0":"012345678901234567890123456789012345678901234567890123456789012345678901234567","2":""}"#,
        r#"{"1":"","0":"012345678901234567890123456789012345678901234567890123456789012345678901234567","to_delete":"0","2":""}"#,
        "to_delete",
    );
}

#[test]
fn boundary_prefix_len_308() {
    check(
        r#"{"1":"","0":"0123456789012345678901234567890123456789012345678901234567890123456789012345678","2":""}"#,
        r#"{"1":"","0":"0123456789012345678901234567890123456789012345678901234567890123456789012345678","to_delete":"0","2":""}"#,
        "to_delete",
    );
}

#[test]
fn boundary_prefix_len_309() {
    check(
        r#"{"1":"","0":"01234567890123456789012345678901234567890123456789012345678901234567890123456","2":""}"#,
        r#"{"1":"","0":"01234567890123456789012345678901234567890123456789012345678901234567890123456","to_delete":"0","2":""}"#,
        "to_delete",
    );
}

#[test]
fn escaped_dot_key_deleted() {
    check(
        r#"{"data":{"key1":"value1"}}"#,
        r#"{"data":{"key1":"value1","key2.something":"value2"}}"#,
        "data.key2\\.something",
    );
}

#[test]
fn whitespace_around_the_member_is_absorbed_with_the_comma() {
    check(r#"{  "b": 2 }"#, r#"{ "a": 1, "b": 2 }"#, "a");
    check(r#"{ "a": 1 }"#, r#"{ "a": 1, "b": 2 }"#, "b");
    check("[  2 ]", "[ 1, 2 ]", "0");
    check("[ 1 ]", "[ 1, 2 ]", "1");
}

#[test]
fn delete_is_idempotent() {
    let cases = [
        (r#"{"a":1,"b":2}"#, "a"),
        ("[1,2,3]", "-1"),
        (r#"{"a":{"b":[1,2]}}"#, "a.b.0"),
        (r#"{"a":1}"#, "zzzz"),
    ];
    for (json, path) in cases {
        let once = delete(json, path).unwrap();
        let twice = delete(&once, path).unwrap();
        assert_eq!(once, twice, "delete({json:?}, {path:?})");
    }
}

#[test]
fn every_delete_leaves_balanced_structure() {
    let json = r#"{"a":[1,{"x":true},3],"b":{"c":"d","e":[null]},"f":0}"#;
    let paths = ["a.0", "a.1", "a.1.x", "a.-1", "b.c", "b.e", "b", "f"];
    for path in paths {
        let got = delete(json, path).unwrap();
        let parsed: Result<Value, _> = serde_json::from_str(&got);
        assert!(parsed.is_ok(), "delete({path:?}) produced {got:?}");
    }
}
