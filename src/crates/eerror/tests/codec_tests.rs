//! Codec tests: canonical rendering, parsing, and render/parse round-trips

use eerror::{
    parse, parse_with_options, AttributeValue, EnhancedError, ErrorMap, ErrorOptions,
    ParseOptions,
};
use proptest::prelude::*;

const E_SOMEERROR: &str = "E_SOMEERROR";

fn bare(identifier: &str, message: &str) -> EnhancedError {
    EnhancedError::new_with_options(
        identifier,
        message,
        &ErrorOptions {
            capture_stacktrace: false,
        },
    )
}

fn exact() -> ParseOptions {
    ParseOptions {
        synthesize_stacktrace: false,
        ..ParseOptions::default()
    }
}

fn roundtrip(err: &EnhancedError) -> ErrorMap {
    parse_with_options(&err.to_string(), &exact())
        .unwrap_or_else(|| panic!("failed to parse rendered error: {}", err))
        .to_map()
}

#[test]
fn test_acceptance_set() {
    let err = parse("E_SOMEERROR: msg").unwrap();
    assert_eq!(err.id(), E_SOMEERROR);
    assert_eq!(err.message(), "msg");

    let err = parse("E_SOMEERROR: message (context)").unwrap();
    assert_eq!(err.message(), "message");
    assert_eq!(err.contexts(), ["context"]);

    let err = parse("E_SOMEERROR: message (context) [attribute: value]").unwrap();
    assert_eq!(err.attribute("attribute"), Some(&AttributeValue::from("value")));

    let err = parse("E_SOMEERROR: message (context) [attribute: (int)-1]").unwrap();
    assert_eq!(err.attribute("attribute"), Some(&AttributeValue::Int(-1)));
}

#[test]
fn test_rejection_set() {
    assert!(parse("E_SOMEERROR:").is_none());
    assert!(parse("E_SOMEERROR: message (").is_none());
    assert!(parse("E_SOMEERROR: message (context) [").is_none());
    assert!(parse("E_SOMEERROR: message [attribute]").is_none());
}

#[test]
fn test_rejects_malformed_hand_written_text() {
    for input in [
        "",
        "   ",
        "E_X: message ()",
        "E_X: message (context;)",
        "E_X: message (;context)",
        "E_X: message []",
        "E_X: message [key:value]",
        "E_X: message [key: (float)not-a-number]",
        "E_X: \"unterminated",
        "E_X: message [\"unterminated: v]",
        "E_X: message (context) junk",
    ] {
        assert!(parse(input).is_none(), "{:?} should be rejected", input);
    }
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let err = parse_with_options("  E_X: message (context)\n", &exact()).unwrap();
    assert_eq!(err.to_string(), "E_X: message (context)");
}

#[test]
fn test_trailing_input_can_be_tolerated() {
    let options = ParseOptions {
        allow_trailing_input: true,
        ..exact()
    };
    let err = parse_with_options("E_X: message (context) junk", &options).unwrap();
    assert_eq!(err.contexts(), ["context"]);
}

#[test]
fn test_context_order_preserved() {
    let err = bare(E_SOMEERROR, "msg").with_context("a").with_context("b");
    assert_eq!(err.to_string(), "E_SOMEERROR: msg (a; b)");
    assert_eq!(roundtrip(&err).contexts, vec!["a", "b"]);
}

#[test]
fn test_attributes_render_sorted() {
    let err = bare(E_SOMEERROR, "msg")
        .with_attribute("zeta", 1)
        .with_attribute("alpha", "first")
        .with_attribute("mid", true);
    assert_eq!(
        err.to_string(),
        "E_SOMEERROR: msg [alpha: first, mid: (bool)true, zeta: (int)1]"
    );
}

#[test]
fn test_escaping_roundtrips_exactly() {
    let err = bare("E:WEIRD \"ID\"", "a: (b) [c] \"quoted\" \\ back")
        .with_context("x; (y)")
        .with_context("\"only quotes\"")
        .with_context("comma, inside")
        .with_attribute("k: [1], \"2\"", "v: [1], \"2\"")
        .with_attribute("looks typed", "(int)42")
        .with_attribute("", "")
        .with_attribute(" padded ", " padded ");

    let map = roundtrip(&err);
    assert_eq!(map, err.to_map());
    assert_eq!(map.attributes.get("looks typed"), Some(&AttributeValue::from("(int)42")));
}

#[test]
fn test_typed_values_roundtrip() {
    let err = bare(E_SOMEERROR, "typed")
        .with_attribute("bool", false)
        .with_attribute("int", i64::MIN)
        .with_attribute("uint", u64::MAX)
        .with_attribute("float", 3.14)
        .with_attribute("whole float", 2.0)
        .with_attribute("null", None::<i32>);

    let map = roundtrip(&err);
    assert_eq!(map, err.to_map());
    assert_eq!(map.attributes.get("whole float"), Some(&AttributeValue::Float(2.0)));
    assert_eq!(map.attributes.get("uint"), Some(&AttributeValue::Uint(u64::MAX)));
}

#[test]
fn test_default_roundtrip_includes_stacktrace() {
    let err = EnhancedError::new(E_SOMEERROR, "with a real backtrace").with_context("ctx");
    let parsed = parse(&err.to_string()).unwrap();
    assert_eq!(parsed.to_map(), err.to_map());
}

#[test]
fn test_map_transport_via_json() {
    let err = bare(E_SOMEERROR, "msg")
        .with_context("ctx")
        .with_attribute("count", 2)
        .with_attribute("size", 2u64)
        .with_attribute("ratio", 0.25);

    let json = serde_json::to_string(&err).unwrap();
    let map: ErrorMap = serde_json::from_str(&json).unwrap();
    assert_eq!(map, err.to_map());
    assert_eq!(map.attributes.get("size"), Some(&AttributeValue::Uint(2)));
    assert_eq!(EnhancedError::from_map(map).to_string(), err.to_string());
}

fn token() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[a-zA-Z0-9 :;,()\[\]"\\]{0,12}"#).unwrap()
}

fn attribute_value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        token().prop_map(AttributeValue::String),
        any::<bool>().prop_map(AttributeValue::Bool),
        any::<i64>().prop_map(AttributeValue::Int),
        any::<u64>().prop_map(AttributeValue::Uint),
        (-1.0e12f64..1.0e12).prop_map(AttributeValue::Float),
        Just(AttributeValue::Null),
    ]
}

proptest! {
    #[test]
    fn prop_render_parse_roundtrip(
        identifier in token(),
        message in token(),
        contexts in prop::collection::vec(token(), 0..4),
        attributes in prop::collection::vec((token(), attribute_value()), 0..4),
    ) {
        let mut err = bare(&identifier, &message);
        for context in &contexts {
            err.in_context(context.clone());
        }
        for (key, value) in attributes {
            err.set_attribute(key, value);
        }

        let parsed = parse_with_options(&err.to_string(), &exact());
        prop_assert!(parsed.is_some(), "rejected: {}", err);
        prop_assert_eq!(parsed.unwrap().to_map(), err.to_map());
    }
}
