mod common;

use common::*;
use dynserd::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_log::test;

fn nested(depth: usize) -> String {
    format!("{}{}", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn syntax_errors_are_not_decode_errors() {
    let err = from_str::<Page<Lossy>>(r#"{"content": [1, 2}"#)
        .map(|_| ())
        .unwrap_err();

    match err {
        Error::Syntax { message, line, .. } => {
            assert_eq!(line, 1);
            assert!(message.starts_with("expected `,` or `]`"), "{}", message);
        }
        e => panic!("expected a syntax error, got {}", e),
    }

    // even the lossy policy only covers what parsed
    assert!(matches!(
        from_str::<LossyArray<ByKey<PostKey>>>("[{]").map(|_| ()),
        Err(Error::Syntax { .. })
    ));
}

#[test]
fn error_lines_point_into_the_text() {
    let json = "{\n  \"content\": [\n    {\"type\": \"text\",}\n  ]\n}";
    let err = from_str::<Value>(json).unwrap_err();
    match err {
        Error::Syntax { message, line, column } => {
            assert_eq!(line, 3);
            assert!(column > 1);
            assert!(message.starts_with("trailing comma"), "{}", message);
        }
        e => panic!("expected a syntax error, got {}", e),
    }
}

#[test]
fn deep_nesting_is_refused() {
    let err = from_str::<Value>(&nested(1000)).unwrap_err();
    assert!(matches!(
        &err,
        Error::Syntax { message, .. } if message.starts_with("recursion limit exceeded")
    ));

    // the same depth under a lossy policy is still a syntax error
    let err = from_str::<LossyArray<ByKey<PostKey>>>(&nested(5000))
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));

    let value = from_str::<Value>(&nested(100)).unwrap();
    let mut depth = 0;
    let mut node = &value;
    while let Some(inner) = node.as_array().and_then(|a| a.first()) {
        depth += 1;
        node = inner;
    }
    assert_eq!(depth, 99);
}

#[test]
fn escaped_text_round_trips() {
    let original = post(PostType::Text, 1);
    let mut value = original.clone();
    if let Some(fields) = value.as_object_mut() {
        fields.insert(
            "text".into(),
            Value::from("tab\tquote\" slash\\ caf\u{e9} \u{1f600}\u{1}"),
        );
    }

    let compact = serde_json::to_string(&value).unwrap();
    assert!(compact.contains(r#"tab\tquote\" slash\\ caf"#));
    assert!(compact.contains(r#"\u0001"#));
    let pretty = serde_json::to_string_pretty(&value).unwrap();

    for json in &[compact, pretty] {
        let decoded = from_str::<DynamicValue<ByKey<PostKey>>>(json).unwrap();
        assert_eq!(Value::dyn_enc(&decoded), Ok(value.clone()));
    }
    assert_ne!(value, original);

    let escaped = from_str::<String>(r#""café 😀""#).unwrap();
    assert_eq!(escaped, "caf\u{e9} \u{1f600}");
}

#[test]
fn large_and_negative_numbers() {
    let value: Value = from_str("[18446744073709551615, -9223372036854775808, 86.0]").unwrap();
    let numbers = value.as_array().unwrap();

    assert_eq!(numbers[0], Value::from(u64::MAX));
    assert_eq!(numbers[1], Value::from(i64::MIN));
    assert_eq!(numbers[0].decode::<u64>(), Ok(u64::MAX));
    assert!(numbers[1].decode::<u64>().is_err());
    assert_eq!(numbers[2].decode::<u8>(), Ok(86));

    // no f64 holds it, so it is not a number at all
    assert!(matches!(
        from_str::<Value>("[1e400]"),
        Err(Error::Syntax { message, .. }) if message.starts_with("number out of range")
    ));
}

#[test]
fn negative_zero_keeps_its_sign() {
    let json = serde_json::to_string(&json!([-0.0, 0.0])).unwrap();
    assert_eq!(json, "[-0.0,0.0]");

    let zeros = from_str::<Vec<f64>>(&json).unwrap();
    assert!(zeros[0].is_sign_negative());
    assert!(zeros[1].is_sign_positive());

    let again = Value::enc(&zeros).unwrap();
    assert_eq!(serde_json::to_string(&again).unwrap(), json);
}
