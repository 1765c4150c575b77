use crate::{
    error::ErrorClass,
    key::{KeyTuple, decode_value, encode_value, format_for_key, next_value, value_from_key_string},
    model::TypeDescriptor,
    types::{Float32, Float64, Number, Timestamp},
    value::Value,
};
use proptest::prelude::*;
use std::cmp::Ordering;

fn encoded(value: &Value) -> Vec<u8> {
    encode_value(value).expect("value should encode")
}

fn assert_encoded_order(left: &Value, right: &Value, expected: Ordering) {
    assert_eq!(
        encoded(left).cmp(&encoded(right)),
        expected,
        "encoded order of {left:?} vs {right:?}"
    );
}

fn arb_number() -> impl Strategy<Value = Number> {
    (any::<i64>(), -30i64..30).prop_map(|(mantissa, scale)| Number::new(mantissa, scale))
}

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (
        Timestamp::MIN_SECONDS..=Timestamp::MAX_SECONDS,
        0u32..1_000_000_000,
    )
        .prop_map(|(seconds, nanos)| Timestamp::new(seconds, nanos, 9).expect("in range"))
}

proptest! {
    #[test]
    fn integer_byte_order_matches_value_order(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(
            encoded(&Value::Integer(a)).cmp(&encoded(&Value::Integer(b))),
            a.cmp(&b)
        );
    }

    #[test]
    fn long_byte_order_matches_value_order(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(
            encoded(&Value::Long(a)).cmp(&encoded(&Value::Long(b))),
            a.cmp(&b)
        );
    }

    #[test]
    fn double_byte_order_matches_total_order(a in any::<f64>(), b in any::<f64>()) {
        let (a, b) = (Float64::new(a), Float64::new(b));
        prop_assert_eq!(
            encoded(&Value::Double(a)).cmp(&encoded(&Value::Double(b))),
            a.cmp(&b)
        );
    }

    #[test]
    fn float_byte_order_matches_total_order(a in any::<f32>(), b in any::<f32>()) {
        let (a, b) = (Float32::new(a), Float32::new(b));
        prop_assert_eq!(
            encoded(&Value::Float(a)).cmp(&encoded(&Value::Float(b))),
            a.cmp(&b)
        );
    }

    #[test]
    fn number_byte_order_matches_decimal_order(a in arb_number(), b in arb_number()) {
        let expected = a.cmp(&b);
        prop_assert_eq!(
            encoded(&Value::Number(a)).cmp(&encoded(&Value::Number(b))),
            expected
        );
    }

    #[test]
    fn number_decodes_to_the_same_decimal(n in arb_number()) {
        let value = Value::Number(n);
        let decoded = decode_value(&encoded(&value), &TypeDescriptor::number())
            .expect("number decodes");
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn string_byte_order_matches_byte_order(a in any::<String>(), b in any::<String>()) {
        let expected = a.as_bytes().cmp(b.as_bytes());
        prop_assert_eq!(
            encoded(&Value::String(a)).cmp(&encoded(&Value::String(b))),
            expected
        );
    }

    #[test]
    fn string_decodes_including_embedded_nuls(s in "[a-z\u{0}\u{1}\u{ff}]{0,12}") {
        let value = Value::String(s);
        let decoded = decode_value(&encoded(&value), &TypeDescriptor::string())
            .expect("string decodes");
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn timestamp_byte_order_matches_instant_order(a in arb_timestamp(), b in arb_timestamp()) {
        prop_assert_eq!(
            encoded(&Value::Timestamp(a)).cmp(&encoded(&Value::Timestamp(b))),
            a.cmp(&b)
        );
    }

    #[test]
    fn long_key_string_order_matches_value_order(a in any::<i64>(), b in any::<i64>()) {
        let left = format_for_key(&Value::Long(a)).expect("key string");
        let right = format_for_key(&Value::Long(b)).expect("key string");
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
        prop_assert_eq!(
            value_from_key_string(&left, &TypeDescriptor::long()).expect("parse key string"),
            Value::Long(a)
        );
    }

    #[test]
    fn long_successor_sorts_strictly_after(a in any::<i64>()) {
        match next_value(&Value::Long(a)).expect("long has successors") {
            Some(next) => {
                prop_assert_eq!(next.clone(), Value::Long(a + 1));
                prop_assert!(encoded(&next) > encoded(&Value::Long(a)));
            }
            None => prop_assert_eq!(a, i64::MAX),
        }
    }
}

#[test]
fn decimals_order_across_signs_and_exponents() {
    let ordered = [
        "-1e40", "-1000", "-10.5", "-1", "-0.001", "0", "0.001", "0.01", "1", "1.5", "10", "1e40",
    ];

    for pair in ordered.windows(2) {
        let left = Value::number(pair[0]).expect("literal");
        let right = Value::number(pair[1]).expect("literal");
        assert_encoded_order(&left, &right, Ordering::Less);
    }
}

#[test]
fn decimals_at_extreme_scales_encode_and_advance() {
    let ordered = [
        Number::new(-3, i64::MIN),
        Number::new(-1, 0),
        Number::new(7, i64::MAX),
        Number::new(1, 0),
        Number::new(3, i64::MIN),
    ];

    for pair in ordered.windows(2) {
        assert_encoded_order(
            &Value::Number(pair[0].clone()),
            &Value::Number(pair[1].clone()),
            Ordering::Less,
        );
    }

    for number in ordered {
        let value = Value::Number(number);
        let decoded = decode_value(&encoded(&value), &TypeDescriptor::number()).expect("decode");
        assert_eq!(decoded, value);

        let next = next_value(&value).expect("number").expect("decimals always advance");
        assert_encoded_order(&value, &next, Ordering::Less);
    }
}

#[test]
fn float_specials_encode_in_total_order() {
    let ordered = [
        f64::NEG_INFINITY,
        -1.0,
        -0.0,
        0.0,
        f64::MIN_POSITIVE,
        f64::INFINITY,
        f64::NAN,
    ];

    for pair in ordered.windows(2) {
        assert_encoded_order(
            &Value::Double(Float64::new(pair[0])),
            &Value::Double(Float64::new(pair[1])),
            Ordering::Less,
        );
    }
}

#[test]
fn sentinels_encode_after_every_value() {
    let ordered = [
        Value::Long(i64::MAX),
        Value::String("\u{10FFFF}".to_string()),
        Value::Empty,
        Value::JsonNull,
        Value::Null,
    ];

    for pair in ordered.windows(2) {
        assert_encoded_order(&pair[0], &pair[1], Ordering::Less);
    }

    let decoded = decode_value(&encoded(&Value::JsonNull), &TypeDescriptor::long())
        .expect("sentinels decode under any descriptor");
    assert_eq!(decoded, Value::JsonNull);
}

#[test]
fn unsortable_kinds_are_rejected() {
    let list = Value::from_list(vec![1i64]);
    for value in [Value::Binary(vec![1, 2]), list, Value::Absent] {
        let err = encode_value(&value).expect_err("no sortable encoding");
        assert_eq!(err.class, ErrorClass::EncodingUnsupported, "{value:?}");
    }
}

#[test]
fn schema_kinds_decode_back_to_equal_values() {
    let colors = TypeDescriptor::enumeration(["RED", "GREEN", "BLUE"]).expect("enum");
    let timestamp = TypeDescriptor::timestamp(3).expect("precision");
    let cases = [
        (TypeDescriptor::integer(), Value::Integer(i32::MIN)),
        (TypeDescriptor::boolean(), Value::Boolean(true)),
        (TypeDescriptor::fixed_binary(3), Value::FixedBinary(vec![0, 0xFF, 7])),
        (
            timestamp.clone(),
            timestamp
                .create_value(Value::timestamp(-5, 250_000_000, 3).expect("timestamp"))
                .expect("valid timestamp"),
        ),
        (colors.clone(), colors.create_value(Value::from("GREEN")).expect("symbol")),
    ];

    for (descriptor, value) in cases {
        let decoded = decode_value(&encoded(&value), &descriptor).expect("decode");
        assert_eq!(decoded, value);
    }
}

#[test]
fn enum_components_order_by_ordinal() {
    let colors = TypeDescriptor::enumeration(["RED", "GREEN", "BLUE"]).expect("enum");
    let green = colors.create_value(Value::from("GREEN")).expect("symbol");
    let blue = colors.create_value(Value::from("BLUE")).expect("symbol");

    // "BLUE" < "GREEN" as text, but BLUE is declared last.
    assert_encoded_order(&green, &blue, Ordering::Less);
}

#[test]
fn malformed_bytes_are_corruption() {
    let mut bytes = encoded(&Value::Long(5));
    bytes.push(0);
    let trailing = decode_value(&bytes, &TypeDescriptor::long()).expect_err("trailing byte");
    assert_eq!(trailing.class, ErrorClass::Corruption);

    let mismatch = decode_value(&encoded(&Value::Long(5)), &TypeDescriptor::string())
        .expect_err("tag mismatch");
    assert_eq!(mismatch.class, ErrorClass::Corruption);

    let truncated = decode_value(&encoded(&Value::Long(5))[..4], &TypeDescriptor::long())
        .expect_err("truncated");
    assert_eq!(truncated.class, ErrorClass::Corruption);

    assert!(decode_value(&[0x07], &TypeDescriptor::long()).is_err());
}

#[test]
fn tuples_compare_component_by_component() {
    let tuple = |text: &str, n: i64| KeyTuple::new(vec![Value::from(text), Value::Long(n)]);

    let ordered = [tuple("a", 9), tuple("a\0", 0), tuple("ab", 1), tuple("b", 0)];
    for pair in ordered.windows(2) {
        let left = pair[0].encode().expect("encode");
        let right = pair[1].encode().expect("encode");
        assert!(left < right, "{:?} should sort before {:?}", pair[0], pair[1]);
    }

    let descriptors = [TypeDescriptor::string(), TypeDescriptor::long()];
    let refs: Vec<&TypeDescriptor> = descriptors.iter().collect();
    let bytes = tuple("a\0", 0).encode().expect("encode");
    assert_eq!(KeyTuple::decode(&bytes, &refs).expect("decode"), tuple("a\0", 0));
}

#[test]
fn failed_tuple_encoding_leaves_buffer_untouched() {
    let mut out = vec![1, 2, 3];
    let tuple = KeyTuple::new(vec![Value::Long(1), Value::Binary(vec![9])]);

    assert!(tuple.encode_into(&mut out).is_err());
    assert_eq!(out, vec![1, 2, 3]);
}

#[test]
fn successors_cover_bounded_domains() {
    assert_eq!(next_value(&Value::Integer(i32::MAX)).expect("integer"), None);
    assert_eq!(
        next_value(&Value::Boolean(false)).expect("boolean"),
        Some(Value::Boolean(true))
    );
    assert_eq!(next_value(&Value::Boolean(true)).expect("boolean"), None);
    assert_eq!(
        next_value(&Value::from("ab")).expect("string"),
        Some(Value::from("ab\0"))
    );
    assert_eq!(
        next_value(&Value::FixedBinary(vec![0x00, 0xFF])).expect("fixed binary"),
        Some(Value::FixedBinary(vec![0x01, 0x00]))
    );
    assert_eq!(next_value(&Value::FixedBinary(vec![0xFF, 0xFF])).expect("fixed binary"), None);

    let number = Value::number("1.5").expect("literal");
    let next = next_value(&number).expect("number").expect("decimals always advance");
    assert_encoded_order(&number, &next, Ordering::Less);
}

#[test]
fn sentinel_successors_walk_the_sentinel_order() {
    assert_eq!(next_value(&Value::Empty).expect("empty"), Some(Value::JsonNull));
    assert_eq!(next_value(&Value::JsonNull).expect("json null"), Some(Value::Null));
    assert_eq!(next_value(&Value::Null).expect("null"), None);

    let err = next_value(&Value::Binary(vec![1])).expect_err("binary");
    assert!(err.is_encoding_unsupported());
}

#[test]
fn key_strings_are_verbatim_for_strings_and_hex_otherwise() {
    assert_eq!(format_for_key(&Value::from("user:1")).expect("string"), "user:1");
    assert_eq!(
        format_for_key(&Value::Long(5)).expect("long"),
        "8000000000000005"
    );
    assert_eq!(format_for_key(&Value::Boolean(true)).expect("bool"), "01");

    assert!(format_for_key(&Value::Null).is_err());
    assert!(value_from_key_string("zz", &TypeDescriptor::long()).is_err());
    assert!(value_from_key_string("800000000000000", &TypeDescriptor::long()).is_err());
    assert!(value_from_key_string("800000000000000A", &TypeDescriptor::long()).is_err());
    assert_eq!(
        value_from_key_string("800000000000000a", &TypeDescriptor::long()).expect("lowercase"),
        Value::Long(10)
    );
    assert!(value_from_key_string("01", &TypeDescriptor::json()).is_err());
}
