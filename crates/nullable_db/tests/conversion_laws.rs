//! Property tests for the conversion laws.
//!
//! - values that fit a width always coerce into it
//! - non-text sources coerce exactly as their textual form parses
//! - null always clears, never errors
//! - project then coerce restores the original value
//! - byte buffers are never aliased

use nullable_db::coerce::coerce;
use nullable_db::shape::{parse_signed, parse_unsigned, stringify};
use nullable_db::{CoercionError, DbValue, IntWidth, Nullable, ParseFailure, SourceValue, ToDbValue};
use proptest::prelude::*;

/// Sources that reach integer destinations through their textual form.
fn non_text_source() -> impl Strategy<Value = SourceValue<'static>> {
    prop_oneof![
        any::<i64>().prop_map(SourceValue::Integer),
        any::<u64>().prop_map(SourceValue::Unsigned),
        any::<f64>().prop_map(SourceValue::Real),
        any::<f32>().prop_map(SourceValue::Real32),
        (-1_000_000i64..1_000_000).prop_map(|v| SourceValue::Real(v as f64)),
        (-70_000i32..70_000).prop_map(|v| SourceValue::Real32(v as f32)),
        (0i32..25).prop_map(|e| SourceValue::Real(10f64.powi(e))),
        any::<bool>().prop_map(SourceValue::Boolean),
    ]
}

fn parse_cause<T>(result: Result<T, CoercionError>) -> Result<T, ParseFailure> {
    result.map_err(|err| match err {
        CoercionError::ConversionFailed { cause, .. } => cause,
        other => panic!("unexpected error: {:?}", other),
    })
}

fn restore<T>(value: &T) -> T
where
    T: ToDbValue + nullable_db::FromDbValue,
{
    let payload = value.to_db_value().expect("projection failed");
    Nullable::<T>::from_source(payload.as_source())
        .expect("coercion failed")
        .into_option()
        .expect("container left empty")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn test_fitting_integers_coerce(v in any::<i64>()) {
        let text = v.to_string();
        let fits_i8 = i8::try_from(v).is_ok();
        let fits_i32 = i32::try_from(v).is_ok();
        let fits_u16 = u16::try_from(v).is_ok();

        prop_assert_eq!(Nullable::<i8>::from_source(SourceValue::Text(&text)).is_ok(), fits_i8);
        prop_assert_eq!(Nullable::<i32>::from_source(SourceValue::Integer(v)).is_ok(), fits_i32);
        prop_assert_eq!(Nullable::<u16>::from_source(SourceValue::Integer(v)).is_ok(), fits_u16);

        let stored = Nullable::<i64>::from_source(SourceValue::Text(&text)).unwrap();
        prop_assert_eq!(stored.into_option(), Some(v));
    }

    #[test]
    fn test_non_text_sources_follow_their_text(src in non_text_source()) {
        let text = stringify(&src).unwrap();
        prop_assert_eq!(
            parse_cause(coerce::<i8>(src)).map(i64::from),
            parse_signed(&text, IntWidth::W8)
        );
        prop_assert_eq!(
            parse_cause(coerce::<i32>(src)).map(i64::from),
            parse_signed(&text, IntWidth::W32)
        );
        prop_assert_eq!(parse_cause(coerce::<i64>(src)), parse_signed(&text, IntWidth::W64));
        prop_assert_eq!(
            parse_cause(coerce::<u16>(src)).map(u64::from),
            parse_unsigned(&text, IntWidth::W16)
        );
        prop_assert_eq!(parse_cause(coerce::<u64>(src)), parse_unsigned(&text, IntWidth::W64));
    }

    #[test]
    fn test_unsigned_text_coerces(v in any::<u64>()) {
        let text = v.to_string();
        let stored = Nullable::<u64>::from_source(SourceValue::Text(&text)).unwrap();
        prop_assert_eq!(stored.into_option(), Some(v));
        prop_assert_eq!(
            Nullable::<u32>::from_source(SourceValue::Unsigned(v)).is_ok(),
            u32::try_from(v).is_ok()
        );
    }

    #[test]
    fn test_null_always_clears(seed in any::<i64>()) {
        let mut a = Nullable::some(seed);
        let mut b = Nullable::some(seed.to_string());
        let mut c = Nullable::some(seed as f64);
        prop_assert!(a.scan(SourceValue::Null).is_ok());
        prop_assert!(b.scan(SourceValue::Null).is_ok());
        prop_assert!(c.scan(SourceValue::Null).is_ok());
        prop_assert!(!a.is_present() && !b.is_present() && !c.is_present());
    }

    #[test]
    fn test_round_trip_integers(a in any::<i8>(), b in any::<i32>(), c in any::<i64>(), d in any::<u32>()) {
        prop_assert_eq!(restore(&a), a);
        prop_assert_eq!(restore(&b), b);
        prop_assert_eq!(restore(&c), c);
        prop_assert_eq!(restore(&d), d);
    }

    #[test]
    fn test_round_trip_u64_in_range(v in 0..=i64::MAX as u64) {
        prop_assert_eq!(restore(&v), v);
    }

    #[test]
    fn test_round_trip_floats(a in any::<f64>().prop_filter("NaN", |v| !v.is_nan()),
                              b in any::<f32>().prop_filter("NaN", |v| !v.is_nan())) {
        prop_assert_eq!(restore(&a), a);
        prop_assert_eq!(restore(&b), b);
    }

    #[test]
    fn test_round_trip_text_and_bytes(text in ".*", bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(restore(&text), text);
        prop_assert_eq!(restore(&bytes), bytes);
    }

    #[test]
    fn test_round_trip_bool(v in any::<bool>()) {
        prop_assert_eq!(restore(&v), v);
    }

    #[test]
    fn test_bytes_never_aliased(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut buffer = bytes.clone();
        let stored = Nullable::<Vec<u8>>::from_source(SourceValue::Blob(&buffer)).unwrap();
        let payload = buffer.to_db_value().unwrap();
        for byte in buffer.iter_mut() {
            *byte = byte.wrapping_add(1);
        }
        prop_assert_eq!(stored.into_option(), Some(bytes.clone()));
        prop_assert_eq!(payload, DbValue::Blob(bytes));
    }
}
