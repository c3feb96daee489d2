//! Property-based tests for argvalid.

use argvalid::checksum;
use argvalid::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// TRIM
// ============================================================================

proptest! {
    #[test]
    fn trim_is_idempotent(s in ".{0,40}") {
        let raw = json!(s);
        let once = StringField::new(Some(&raw), "f").unwrap().trim();
        let twice = once.clone().trim();
        prop_assert_eq!(once.value(), twice.value());
    }

    #[test]
    fn trim_array_leaves_no_blank_items(items in proptest::collection::vec("[ a-c]{0,4}", 0..8)) {
        let raw = json!(items);
        let field = StringArrayField::new(Some(&raw), "f").unwrap().trim_array();
        let kept = field.default_empty_array().into_value();
        prop_assert!(kept.iter().all(|item| !item.trim().is_empty()));
    }
}

// ============================================================================
// LATTICE: missing values never fail a constraint
// ============================================================================

proptest! {
    #[test]
    fn number_constraints_ignore_missing_values(
        null in any::<bool>(),
        min in -1e6f64..1e6,
        max in -1e6f64..1e6,
    ) {
        let null_value = Value::Null;
        let raw = null.then_some(&null_value);
        let field = NumberField::new(raw, "f").unwrap();
        let checked = field
            .min(min)
            .and_then(|f| f.max(max))
            .and_then(|f| f.integer());
        prop_assert!(checked.is_ok());
    }

    #[test]
    fn default_never_fails(value in proptest::option::of(any::<i32>()), fallback in any::<i32>()) {
        let raw = value.map(|v| json!(v));
        let field = NumberField::new(raw.as_ref(), "f").unwrap().default(f64::from(fallback));
        let expected = f64::from(value.unwrap_or(fallback));
        prop_assert_eq!(field.into_value(), expected);
    }
}

// ============================================================================
// COERCION
// ============================================================================

proptest! {
    #[test]
    fn numeric_strings_coerce_like_numbers(n in any::<i32>()) {
        let from_string = NumberField::new(Some(&json!(n.to_string())), "f").unwrap();
        let from_number = NumberField::new(Some(&json!(n)), "f").unwrap();
        prop_assert_eq!(from_string.value(), from_number.value());
    }

    #[test]
    fn object_ids_round_trip(bytes in any::<[u8; 12]>()) {
        let id = ObjectId::from_bytes(bytes);
        let raw = json!(id.to_string().to_uppercase());
        let field = ObjectIdField::new(Some(&raw), "id").unwrap();
        prop_assert_eq!(field.into_value().present(), Some(id));
    }
}

// ============================================================================
// CHECKSUMS
// ============================================================================

proptest! {
    #[test]
    fn iban_detects_adjacent_transpositions(
        a in 0u8..10,
        b in 0u8..10,
    ) {
        prop_assume!(a != b);
        let valid = "DE89370400440532013000";
        prop_assert!(checksum::iban(valid));
        // swapping two distinct adjacent account digits always changes mod 97
        let mut bytes = valid.as_bytes().to_vec();
        bytes[10] = b'0' + a;
        bytes[11] = b'0' + b;
        let first = String::from_utf8(bytes.clone()).unwrap();
        bytes.swap(10, 11);
        let second = String::from_utf8(bytes).unwrap();
        prop_assert!(!(checksum::iban(&first) && checksum::iban(&second)));
    }
}
