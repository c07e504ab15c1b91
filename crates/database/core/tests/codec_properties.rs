//! Property tests for the Base64 codec and version ordering.

use std::cmp::Ordering;

use database_core::base64::{decode, decode_to_string, encode};
use database_core::compare_versions;
use proptest::prelude::*;

fn version_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..50, 1..5).prop_map(|segments| {
        segments
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

proptest! {
    #[test]
    fn base64_round_trips_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let encoded = encode(&bytes);
        prop_assert_eq!(encoded.len() % 4, 0);
        prop_assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn base64_round_trips_text(text in ".{0,64}") {
        prop_assert_eq!(decode_to_string(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn base64_output_stays_in_alphabet(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = encode(&bytes);
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn version_comparison_is_antisymmetric(a in version_strategy(), b in version_strategy()) {
        prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
    }

    #[test]
    fn trailing_zero_segments_do_not_matter(v in version_strategy(), zeros in 0usize..3) {
        let padded = format!("{v}{}", ".0".repeat(zeros));
        prop_assert_eq!(compare_versions(&v, &padded), Ordering::Equal);
    }
}

#[test]
fn hello_round_trips() {
    assert_eq!(decode_to_string(&encode("Hello")).unwrap(), "Hello");
    assert_eq!(encode(""), "");
}
