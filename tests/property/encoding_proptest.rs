//! Property-based tests for identifier handling
//!
//! Uses proptest to check that any identifier ends up as exactly one path
//! segment under the admin base URL.

use proptest::prelude::*;
use synadmin::console::{encode_segment, Config};
use synadmin::shared::admin::qualify_user_id;
use synadmin::shared::AppConfig;

fn config() -> Config {
    Config::with_builder(AppConfig::builder().server_url("https://hs.example.org/")).unwrap()
}

proptest! {
    #[test]
    fn test_encoded_segment_has_no_delimiters(id in ".+") {
        prop_assume!(id != "." && id != "..");
        let encoded = encode_segment(&id).unwrap();
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains('?'));
        prop_assert!(!encoded.contains('#'));
        prop_assert!(!encoded.contains('@'));
        prop_assert!(!encoded.contains(':'));
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-._~%".contains(c)));
    }

    #[test]
    fn test_encoding_preserves_identifier(id in "[@!#]?[a-zA-Z0-9/_.=-]{1,24}:[a-z0-9.-]{1,24}") {
        let encoded = encode_segment(&id).unwrap();
        let decoded = urlencoding::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_ref(), id.as_str());
    }

    #[test]
    fn test_api_url_keeps_single_segment(
        id in prop_oneof!["[@!][a-z0-9/]{1,16}:[a-z.]{1,16}", "\\.{1,4}", "[a-z.%]{1,6}"]
    ) {
        let encoded = match encode_segment(&id) {
            Ok(encoded) => encoded,
            Err(_) => {
                prop_assert!(id == "." || id == "..");
                return Ok(());
            }
        };
        let url = config().api_url(&format!("/v1/rooms/{}", encoded));
        let parsed = reqwest::Url::parse(&url).unwrap();
        let segments: Vec<_> = parsed.path_segments().unwrap().collect();
        prop_assert_eq!(segments.len(), 5);
        prop_assert_eq!(&segments[..4], &["_synapse", "admin", "v1", "rooms"][..]);
        let decoded = urlencoding::decode(segments[4]).unwrap();
        prop_assert_eq!(decoded.as_ref(), id.as_str());
    }

    #[test]
    fn test_qualified_ids_are_stable(local in "[a-z0-9._=-]{1,20}", server in "[a-z0-9.-]{1,20}") {
        let qualified = qualify_user_id(&local, &server);
        prop_assert_eq!(&qualified, &format!("@{}:{}", local, server));
        prop_assert_eq!(qualify_user_id(&qualified, "other.example"), qualified.clone());
    }
}
