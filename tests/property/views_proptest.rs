//! Property-based tests for view helpers

use proptest::prelude::*;
use synadmin::console::views::{filter_accounts, format_bytes, format_number, format_size};
use synadmin::shared::Account;

fn account(name: String, displayname: Option<String>) -> Account {
    Account {
        name,
        displayname,
        is_admin: false,
        deactivated: false,
        user_type: None,
        avatar_url: None,
        creation_ts: 0,
    }
}

proptest! {
    #[test]
    fn test_filter_is_case_insensitive(
        names in proptest::collection::vec("@[a-zA-Z]{1,10}:x", 0..15),
        term in "[a-zA-Z]{1,3}",
    ) {
        let accounts: Vec<_> = names.into_iter().map(|n| account(n, None)).collect();
        let lower = filter_accounts(&accounts, &term.to_lowercase());
        let upper = filter_accounts(&accounts, &term.to_uppercase());
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn test_filter_matches_displayname(name in "[a-z]{1,10}", display in "[A-Z][a-z]{2,10}") {
        let accounts = vec![account(format!("@{}:x", name), Some(display.clone()))];
        prop_assert_eq!(filter_accounts(&accounts, &display).len(), 1);
    }

    #[test]
    fn test_number_grouping_round_trips(n in any::<u64>()) {
        let formatted = format_number(n);
        prop_assert_eq!(formatted.replace(',', "").parse::<u64>().unwrap(), n);
        for group in formatted.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn test_size_units_match_magnitude(bytes in 0u64..(1u64 << 50)) {
        let unit = format_size(bytes).split(' ').nth(1).unwrap().to_string();
        let expected = match bytes {
            b if b < 1 << 10 => "B",
            b if b < 1 << 20 => "KB",
            b if b < 1 << 30 => "MB",
            b if b < 1 << 40 => "GB",
            _ => "TB",
        };
        prop_assert_eq!(unit, expected);
        prop_assert!(!format_bytes(bytes).is_empty());
    }
}
