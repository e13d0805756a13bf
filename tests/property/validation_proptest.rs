//! Property-based tests for input validation

use proptest::prelude::*;
use townsquare::shared::validation::{
    validate_body, validate_chat_content, validate_community_name, validate_title,
    validate_username, BODY_MAX, TITLE_MAX,
};

proptest! {
    #[test]
    fn test_well_formed_usernames_accepted(name in "[a-zA-Z][a-zA-Z0-9_]{2,29}") {
        prop_assert!(validate_username(&name).is_ok());
    }

    #[test]
    fn test_usernames_with_other_characters_rejected(
        prefix in "[a-z]{1,5}",
        bad in "[ !@#$%^&*().,-]",
        suffix in "[a-z]{1,5}",
    ) {
        let name = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(validate_username(&name).is_err());
    }

    #[test]
    fn test_community_names_are_lowercase(name in "[a-z][a-z0-9_-]{2,29}") {
        prop_assert!(validate_community_name(&name).is_ok());
        let upper = name.to_uppercase();
        prop_assert!(validate_community_name(&upper).is_err());
    }

    #[test]
    fn test_title_result_is_trimmed(core in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,50}[a-zA-Z0-9]", pad in " {0,5}") {
        let padded = format!("{}{}{}", pad, core, pad);
        prop_assert_eq!(validate_title(&padded).unwrap(), core.as_str());
    }

    #[test]
    fn test_whitespace_only_is_never_accepted(blank in "[ \t\n]{0,20}") {
        prop_assert!(validate_title(&blank).is_err());
        prop_assert!(validate_body(&blank).is_err());
        prop_assert!(validate_chat_content(&blank, 100).is_err());
    }

    #[test]
    fn test_length_limits(extra in 1usize..50) {
        prop_assert!(validate_title(&"t".repeat(TITLE_MAX)).is_ok());
        prop_assert!(validate_title(&"t".repeat(TITLE_MAX + extra)).is_err());
        prop_assert!(validate_body(&"b".repeat(BODY_MAX + extra)).is_err());
    }

    #[test]
    fn test_chat_limit_counts_characters(max in 1usize..64) {
        let exact = "é".repeat(max);
        prop_assert!(validate_chat_content(&exact, max).is_ok());
        let over = "é".repeat(max + 1);
        prop_assert!(validate_chat_content(&over, max).is_err());
    }
}
