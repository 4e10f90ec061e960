use newsdesk_core::slugify;
use proptest::prelude::*;

proptest! {
    /// Property: slugify is idempotent
    #[test]
    fn prop_slugify_idempotent(title in ".{0,120}") {
        let once = slugify(&title);
        prop_assert_eq!(slugify(&once), once);
    }

    /// Property: output only contains lowercase ASCII alphanumerics and single hyphens
    #[test]
    fn prop_slug_charset(title in ".{0,120}") {
        let slug = slugify(&title);
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// Property: whitespace layout never changes the slug
    #[test]
    fn prop_whitespace_insensitive(words in prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..6)) {
        let single = words.join(" ");
        let spread = words.join(" \t  ");
        prop_assert_eq!(slugify(&single), slugify(&spread));
    }
}

#[test]
fn hello_world_example() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
}
