//! Property-based tests for paging

use proptest::prelude::*;
use townsquare::shared::{Page, PageParams, PageRequest};

proptest! {
    #[test]
    fn test_resolved_size_within_bounds(
        page in proptest::option::of(0u32..1000),
        size in proptest::option::of(0u32..1000),
        default_size in 1u32..50,
        extra in 0u32..100,
    ) {
        let max_size = default_size + extra;
        let params = PageRequest { page, size }.resolve(default_size, max_size);
        prop_assert!(params.size >= 1);
        prop_assert!(params.size <= max_size);
        prop_assert_eq!(params.page, page.unwrap_or(0));
    }

    #[test]
    fn test_pages_partition_the_items(len in 0usize..200, size in 1u32..30) {
        let items: Vec<usize> = (0..len).collect();
        let first = Page::from_slice(&items, PageParams::new(0, size));
        let total_pages = first.total_pages;

        let mut collected = Vec::new();
        for page in 0..total_pages as u32 {
            let chunk = Page::from_slice(&items, PageParams::new(page, size));
            prop_assert_eq!(chunk.total_elements, len as u64);
            prop_assert!(chunk.content.len() <= size as usize);
            prop_assert_eq!(chunk.has_next(), (page as u64 + 1) < total_pages);
            collected.extend(chunk.content);
        }
        prop_assert_eq!(collected, items);
    }

    #[test]
    fn test_past_the_end_is_empty(len in 0usize..50, size in 1u32..10, beyond in 0u32..5) {
        let items: Vec<usize> = (0..len).collect();
        let last = Page::from_slice(&items, PageParams::new(0, size)).total_pages as u32;
        let page = Page::from_slice(&items, PageParams::new(last + beyond, size));
        prop_assert!(page.content.is_empty());
        prop_assert!(!page.has_next());
    }
}
