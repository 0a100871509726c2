//! Properties of the fetch stage and the filter → sort → paginate pipeline
//!
//! These tests exercise the stages directly, without a coordinator.

mod support;

use character_view::prelude::*;
use support::*;

// =============================================================================
// Fetch
// =============================================================================

mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_length_is_sum_of_pages_in_cross_page_order() {
        let pages = vec![
            numbered(20),
            (21..=40)
                .map(|id| record(id, "B", "Dead", "Alien", "Female"))
                .collect(),
            (41..=43)
                .map(|id| record(id, "C", "unknown", "Robot", "Genderless"))
                .collect(),
        ];
        let expected: usize = pages.iter().map(Vec::len).sum();
        let source = Arc::new(StaticPageSource::new(pages));

        let records = DatasetFetcher::new(source).fetch_all().await.unwrap();

        assert_eq!(records.len(), expected);
        assert_eq!(ids(&records), (1..=43).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_empty_pages_in_the_middle_are_followed() {
        let pages = vec![
            numbered(2),
            Vec::new(),
            vec![record(3, "C", "Alive", "Human", "Male")],
        ];
        let source = Arc::new(StaticPageSource::new(pages));

        let records = DatasetFetcher::new(source).fetch_all().await.unwrap();
        assert_eq!(ids(&records), vec![1, 2, 3]);
    }
}

// =============================================================================
// Filter
// =============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_filter_is_idempotent() {
        let records = mixed_status();
        let criteria = FilterCriteria {
            name: "smith".to_string(),
            status: "alive".to_string(),
            ..Default::default()
        };

        let once = filter(&records, &criteria);
        let twice = filter(once.iter().copied(), &criteria);

        assert_eq!(ref_ids(&once), ref_ids(&twice));
    }

    #[test]
    fn test_empty_criteria_returns_collection_unchanged() {
        let records = mixed_status();
        let result = filter(&records, &FilterCriteria::default());

        assert_eq!(result.len(), records.len());
        assert!(result.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_status_alive_scenario() {
        let records = mixed_status();
        let criteria = FilterCriteria {
            status: "Alive".to_string(),
            ..Default::default()
        };

        let result = filter(&records, &criteria);

        assert_eq!(result.len(), 3);
        assert_eq!(ref_ids(&result), vec![1, 3, 5]);
    }
}

// =============================================================================
// Sort
// =============================================================================

mod sort_tests {
    use super::*;

    #[test]
    fn test_name_descending_locale_aware() {
        let records = vec![
            record(1, "Beta", "Alive", "Human", "Male"),
            record(2, "alpha", "Alive", "Human", "Male"),
            record(3, "Gamma", "Alive", "Human", "Male"),
        ];
        let spec = SortSpec::new(SortField::Name, SortDirection::Desc);

        let sorted = sort(records.iter().collect(), &spec);
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Gamma", "Beta", "alpha"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = mixed_status();

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let spec = SortSpec::new(SortField::Status, direction);
            let sorted = sort(records.iter().collect(), &spec);

            // Within each status, ids keep their input order
            for status in ["Alive", "Dead", "unknown"] {
                let group: Vec<u64> = sorted
                    .iter()
                    .filter(|r| r.status == status)
                    .map(|r| r.id)
                    .collect();
                let mut expected = group.clone();
                expected.sort_unstable();
                assert_eq!(group, expected, "{status} ties reordered ({direction:?})");
            }
        }
    }
}

// =============================================================================
// Paginate
// =============================================================================

mod paginate_tests {
    use super::*;

    #[test]
    fn test_total_pages_formula() {
        for count in 1..=57usize {
            for size in [1usize, 3, 10, 20, 30] {
                assert_eq!(total_pages(count, size), count.div_ceil(size));
            }
        }
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn test_twenty_five_records_three_pages() {
        let records = numbered(25);

        let first = paginate(&records, 10, 1);
        assert_eq!(first.meta.total_pages, 3);
        assert_eq!(ids(first.items), (1..=10).collect::<Vec<_>>());

        let third = paginate(&records, 10, 3);
        assert_eq!(ids(third.items), vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_page_is_contiguous_and_bounded() {
        let records = numbered(43);
        for index in 1..=5 {
            let page = paginate(&records, 10, index);
            assert!(page.items.len() <= 10);
            let page_ids = ids(page.items);
            assert!(page_ids.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }
}
