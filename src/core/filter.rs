//! Shared substring filtering for list and search surfaces
//!
//! Every surface that narrows a list funnels through the same predicate so
//! filtering behaves identically everywhere: case-insensitive substring
//! match, and an empty or whitespace query leaves the list untouched.

/// Check whether a query matches any of the given fields.
///
/// Matching is a case-insensitive substring test. An empty or
/// whitespace-only query matches everything.
pub fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(&needle))
}

/// Filter a list by query, preserving the input order.
///
/// `fields` extracts the searchable text from each item. An empty query
/// returns the full list unfiltered.
pub fn filter_by_query<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<Option<&str>>,
{
    items
        .iter()
        .filter(|item| matches_query(query, &fields(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        description: Option<&'static str>,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "Shopify",
                description: Some("E-commerce platform"),
            },
            Item {
                name: "Notion",
                description: Some("All-in-one workspace"),
            },
            Item {
                name: "Figma",
                description: None,
            },
        ]
    }

    fn fields(item: &Item) -> Vec<Option<&str>> {
        vec![Some(item.name), item.description]
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let list = items();
        let filtered = filter_by_query(&list, "", fields);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].name, "Shopify");
        assert_eq!(filtered[2].name, "Figma");
    }

    #[test]
    fn test_whitespace_query_returns_all() {
        let list = items();
        let filtered = filter_by_query(&list, "   ", fields);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let list = items();
        let filtered = filter_by_query(&list, "SHOP", fields);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Shopify");
    }

    #[test]
    fn test_match_against_description() {
        let list = items();
        let filtered = filter_by_query(&list, "workspace", fields);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Notion");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let list = items();
        let filtered = filter_by_query(&list, "zzz", fields);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_none_fields_are_skipped() {
        assert!(!matches_query("anything", &[None, None]));
        assert!(matches_query("", &[None]));
    }
}
