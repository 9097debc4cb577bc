use serde::Deserialize;

use super::deserializers::{deserialize_page, first_page};

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

/// Items of the 1-indexed `page`. Pages past the end, and pages below 1, are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(QUESTIONS_PER_PAGE);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn page_of(uri: &'static str) -> i64 {
        let uri = Uri::from_static(uri);
        Query::<PageQuery>::try_from_uri(&uri).unwrap().0.page
    }

    #[test]
    fn slices_ten_per_page() {
        let items: Vec<i32> = (1..=25).collect();
        assert_eq!(paginate(items.clone(), 1), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 2), (11..=20).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 3), (21..=25).collect::<Vec<_>>());
        assert!(paginate(items, 4).is_empty());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<i32> = (1..=25).collect();
        assert!(paginate(items.clone(), 0).is_empty());
        assert!(paginate(items.clone(), -3).is_empty());
        assert!(paginate(items, i64::MAX).is_empty());
        assert!(paginate(Vec::<i32>::new(), 1).is_empty());
    }

    #[test]
    fn page_query_defaults_to_first_page() {
        assert_eq!(page_of("/questions"), 1);
        assert_eq!(page_of("/questions?page=3"), 3);
        assert_eq!(page_of("/questions?page=abc"), 1);
        assert_eq!(page_of("/questions?other=2"), 1);
    }
}
