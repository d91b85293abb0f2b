use serde::{Deserialize, Serialize};

/// List endpoints answer either with a plain array or, when `limit` is sent,
/// with a paginated envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged { count: usize, results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn total_count(&self) -> usize {
        match self {
            ListResponse::Paged { count, .. } => *count,
            ListResponse::Plain(items) => items.len(),
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paged { results, .. } => results,
            ListResponse::Plain(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_paged_lists() {
        let plain: ListResponse<i64> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(plain.total_count(), 3);
        assert_eq!(plain.into_items(), vec![1, 2, 3]);

        let paged: ListResponse<i64> =
            serde_json::from_str(r#"{"count": 40, "next": null, "results": [5]}"#).unwrap();
        assert_eq!(paged.total_count(), 40);
        assert_eq!(paged.into_items(), vec![5]);
    }
}
