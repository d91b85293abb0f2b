/// Lifecycle of a single loaded record.
///
/// `Loaded` and `Failed` remember the pk they belong to, so a pk change shows
/// a fresh loading state while a refresh of the same pk keeps the old value.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceState<T> {
    NotLoaded,
    Loading,
    Loaded { pk: i64, value: T },
    Failed { pk: i64, error: String },
}

impl<T> InstanceState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            InstanceState::Loaded { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            InstanceState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<i64> {
        match self {
            InstanceState::Loaded { pk, .. } | InstanceState::Failed { pk, .. } => Some(*pk),
            _ => None,
        }
    }
}

impl<T> Default for InstanceState<T> {
    fn default() -> Self {
        InstanceState::NotLoaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loaded = InstanceState::Loaded { pk: 3, value: "Shelf" };
        assert_eq!(loaded.value(), Some(&"Shelf"));
        assert_eq!(loaded.key(), Some(3));
        assert!(loaded.error().is_none());

        let failed: InstanceState<&str> = InstanceState::Failed {
            pk: 3,
            error: "Not found".into(),
        };
        assert_eq!(failed.error(), Some("Not found"));
        assert!(failed.value().is_none());

        assert_eq!(InstanceState::<()>::default().key(), None);
    }
}
