//! Immutable, identity-tagged row sets produced by one fetch cycle

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Rows from a single fetch cycle. Cloning shares the rows; a new fetch
/// produces a new `id`, which is what tables compare to reset paging.
#[derive(Debug)]
pub struct Dataset<T> {
    id: Uuid,
    fetched_at: DateTime<Utc>,
    rows: Arc<[T]>,
}

impl<T> Dataset<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            id: Uuid::new_v4(),
            fetched_at: Utc::now(),
            rows: rows.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Clone for Dataset<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            fetched_at: self.fetched_at,
            rows: Arc::clone(&self.rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity_and_new_datasets_do_not() {
        let first = Dataset::new(vec![1, 2, 3]);
        let copy = first.clone();
        let second = Dataset::new(vec![1, 2, 3]);

        assert_eq!(first.id(), copy.id());
        assert_ne!(first.id(), second.id());
        assert_eq!(copy.rows(), &[1, 2, 3]);
        assert_eq!(first.len(), 3);
    }
}
