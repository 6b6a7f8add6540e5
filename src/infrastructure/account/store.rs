//! In-memory account store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{AccountKind, AccountRecord, AccountStore, LookupField};
use crate::domain::DomainError;

/// Volatile store keeping one insertion-ordered collection per account kind.
///
/// Lookups are linear scans; the first matching record wins.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    collections: Arc<RwLock<HashMap<AccountKind, Vec<AccountRecord>>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, appended in order
    #[cfg(test)]
    pub fn with_records(records: Vec<AccountRecord>) -> Self {
        let mut collections: HashMap<AccountKind, Vec<AccountRecord>> = HashMap::new();

        for record in records {
            collections.entry(record.kind()).or_default().push(record);
        }

        Self {
            collections: Arc::new(RwLock::new(collections)),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn append(&self, kind: AccountKind, record: AccountRecord) -> Result<(), DomainError> {
        if record.kind() != kind {
            return Err(DomainError::internal(format!(
                "Cannot store a {} record in the {} collection",
                record.kind(),
                kind
            )));
        }

        let mut collections = self.collections.write().await;
        collections.entry(kind).or_default().push(record);

        Ok(())
    }

    async fn find_by(
        &self,
        kind: AccountKind,
        field: LookupField,
        value: &str,
    ) -> Result<Option<AccountRecord>, DomainError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.field(field) == Some(value)))
            .cloned())
    }

    async fn exists_by(
        &self,
        kind: AccountKind,
        field: LookupField,
        value: &str,
    ) -> Result<bool, DomainError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&kind)
            .is_some_and(|records| records.iter().any(|r| r.field(field) == Some(value))))
    }

    async fn count(&self, kind: AccountKind) -> Result<usize, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&kind).map_or(0, Vec::len))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.collections.write().await.clear();
        Ok(())
    }
}
