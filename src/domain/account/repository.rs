//! Account store trait

use async_trait::async_trait;

use super::entity::{AccountKind, AccountRecord, LookupField};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Store for account records, one insertion-ordered collection per kind
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Append a record to the collection of `kind`
    async fn append(&self, kind: AccountKind, record: AccountRecord) -> Result<(), DomainError>;

    /// First record of `kind` (in insertion order) whose `field` equals `value`
    async fn find_by(
        &self,
        kind: AccountKind,
        field: LookupField,
        value: &str,
    ) -> Result<Option<AccountRecord>, DomainError>;

    /// Whether any record of `kind` has `field` equal to `value`
    async fn exists_by(
        &self,
        kind: AccountKind,
        field: LookupField,
        value: &str,
    ) -> Result<bool, DomainError> {
        Ok(self.find_by(kind, field, value).await?.is_some())
    }

    /// Number of records of `kind`
    async fn count(&self, kind: AccountKind) -> Result<usize, DomainError>;

    /// Remove every record of every kind
    async fn clear(&self) -> Result<(), DomainError>;
}
