//! Backend directory service

use crate::error::Result;
use crate::types::DirectoryRecord;
use async_trait::async_trait;

/// Maps an identity token to the application-level user record
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Look up the caller identified by `token`.
    ///
    /// Any non-success response or transport error is an `Err`.
    async fn lookup(&self, token: &str) -> Result<DirectoryRecord>;
}
