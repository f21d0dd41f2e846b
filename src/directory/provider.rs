//! Directory provider seam.

use async_trait::async_trait;
use mockall::automock;

use crate::directory::{Directory, DirectoryError};

/// Source of the console's user directory and permission matrix.
///
/// Every `load` is a fresh read of the backing resource. Callers that want a
/// session-long snapshot hold the returned [`Directory`] themselves.
#[automock]
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Fetch and parse the directory document.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing resource cannot be fetched or
    /// parsed.
    async fn load(&self) -> Result<Directory, DirectoryError>;
}
