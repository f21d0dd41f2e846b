//! App Context

use std::{path::PathBuf, sync::Arc};

use crate::{
    auth::{AuthService, DirectoryAuthService},
    directory::{
        DirectoryProvider, FileDirectoryProvider, HttpDirectoryConfig, HttpDirectoryProvider,
    },
    permissions::PermissionGate,
    session::{FileStorage, SessionStore},
};

/// Wired services for one console process.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub gate: PermissionGate,
    pub store: Arc<SessionStore>,
}

impl AppContext {
    /// Build the context from a directory source and a session file path.
    #[must_use]
    pub fn from_config(directory_source: &str, session_file: impl Into<PathBuf>) -> Self {
        let provider = directory_provider(directory_source);
        let store = Arc::new(SessionStore::new(FileStorage::open(session_file)));

        Self {
            auth: Arc::new(DirectoryAuthService::new(provider, Arc::clone(&store))),
            gate: PermissionGate::new(Arc::clone(&store)),
            store,
        }
    }
}

/// Select a directory provider for `source`.
///
/// Sources starting with `http://` or `https://` use the HTTP provider;
/// anything else is treated as a local document path.
#[must_use]
pub fn directory_provider(source: &str) -> Arc<dyn DirectoryProvider> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Arc::new(HttpDirectoryProvider::new(HttpDirectoryConfig {
            url: source.to_string(),
        }))
    } else {
        Arc::new(FileDirectoryProvider::new(source))
    }
}
