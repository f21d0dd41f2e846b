//! User directory loading.

mod errors;
mod file;
mod http;
mod models;
mod provider;

pub use errors::*;
pub use file::*;
pub use http::*;
pub use models::*;
pub use provider::*;
