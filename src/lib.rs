//! Tombola Admin Console
//!
//! Session and access core for the administrative console of the Tombola promotional rewards platform: user directory loading, session issuance and durable storage, and capability gating for console affordances.

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod directory;
pub mod observability;
pub mod permissions;
pub mod session;

#[cfg(test)]
mod test;
