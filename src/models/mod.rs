//! Data models for the Symplibackup proxy.
//!
//! Records mirror what the UrBackup web API returns; fields the proxy does
//! not interpret are carried through untouched.

mod backup;
mod client;
mod requests;

pub use backup::*;
pub use client::*;
pub use requests::*;
