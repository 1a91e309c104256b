//! Jira integration for the worklog console.
//!
//! Implements the [`jw_core::IssueTracker`] contract over the Jira REST
//! v2 API with basic auth, and owns the stored credentials.

mod client;
mod creds;
mod factory;

pub use client::JiraClient;
pub use creds::{AUTH_DOC, Credentials, CredsStore};
pub use factory::Factory;
