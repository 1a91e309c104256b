//! Stored Jira credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use jw_core::{Error, Store};

/// Name of the credentials document in the store.
pub const AUTH_DOC: &str = "auth";

/// Basic-auth credentials for one Jira instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Loads and saves the credentials document.
pub struct CredsStore<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> CredsStore<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Credentials, Error> {
        let data = self.store.read(AUTH_DOC)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn save(&self, creds: &Credentials) -> Result<(), Error> {
        let data = serde_json::to_vec(creds)?;
        self.store.write(AUTH_DOC, &data)?;
        Ok(())
    }
}
