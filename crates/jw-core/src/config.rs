//! Tracked-work configuration: allowed tags, start status allow-list and
//! the optional auto-transition status.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::{Store, StoreError};

/// Name of the configuration document in the store.
pub const CONFIG_DOC: &str = "config";

/// User configuration persisted alongside the timeline.
///
/// An empty `tags` set disables tagging entirely; an empty
/// `statuses_for_start` set allows starting work on any issue status.
/// `auto_change_status_to` is stored for forward compatibility but drives
/// no transition yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub statuses_for_start: Vec<String>,
    #[serde(default)]
    pub auto_change_status_to: String,
}

impl Config {
    /// Sets one field from its config-command key and a comma-separated
    /// value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "tags" => self.tags = split_list(value),
            "statusesForStart" => self.statuses_for_start = split_list(value),
            "autoChangeStatusTo" => self.auto_change_status_to = value.to_string(),
            _ => {
                return Err(Error::UnknownConfigKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Key/value view for the config listing.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("tags", self.tags.join(",")),
            ("statusesForStart", self.statuses_for_start.join(",")),
            ("autoChangeStatusTo", self.auto_change_status_to.clone()),
        ]
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Loads and saves the configuration document.
pub struct ConfigStore<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> ConfigStore<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Writes a default configuration unless one already exists.
    pub fn init(&self) -> Result<(), Error> {
        match self.store.read(CONFIG_DOC) {
            Ok(_) => Ok(()),
            Err(StoreError::NotFound { .. }) => self.save(&Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load(&self) -> Result<Config, Error> {
        let data = self.store.read(CONFIG_DOC)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), Error> {
        let data = serde_json::to_vec(config)?;
        self.store.write(CONFIG_DOC, &data)?;
        Ok(())
    }
}
