//! Persistence collaborator
//!
//! This module defines the trait the planner uses to read and write its
//! records. The store abstraction lets the surrounding application keep the
//! records in a hosted realtime database, browser storage, or anything else
//! that can hold three independent JSON documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the independently stored planner records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Record {
    /// Per-week availability of every player
    Availability,
    /// Per-week team lineups
    Matches,
    /// Per-week scores
    Results,
}

impl Record {
    /// Every record, in the order they are loaded and saved
    pub const ALL: [Record; 3] = [Record::Availability, Record::Matches, Record::Results];

    /// The key the record is stored under
    pub fn key(self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Matches => "matches",
            Self::Results => "results",
        }
    }
}

/// Trait for reading and writing planner records
///
/// Implementations need read-then-write access with eventual consistency;
/// concurrent writers resolve as last-write-wins.
pub trait Store {
    /// The error type returned by the store
    ///
    /// Decoding a loaded record into planner types reports through this
    /// type as well.
    type Error: std::error::Error + From<serde_json::Error>;

    /// Reads a record
    ///
    /// # Returns
    ///
    /// `None` if the record has never been written
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record could not be read.
    fn load(&self, record: Record) -> Result<Option<serde_json::Value>, Self::Error>;

    /// Writes a record, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record could not be written.
    fn save(&mut self, record: Record, value: serde_json::Value) -> Result<(), Self::Error>;
}

/// Errors raised by [`MemoryStore`]
#[derive(Error, Debug)]
pub enum Error {
    /// A stored document is not valid JSON
    #[error("stored record is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A store keeping each record as serialized JSON text in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<Record, String>,
}

impl MemoryStore {
    /// Creates a store pre-filled with raw JSON documents
    pub fn with_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = (Record, S)>,
        S: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(record, text)| (record, text.into()))
                .collect(),
        }
    }

    /// Gets the raw JSON text of a record
    pub fn document(&self, record: Record) -> Option<&str> {
        self.documents.get(&record).map(String::as_str)
    }
}

impl Store for MemoryStore {
    type Error = Error;

    fn load(&self, record: Record) -> Result<Option<serde_json::Value>, Self::Error> {
        self.documents
            .get(&record)
            .map(|text| serde_json::from_str::<serde_json::Value>(text))
            .transpose()
            .map_err(Error::from)
    }

    fn save(&mut self, record: Record, value: serde_json::Value) -> Result<(), Self::Error> {
        let text = serde_json::to_string(&value)?;
        log::debug!("saved {} ({} bytes)", record.key(), text.len());
        self.documents.insert(record, text);
        Ok(())
    }
}
