use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RecordId = u64;
pub type UserId = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query record {0} not found")]
    RecordNotFound(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Translated,
    Executed,
    Failed,
}

impl Display for QueryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryStatus::Translated => f.write_str("translated"),
            QueryStatus::Executed => f.write_str("executed"),
            QueryStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Everything the engine hands to a store for one translation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQueryRecord {
    pub user_id: UserId,
    pub sql_query: String,
    pub cypher_query: Option<String>,
    pub status: QueryStatus,
    pub error_message: Option<String>,
    pub translation_time_ms: Option<f64>,
    pub external_connection_ref: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub sql_query: String,
    pub cypher_query: Option<String>,
    pub status: QueryStatus,
    pub error_message: Option<String>,
    pub translation_time_ms: Option<f64>,
    pub external_connection_ref: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Translation history kept outside the engine.
///
/// Implementations must tolerate concurrent `save` calls.
pub trait QueryStore: Send + Sync {
    /// Writes one record and acknowledges it with its identifier.
    fn save(&self, record: NewQueryRecord) -> Result<RecordId, StoreError>;

    fn get(&self, id: RecordId) -> Result<QueryRecord, StoreError>;

    /// Records of `user_id`, newest first.
    fn history(
        &self,
        user_id: UserId,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<QueryRecord>, StoreError>;
}

#[derive(Default)]
struct State {
    records: Vec<QueryRecord>,
    next_id: RecordId,
}

/// Process local store, cloning shares the same records.
#[derive(Default, Clone)]
pub struct MemoryQueryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        MemoryQueryStore {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryStore for MemoryQueryStore {
    fn save(&self, record: NewQueryRecord) -> Result<RecordId, StoreError> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(QueryRecord {
            id,
            user_id: record.user_id,
            sql_query: record.sql_query,
            cypher_query: record.cypher_query,
            status: record.status,
            error_message: record.error_message,
            translation_time_ms: record.translation_time_ms,
            external_connection_ref: record.external_connection_ref,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<QueryRecord, StoreError> {
        self.state
            .lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::RecordNotFound(id))
    }

    fn history(
        &self,
        user_id: UserId,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<QueryRecord>, StoreError> {
        let mut records: Vec<QueryRecord> = self
            .state
            .lock()
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // ids break ties between records created within the same clock tick
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records.into_iter().skip(skip).take(limit).collect())
    }
}
