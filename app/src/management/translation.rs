use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use error::error::{InternalError, TranslateError};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::language::CypherQuery;
use crate::language::sql::transform;
use crate::management::catalog::{self, TranslationExample};
use crate::management::config::TranslatorConfig;
use crate::management::persister::{
    NewQueryRecord, QueryRecord, QueryStatus, QueryStore, RecordId, StoreError, UserId,
};
use crate::management::validator::Validator;
use crate::util::Stopwatch;

/// Outcome of one translation call, as handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub success: bool,
    pub sql_query: String,
    pub cypher: Option<String>,
    pub errors: Vec<String>,
    pub record_id: Option<RecordId>,
    pub translation_time_ms: Option<f64>,
}

/// Where and for whom a translation gets recorded.
#[derive(Clone, Copy)]
pub struct PersistenceContext<'a> {
    pub store: &'a dyn QueryStore,
    pub user_id: UserId,
    pub connection_ref: Option<u64>,
}

impl<'a> PersistenceContext<'a> {
    pub fn new(store: &'a dyn QueryStore, user_id: UserId) -> Self {
        PersistenceContext {
            store,
            user_id,
            connection_ref: None,
        }
    }

    pub fn with_connection(mut self, connection_ref: u64) -> Self {
        self.connection_ref = Some(connection_ref);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranslationService {
    config: TranslatorConfig,
    validator: Validator,
}

impl TranslationService {
    pub fn new(config: TranslatorConfig) -> Self {
        let validator = Validator::new(config.max_query_length);
        TranslationService { config, validator }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Validates, translates and optionally records one SQL query.
    ///
    /// Never panics on malformed input, every failure ends up in `errors`.
    pub fn translate_query(
        &self,
        sql: &str,
        context: Option<PersistenceContext<'_>>,
    ) -> TranslationResult {
        let sql = sql.trim();

        if let Err(err) = self.validator.validate(sql) {
            debug!(%err, "query rejected before parsing");
            let errors = vec![err.to_string()];
            let record_id = self.persist(context, failed_record(sql, &errors, None));
            return TranslationResult {
                success: false,
                sql_query: sql.to_string(),
                cypher: None,
                errors,
                record_id,
                translation_time_ms: None,
            };
        }

        let watch = Stopwatch::start();
        let outcome = guarded_transform(sql);
        let elapsed = watch.elapsed_ms();

        match outcome {
            Ok(cypher) => {
                debug!(elapsed_ms = elapsed, "query translated");
                let record = NewQueryRecord {
                    cypher_query: Some(cypher.clone()),
                    status: QueryStatus::Translated,
                    ..failed_record(sql, &[], Some(elapsed))
                };
                let record_id = self.persist(context, record);
                TranslationResult {
                    success: true,
                    sql_query: sql.to_string(),
                    cypher: Some(cypher),
                    errors: vec![],
                    record_id,
                    translation_time_ms: Some(elapsed),
                }
            }
            Err(err) => {
                if err.is_internal() {
                    error!(%err, sql, "translation failed inside the engine");
                } else {
                    debug!(errors = err.messages().len(), "query does not parse");
                }
                let errors = err.messages();
                let record_id = self.persist(context, failed_record(sql, &errors, Some(elapsed)));
                TranslationResult {
                    success: false,
                    sql_query: sql.to_string(),
                    cypher: None,
                    errors,
                    record_id,
                    translation_time_ms: Some(elapsed),
                }
            }
        }
    }

    /// Translation history of one user, newest first.
    pub fn history(
        &self,
        store: &dyn QueryStore,
        user_id: UserId,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<QueryRecord>, StoreError> {
        store.history(user_id, skip, limit.unwrap_or(self.config.history_page_size))
    }

    pub fn examples(&self) -> &'static [TranslationExample] {
        catalog::examples()
    }

    fn persist(
        &self,
        context: Option<PersistenceContext<'_>>,
        record: NewQueryRecord,
    ) -> Option<RecordId> {
        let context = context?;
        let record = NewQueryRecord {
            user_id: context.user_id,
            external_connection_ref: context.connection_ref,
            ..record
        };
        match context.store.save(record) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%err, user_id = context.user_id, "could not record translation");
                None
            }
        }
    }
}

/// Translates with the default configuration.
pub fn translate_query(sql: &str, context: Option<PersistenceContext<'_>>) -> TranslationResult {
    TranslationService::default().translate_query(sql, context)
}

fn failed_record(sql: &str, errors: &[String], elapsed: Option<f64>) -> NewQueryRecord {
    NewQueryRecord {
        user_id: 0,
        sql_query: sql.to_string(),
        cypher_query: None,
        status: QueryStatus::Failed,
        error_message: errors.first().cloned(),
        translation_time_ms: elapsed,
        external_connection_ref: None,
    }
}

fn guarded_transform(sql: &str) -> Result<String, TranslateError> {
    guarded(|| transform(sql)).map(|cypher| cypher.to_string())
}

/// Runs `work`, turning a panic into an [`InternalError`].
fn guarded<F>(work: F) -> Result<CypherQuery, TranslateError>
where
    F: FnOnce() -> Result<CypherQuery, TranslateError>,
{
    panic::catch_unwind(AssertUnwindSafe(work))
        .unwrap_or_else(|payload| Err(InternalError(panic_message(payload.as_ref())).into()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic without message".to_string()
    }
}
