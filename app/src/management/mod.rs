pub use catalog::{TranslationExample, examples};
pub use config::{ConfigError, TranslatorConfig};
pub use persister::{
    MemoryQueryStore, NewQueryRecord, QueryRecord, QueryStatus, QueryStore, RecordId, StoreError,
    UserId,
};
pub use translation::{PersistenceContext, TranslationResult, TranslationService, translate_query};
pub use validator::{DANGEROUS_KEYWORDS, MAX_QUERY_LENGTH, Validator, validate};

mod catalog;
mod config;
mod persister;
mod translation;
mod validator;
