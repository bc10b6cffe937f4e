use error::error::TranslateError;

use crate::language::cypher::CypherQuery;

mod buffer;
pub mod lex;
mod parse;
pub mod statement;
mod translate;

pub use parse::{MAX_NESTING, parse, parse_tokens};
pub use translate::translate;

/// Lexes, parses and translates one SELECT statement.
pub fn transform(query: &str) -> Result<CypherQuery, TranslateError> {
    let parsed = parse(query)?;
    Ok(translate(&parsed)?)
}
