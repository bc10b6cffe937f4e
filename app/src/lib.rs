//! Translation of a small SELECT subset of SQL into Neo4j Cypher.
//!
//! ```
//! use sql2cypher::management::translate_query;
//!
//! let result = translate_query("SELECT name FROM users WHERE age > 18", None);
//! assert_eq!(
//!     result.cypher.as_deref(),
//!     Some("MATCH (n:Users)\nWHERE n.age > 18\nRETURN n.name")
//! );
//! ```

pub mod language;
pub mod management;
pub mod util;
