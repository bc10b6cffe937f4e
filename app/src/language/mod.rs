mod cypher;
pub mod sql;
mod statement;

pub use cypher::{CypherQuery, CypherReturn, NODE};
pub use statement::Statement;
