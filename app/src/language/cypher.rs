use std::fmt::{Display, Formatter};

use crate::language::statement::Statement;

/// Variable every generated query binds its node to.
pub const NODE: &str = "n";

/// Generated Cypher, one field per clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherQuery {
    pub label: String,
    pub filter: Option<String>,
    pub returns: CypherReturn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CypherReturn {
    Node,
    Properties(Vec<String>),
}

impl Statement for CypherReturn {
    fn dump(&self) -> String {
        match self {
            CypherReturn::Node => format!("RETURN {NODE}"),
            CypherReturn::Properties(properties) => format!(
                "RETURN {}",
                properties
                    .iter()
                    .map(|p| format!("{NODE}.{p}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl Statement for CypherQuery {
    fn dump(&self) -> String {
        let mut clauses = vec![format!("MATCH ({NODE}:{})", self.label)];
        if let Some(filter) = &self.filter {
            clauses.push(format!("WHERE {filter}"));
        }
        clauses.push(self.returns.dump());
        clauses.join("\n")
    }
}

impl Display for CypherQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dump())
    }
}
