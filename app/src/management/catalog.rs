use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationExample {
    pub sql: &'static str,
    pub cypher: &'static str,
    pub description: &'static str,
}

static EXAMPLES: [TranslationExample; 5] = [
    TranslationExample {
        sql: "SELECT * FROM Users",
        cypher: "MATCH (n:Users)\nRETURN n",
        description: "Simple SELECT of every column",
    },
    TranslationExample {
        sql: "SELECT name, email FROM Users",
        cypher: "MATCH (n:Users)\nRETURN n.name, n.email",
        description: "SELECT of specific columns",
    },
    TranslationExample {
        sql: "SELECT name FROM Users WHERE age > 18",
        cypher: "MATCH (n:Users)\nWHERE n.age > 18\nRETURN n.name",
        description: "SELECT with WHERE and a comparison operator",
    },
    TranslationExample {
        sql: "SELECT * FROM Users WHERE active = true AND role = 'admin'",
        cypher: "MATCH (n:Users)\nWHERE (n.active = true AND n.role = 'admin')\nRETURN n",
        description: "SELECT with WHERE and the AND operator",
    },
    TranslationExample {
        sql: "SELECT name FROM Users WHERE age < 18 OR status = 'guest'",
        cypher: "MATCH (n:Users)\nWHERE (n.age < 18 OR n.status = 'guest')\nRETURN n.name",
        description: "SELECT with WHERE and the OR operator",
    },
];

/// Documented SQL to Cypher translations.
pub fn examples() -> &'static [TranslationExample] {
    &EXAMPLES
}
