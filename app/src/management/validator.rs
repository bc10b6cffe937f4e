use error::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_QUERY_LENGTH: usize = 5000;

/// Statements which never reach the parser, checked in this order.
pub const DANGEROUS_KEYWORDS: [&str; 11] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "CREATE", "ALTER", "TRUNCATE", "GRANT", "REVOKE",
    "EXEC", "EXECUTE",
];

static KEYWORD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    DANGEROUS_KEYWORDS
        .iter()
        .map(|keyword| (*keyword, Regex::new(&format!(r"(?i)\b{keyword}\b")).unwrap()))
        .collect()
});

static SELECT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*SELECT\b").unwrap());

// stacked statement right after a semicolon, only these four keywords
static STACKED_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i);\s*(DROP|DELETE|UPDATE|INSERT)").unwrap());

/// Textual screening of raw queries before they are tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_length: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(MAX_QUERY_LENGTH)
    }
}

impl Validator {
    pub fn new(max_length: usize) -> Self {
        Validator { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Runs every check in order, the first failing one wins.
    pub fn validate(&self, query: &str) -> Result<(), ValidationError> {
        if query.trim().is_empty() {
            return Err(ValidationError::Empty);
        }

        if query.chars().count() > self.max_length {
            return Err(ValidationError::TooLong {
                limit: self.max_length,
            });
        }

        if let Some((keyword, _)) = KEYWORD_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(query))
        {
            return Err(ValidationError::UnsupportedKeyword(keyword.to_string()));
        }

        if !SELECT_PREFIX.is_match(query) {
            return Err(ValidationError::NotSelect);
        }

        if STACKED_STATEMENT.is_match(query) {
            return Err(ValidationError::SuspiciousPattern);
        }

        Ok(())
    }
}

pub fn validate(query: &str) -> Result<(), ValidationError> {
    Validator::default().validate(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn rejects_empty(#[case] query: &str) {
        assert_eq!(validate(query), Err(ValidationError::Empty));
    }

    #[test]
    fn length_boundary() {
        let prefix = "SELECT * FROM Users WHERE name = '";
        let fill = MAX_QUERY_LENGTH - prefix.len() - 1;
        let exact = format!("{prefix}{}'", "A".repeat(fill));
        assert_eq!(exact.chars().count(), MAX_QUERY_LENGTH);
        assert_eq!(validate(&exact), Ok(()));

        let over = format!("{prefix}{}'", "A".repeat(fill + 1));
        let err = validate(&over).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { limit: MAX_QUERY_LENGTH });
        assert!(err.to_string().contains("exceeds the character limit"));
    }

    #[test]
    fn length_counts_characters() {
        let validator = Validator::new(31);
        let query = "SELECT * FROM t WHERE a = 'ééé'";
        assert_eq!(query.chars().count(), 31);
        assert!(query.len() > 31);
        assert_eq!(validator.validate(query), Ok(()));
    }

    #[rstest]
    #[case("DROP TABLE Users", "DROP")]
    #[case("DELETE FROM Users WHERE id = 1", "DELETE")]
    #[case("UPDATE Users SET name = 'Test'", "UPDATE")]
    #[case("INSERT INTO Users VALUES (1, 'Test')", "INSERT")]
    #[case("CREATE TABLE Users (id INT)", "CREATE")]
    #[case("ALTER TABLE Users", "ALTER")]
    #[case("TRUNCATE Users", "TRUNCATE")]
    #[case("GRANT ALL ON Users", "GRANT")]
    #[case("REVOKE ALL ON Users", "REVOKE")]
    #[case("EXEC sp_who", "EXEC")]
    #[case("EXECUTE sp_who", "EXECUTE")]
    #[case("select * from users where x = 1 or drop = 2", "DROP")]
    fn rejects_keywords(#[case] query: &str, #[case] keyword: &str) {
        let err = validate(query).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedKeyword(keyword.to_string()));
        assert!(err.to_string().contains(keyword));
    }

    #[test]
    fn keyword_order_decides() {
        let err = validate("INSERT INTO t SELECT * FROM s; DROP TABLE t").unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedKeyword("DROP".to_string()));
    }

    #[rstest]
    #[case("SELECT created_at FROM T")]
    #[case("SELECT dropdown FROM T")]
    #[case("SELECT updated, inserted_by FROM T WHERE executed = true")]
    #[case("select name from users")]
    #[case("  SELECT * FROM T")]
    fn accepts_word_boundaries(#[case] query: &str) {
        assert_eq!(validate(query), Ok(()));
    }

    #[rstest]
    #[case("SHOW TABLES")]
    #[case("SELECTION FROM T")]
    #[case("WITH x AS (SELECT * FROM t) SELECT * FROM x")]
    fn rejects_non_select(#[case] query: &str) {
        assert_eq!(validate(query), Err(ValidationError::NotSelect));
    }

    #[rstest]
    #[case("SELECT * FROM Users;DROPPED")]
    #[case("SELECT * FROM Users;  deleted")]
    fn rejects_stacked_statements(#[case] query: &str) {
        assert_eq!(validate(query), Err(ValidationError::SuspiciousPattern));
    }

    #[test]
    fn stacked_drop_named_as_keyword() {
        // the keyword check runs first
        let err = validate("SELECT * FROM Users; DROP TABLE Users").unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedKeyword("DROP".to_string()));
    }

    #[test]
    fn other_stacked_statements_pass() {
        assert_eq!(validate("SELECT * FROM Users; SELECT 1"), Ok(()));
    }
}
