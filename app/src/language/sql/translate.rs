use error::error::InternalError;

use crate::language::cypher::{CypherQuery, CypherReturn, NODE};
use crate::language::sql::statement::{
    SqlComparison, SqlCondition, SqlIdentifier, SqlOperator, SqlQuery, SqlSelect, SqlSelectList,
    SqlValue,
};

pub fn translate(query: &SqlQuery) -> Result<CypherQuery, InternalError> {
    handle_select(&query.select)
}

fn handle_select(select: &SqlSelect) -> Result<CypherQuery, InternalError> {
    let label = handle_label(&select.table)?;

    let filter = select
        .where_clause
        .as_ref()
        .map(|w| handle_condition(&w.condition));

    let returns = match &select.columns {
        SqlSelectList::All => CypherReturn::Node,
        SqlSelectList::Columns(columns) if columns.is_empty() => {
            return Err(InternalError("select list without columns".to_string()));
        }
        SqlSelectList::Columns(columns) => {
            CypherReturn::Properties(columns.iter().map(|c| c.name.clone()).collect())
        }
    };

    Ok(CypherQuery {
        label,
        filter,
        returns,
    })
}

/// Upper-cases the first character of the table name, everything else stays as written.
fn handle_label(table: &SqlIdentifier) -> Result<String, InternalError> {
    let mut chars = table.name.chars();
    match chars.next() {
        Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        None => Err(InternalError("no table name specified".to_string())),
    }
}

fn handle_condition(condition: &SqlCondition) -> String {
    match condition {
        SqlCondition::Comparison(c) => handle_comparison(c),
        SqlCondition::Paren(inner) => format!("({})", handle_condition(inner)),
        SqlCondition::And(left, right) => format!(
            "({} AND {})",
            handle_condition(left),
            handle_condition(right)
        ),
        SqlCondition::Or(left, right) => format!(
            "({} OR {})",
            handle_condition(left),
            handle_condition(right)
        ),
    }
}

fn handle_comparison(comparison: &SqlComparison) -> String {
    format!(
        "{NODE}.{} {} {}",
        comparison.column.name,
        handle_operator(comparison.operator),
        handle_value(&comparison.value)
    )
}

fn handle_operator(operator: SqlOperator) -> &'static str {
    match operator {
        SqlOperator::Eq => "=",
        SqlOperator::Neq => "<>",
        SqlOperator::Lt => "<",
        SqlOperator::Gt => ">",
        SqlOperator::Lte => "<=",
        SqlOperator::Gte => ">=",
    }
}

fn handle_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Text(t) => t.clone(),
        SqlValue::Number(n) => n.clone(),
        SqlValue::Bool(true) => "true".to_string(),
        SqlValue::Bool(false) => "false".to_string(),
        SqlValue::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::sql::parse::parse;
    use crate::language::sql::statement::SqlWhere;
    use crate::language::statement::Statement;
    use rstest::rstest;

    fn cypher(query: &str) -> String {
        let parsed = parse(query).unwrap();
        translate(&parsed).unwrap().dump()
    }

    fn filter(query: &str) -> String {
        let parsed = parse(query).unwrap();
        translate(&parsed).unwrap().filter.unwrap()
    }

    #[rstest]
    #[case("Users", "Users")]
    #[case("users", "Users")]
    #[case("uSERS", "USERS")]
    #[case("UserAccount", "UserAccount")]
    #[case("_tmp", "_tmp")]
    #[case("x", "X")]
    fn test_label(#[case] table: &str, #[case] label: &str) {
        assert_eq!(
            cypher(&format!("SELECT * FROM {table}")),
            format!("MATCH (n:{label})\nRETURN n")
        );
    }

    #[rstest]
    #[case("=", "=")]
    #[case("!=", "<>")]
    #[case("<>", "<>")]
    #[case("<", "<")]
    #[case(">", ">")]
    #[case("<=", "<=")]
    #[case(">=", ">=")]
    fn test_operator_mapping(#[case] sql: &str, #[case] mapped: &str) {
        assert_eq!(
            filter(&format!("SELECT * FROM T WHERE c {sql} 5")),
            format!("n.c {mapped} 5")
        );
    }

    #[rstest]
    #[case("'admin'", "'admin'")]
    #[case("'O''Brien'", "'O''Brien'")]
    #[case("007", "007")]
    #[case("-1.50", "-1.50")]
    #[case("TRUE", "true")]
    #[case("False", "false")]
    #[case("NULL", "null")]
    fn test_values(#[case] sql: &str, #[case] rendered: &str) {
        assert_eq!(
            filter(&format!("SELECT * FROM T WHERE c = {sql}")),
            format!("n.c = {rendered}")
        );
    }

    #[test]
    fn test_columns_in_order() {
        assert_eq!(
            cypher("SELECT email, name, age FROM Users"),
            "MATCH (n:Users)\nRETURN n.email, n.name, n.age"
        );
    }

    #[test]
    fn test_precedence_rendering() {
        assert_eq!(
            filter("SELECT * FROM T WHERE a = 1 OR b = 2 AND c = 3"),
            "(n.a = 1 OR (n.b = 2 AND n.c = 3))"
        );
    }

    #[test]
    fn test_parens_double_wrap() {
        assert_eq!(
            filter("SELECT * FROM T WHERE (a = 1 AND b = 2) OR c = 3"),
            "(((n.a = 1 AND n.b = 2)) OR n.c = 3)"
        );
        assert_eq!(filter("SELECT * FROM T WHERE (a = 1)"), "(n.a = 1)");
    }

    #[test]
    fn test_where_clause_line() {
        assert_eq!(
            cypher("SELECT name FROM Users WHERE age > 18"),
            "MATCH (n:Users)\nWHERE n.age > 18\nRETURN n.name"
        );
    }

    #[test]
    fn test_missing_table_is_internal() {
        let query = SqlQuery::new(SqlSelect::new(
            SqlIdentifier::new(""),
            SqlSelectList::All,
            Some(SqlWhere::new(SqlCondition::comparison(
                SqlIdentifier::new("a"),
                SqlOperator::Eq,
                SqlValue::Null,
            ))),
        ));
        assert!(translate(&query).is_err());
    }

    #[test]
    fn test_empty_columns_is_internal() {
        let query = SqlQuery::new(SqlSelect::new(
            SqlIdentifier::new("t"),
            SqlSelectList::Columns(vec![]),
            None,
        ));
        assert!(translate(&query).is_err());
    }
}
