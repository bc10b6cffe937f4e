use std::fmt::{Display, Formatter};

use crate::language::statement::Statement;

/// Root of a parsed query. Owns the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub select: SqlSelect,
}

impl SqlQuery {
    pub fn new(select: SqlSelect) -> Self {
        SqlQuery { select }
    }
}

impl Statement for SqlQuery {
    fn dump(&self) -> String {
        self.select.dump()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlSelect {
    pub table: SqlIdentifier,
    pub columns: SqlSelectList,
    pub where_clause: Option<SqlWhere>,
}

impl SqlSelect {
    pub fn new(
        table: SqlIdentifier,
        columns: SqlSelectList,
        where_clause: Option<SqlWhere>,
    ) -> Self {
        SqlSelect {
            table,
            columns,
            where_clause,
        }
    }
}

impl Statement for SqlSelect {
    fn dump(&self) -> String {
        let mut select = format!("SELECT {} FROM {}", self.columns.dump(), self.table.dump());
        if let Some(where_clause) = &self.where_clause {
            select += &format!(" {}", where_clause.dump());
        }
        select
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlIdentifier {
    pub name: String,
}

impl SqlIdentifier {
    pub fn new<S: Into<String>>(name: S) -> Self {
        SqlIdentifier { name: name.into() }
    }
}

impl Statement for SqlIdentifier {
    fn dump(&self) -> String {
        self.name.clone()
    }
}

/// Projection of a select. `Columns` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlSelectList {
    All,
    Columns(Vec<SqlIdentifier>),
}

impl Statement for SqlSelectList {
    fn dump(&self) -> String {
        match self {
            SqlSelectList::All => "*".to_string(),
            SqlSelectList::Columns(columns) => columns
                .iter()
                .map(|c| c.dump())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlWhere {
    pub condition: SqlCondition,
}

impl SqlWhere {
    pub fn new(condition: SqlCondition) -> Self {
        SqlWhere { condition }
    }
}

impl Statement for SqlWhere {
    fn dump(&self) -> String {
        format!("WHERE {}", self.condition.dump())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlCondition {
    Comparison(SqlComparison),
    Paren(Box<SqlCondition>),
    And(Box<SqlCondition>, Box<SqlCondition>),
    Or(Box<SqlCondition>, Box<SqlCondition>),
}

impl SqlCondition {
    pub fn comparison(column: SqlIdentifier, operator: SqlOperator, value: SqlValue) -> Self {
        SqlCondition::Comparison(SqlComparison {
            column,
            operator,
            value,
        })
    }

    pub fn paren(inner: SqlCondition) -> Self {
        SqlCondition::Paren(Box::new(inner))
    }

    pub fn and(left: SqlCondition, right: SqlCondition) -> Self {
        SqlCondition::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: SqlCondition, right: SqlCondition) -> Self {
        SqlCondition::Or(Box::new(left), Box::new(right))
    }
}

impl Statement for SqlCondition {
    fn dump(&self) -> String {
        match self {
            SqlCondition::Comparison(c) => c.dump(),
            SqlCondition::Paren(inner) => format!("({})", inner.dump()),
            SqlCondition::And(left, right) => format!("{} AND {}", left.dump(), right.dump()),
            SqlCondition::Or(left, right) => format!("{} OR {}", left.dump(), right.dump()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlComparison {
    pub column: SqlIdentifier,
    pub operator: SqlOperator,
    pub value: SqlValue,
}

impl Statement for SqlComparison {
    fn dump(&self) -> String {
        format!(
            "{} {} {}",
            self.column.dump(),
            self.operator,
            self.value.dump()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlOperator {
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Display for SqlOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            SqlOperator::Eq => "=",
            SqlOperator::Neq => "<>",
            SqlOperator::Lt => "<",
            SqlOperator::Gt => ">",
            SqlOperator::Lte => "<=",
            SqlOperator::Gte => ">=",
        };
        f.write_str(op)
    }
}

/// Literal on the right side of a comparison.
///
/// `Text` keeps its surrounding quotes and `Number` its lexeme, both exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Number(String),
    Bool(bool),
    Null,
}

impl Statement for SqlValue {
    fn dump(&self) -> String {
        match self {
            SqlValue::Text(t) => t.clone(),
            SqlValue::Number(n) => n.clone(),
            SqlValue::Bool(true) => "TRUE".to_string(),
            SqlValue::Bool(false) => "FALSE".to_string(),
            SqlValue::Null => "NULL".to_string(),
        }
    }
}
