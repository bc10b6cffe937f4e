use error::error::SyntaxError;

use crate::language::sql::buffer::BufferedLexer;
use crate::language::sql::lex::{Token, TokenKind, TokenStream};
use crate::language::sql::statement::{
    SqlCondition, SqlIdentifier, SqlOperator, SqlQuery, SqlSelect, SqlSelectList, SqlValue,
    SqlWhere,
};

/// Deepest parenthesis nesting accepted inside a WHERE clause.
pub const MAX_NESTING: usize = 256;

pub fn parse(query: &str) -> Result<SqlQuery, Vec<SyntaxError>> {
    let stream = TokenStream::new(query);
    parse_tokens(&stream)
}

/// Parses a whole token stream. Stops at the first error, no partial tree is returned.
pub fn parse_tokens(stream: &TokenStream) -> Result<SqlQuery, Vec<SyntaxError>> {
    let mut lexer = BufferedLexer::new(stream.iter());
    parse_query(&mut lexer).map_err(|err| vec![err])
}

// query := selectStatement EOF
fn parse_query(lexer: &mut BufferedLexer) -> Result<SqlQuery, SyntaxError> {
    let select = parse_select(lexer)?;

    let trailing = if select.where_clause.is_some() {
        &[TokenKind::And, TokenKind::Or, TokenKind::Eof][..]
    } else {
        &[TokenKind::Where, TokenKind::Eof][..]
    };
    expect(lexer, TokenKind::Eof, trailing)?;

    Ok(SqlQuery::new(select))
}

// selectStatement := SELECT selectList FROM tableName whereClause?
fn parse_select(lexer: &mut BufferedLexer) -> Result<SqlSelect, SyntaxError> {
    expect(lexer, TokenKind::Select, &[TokenKind::Select])?;
    let columns = parse_select_list(lexer)?;
    expect(lexer, TokenKind::From, &[TokenKind::Comma, TokenKind::From])?;
    let table = parse_identifier(lexer)?;

    let where_clause = match lexer.next_if(TokenKind::Where)? {
        Some(_) => Some(SqlWhere::new(parse_condition(lexer, 0)?)),
        None => None,
    };

    Ok(SqlSelect::new(table, columns, where_clause))
}

// selectList := ASTERISK | columnName (COMMA columnName)*
fn parse_select_list(lexer: &mut BufferedLexer) -> Result<SqlSelectList, SyntaxError> {
    let tok = lexer.next()?;
    match tok.kind {
        TokenKind::Asterisk => Ok(SqlSelectList::All),
        TokenKind::Identifier => {
            let mut columns = vec![SqlIdentifier::new(tok.lexeme)];
            while lexer.next_if(TokenKind::Comma)?.is_some() {
                columns.push(parse_identifier(lexer)?);
            }
            Ok(SqlSelectList::Columns(columns))
        }
        _ => Err(mismatched(&tok, &[TokenKind::Asterisk, TokenKind::Identifier])),
    }
}

// condition := orExpr
fn parse_condition(lexer: &mut BufferedLexer, depth: usize) -> Result<SqlCondition, SyntaxError> {
    parse_or(lexer, depth)
}

// orExpr := andExpr (OR andExpr)*
fn parse_or(lexer: &mut BufferedLexer, depth: usize) -> Result<SqlCondition, SyntaxError> {
    let mut left = parse_and(lexer, depth)?;
    while lexer.next_if(TokenKind::Or)?.is_some() {
        let right = parse_and(lexer, depth)?;
        left = SqlCondition::or(left, right);
    }
    Ok(left)
}

// andExpr := unaryCond (AND unaryCond)*
fn parse_and(lexer: &mut BufferedLexer, depth: usize) -> Result<SqlCondition, SyntaxError> {
    let mut left = parse_unary(lexer, depth)?;
    while lexer.next_if(TokenKind::And)?.is_some() {
        let right = parse_unary(lexer, depth)?;
        left = SqlCondition::and(left, right);
    }
    Ok(left)
}

// unaryCond := comparison | LPAREN condition RPAREN
fn parse_unary(lexer: &mut BufferedLexer, depth: usize) -> Result<SqlCondition, SyntaxError> {
    let Some(open) = lexer.next_if(TokenKind::LParen)? else {
        return parse_comparison(lexer);
    };

    if depth >= MAX_NESTING {
        return Err(SyntaxError::new(
            open.line,
            open.column,
            format!("conditions nested deeper than {MAX_NESTING} levels"),
        ));
    }

    let inner = parse_condition(lexer, depth + 1)?;
    expect(
        lexer,
        TokenKind::RParen,
        &[TokenKind::And, TokenKind::Or, TokenKind::RParen],
    )?;
    Ok(SqlCondition::paren(inner))
}

// comparison := columnName comparisonOp value
fn parse_comparison(lexer: &mut BufferedLexer) -> Result<SqlCondition, SyntaxError> {
    let tok = lexer.next()?;
    if !tok.is(TokenKind::Identifier) {
        return Err(mismatched(&tok, &[TokenKind::LParen, TokenKind::Identifier]));
    }
    let column = SqlIdentifier::new(tok.lexeme);
    let operator = parse_operator(lexer)?;
    let value = parse_value(lexer)?;
    Ok(SqlCondition::comparison(column, operator, value))
}

fn parse_operator(lexer: &mut BufferedLexer) -> Result<SqlOperator, SyntaxError> {
    let tok = lexer.next()?;
    match tok.kind {
        TokenKind::Eq => Ok(SqlOperator::Eq),
        TokenKind::Neq => Ok(SqlOperator::Neq),
        TokenKind::Lt => Ok(SqlOperator::Lt),
        TokenKind::Gt => Ok(SqlOperator::Gt),
        TokenKind::Lte => Ok(SqlOperator::Lte),
        TokenKind::Gte => Ok(SqlOperator::Gte),
        _ => Err(mismatched(
            &tok,
            &[
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Lte,
                TokenKind::Gte,
            ],
        )),
    }
}

fn parse_value(lexer: &mut BufferedLexer) -> Result<SqlValue, SyntaxError> {
    let tok = lexer.next()?;
    match tok.kind {
        TokenKind::StringLiteral => Ok(SqlValue::Text(tok.lexeme)),
        TokenKind::Number => Ok(SqlValue::Number(tok.lexeme)),
        TokenKind::True => Ok(SqlValue::Bool(true)),
        TokenKind::False => Ok(SqlValue::Bool(false)),
        TokenKind::Null => Ok(SqlValue::Null),
        _ => Err(mismatched(
            &tok,
            &[
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::StringLiteral,
                TokenKind::Number,
            ],
        )),
    }
}

fn parse_identifier(lexer: &mut BufferedLexer) -> Result<SqlIdentifier, SyntaxError> {
    let tok = expect(lexer, TokenKind::Identifier, &[TokenKind::Identifier])?;
    Ok(SqlIdentifier::new(tok.lexeme))
}

/// Consumes a token of `kind`, reporting `expected` when something else shows up.
fn expect(
    lexer: &mut BufferedLexer,
    kind: TokenKind,
    expected: &[TokenKind],
) -> Result<Token, SyntaxError> {
    let tok = lexer.next()?;
    if tok.is(kind) {
        Ok(tok)
    } else {
        Err(mismatched(&tok, expected))
    }
}

fn mismatched(found: &Token, expected: &[TokenKind]) -> SyntaxError {
    let expected = match expected {
        [single] => single.to_string(),
        many => format!(
            "{{{}}}",
            many.iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    SyntaxError::new(
        found.line,
        found.column,
        format!("mismatched input {} expecting {}", found.describe(), expected),
    )
}
