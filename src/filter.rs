//! Filter statements from the client (e.g. `date = '31.12.2023'`) parsed into
//! typed predicates over allow-listed columns. Literals become bound parameters.

use crate::config::{ColumnKind, ResolvedTable};
use crate::error::FilterError;
use crate::sql::BindValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl FilterOp {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "=" => FilterOp::Eq,
            "!=" | "<>" => FilterOp::Ne,
            "<" => FilterOp::Lt,
            "<=" => FilterOp::Le,
            ">" => FilterOp::Gt,
            ">=" => FilterOp::Ge,
            _ if s.eq_ignore_ascii_case("like") => FilterOp::Like,
            _ => return None,
        })
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Like => "LIKE",
        }
    }
}

/// One `column op literal` condition. `column` is always a registry column name.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: FilterOp,
    pub value: BindValue,
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Op(String),
    Quoted(String),
}

fn is_op_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '!')
}

fn tokenize(s: &str) -> Result<Vec<Token>, FilterError> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '\'' {
            chars.next();
            let mut lit = String::new();
            loop {
                match chars.next() {
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        lit.push('\'');
                    }
                    Some('\'') => break,
                    Some(ch) => lit.push(ch),
                    None => return Err(FilterError::Unterminated),
                }
            }
            tokens.push(Token::Quoted(lit));
        } else if is_op_char(c) {
            let mut op = String::new();
            while let Some(&ch) = chars.peek() {
                if !is_op_char(ch) {
                    break;
                }
                op.push(ch);
                chars.next();
            }
            tokens.push(Token::Op(op));
        } else {
            let mut word = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() || ch == '\'' || is_op_char(ch) {
                    break;
                }
                word.push(ch);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }
    Ok(tokens)
}

/// Parse `predicate (AND predicate)*`. Empty or blank statement yields no predicates.
pub fn parse_filter(statement: &str, table: &ResolvedTable) -> Result<Vec<Predicate>, FilterError> {
    let tokens = tokenize(statement)?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut predicates = Vec::new();
    let mut iter = tokens.into_iter();
    loop {
        let column = match iter.next() {
            Some(Token::Word(w)) => w,
            Some(other) => return Err(FilterError::Malformed(format!("expected column, got {:?}", other))),
            None => return Err(FilterError::Malformed("expected column after AND".into())),
        };
        let info = table
            .column(&column)
            .ok_or_else(|| FilterError::UnknownColumn(column.clone()))?;

        let op = match iter.next() {
            Some(Token::Op(o)) | Some(Token::Word(o)) => {
                FilterOp::parse(&o).ok_or(FilterError::UnknownOperator(o))?
            }
            Some(Token::Quoted(_)) | None => {
                return Err(FilterError::Malformed(format!("expected operator after {}", column)))
            }
        };
        if op == FilterOp::Like && info.kind != ColumnKind::Text {
            return Err(FilterError::Malformed(format!("LIKE requires a text column, {} is {}", column, info.kind.name())));
        }

        let literal = match iter.next() {
            Some(Token::Quoted(s)) | Some(Token::Word(s)) => s,
            Some(Token::Op(o)) => return Err(FilterError::Malformed(format!("expected value, got {}", o))),
            None => return Err(FilterError::Malformed(format!("expected value after {} {}", column, op.as_sql()))),
        };
        let value = info.kind.parse_literal(&info.name, &literal)?;
        predicates.push(Predicate {
            column: info.name.clone(),
            op,
            value,
        });

        match iter.next() {
            None => break,
            Some(Token::Word(w)) if w.eq_ignore_ascii_case("and") => continue,
            Some(other) => return Err(FilterError::Malformed(format!("expected AND, got {:?}", other))),
        }
    }
    Ok(predicates)
}
