//! Query parser for converting query strings into term trees.

use std::fmt;

use crate::error::{Result, RewriteError};
use crate::query::composite::{CompositeTerm, Operator};
use crate::query::node::TermNode;
use crate::query::term::WordTerm;
use crate::query::tree::QueryTree;

/// A query parser for the two supported query syntaxes.
///
/// Schema-less: no field validation, accepts any field name.
#[derive(Debug, Default, Clone)]
pub struct QueryParser {
    /// Default field to search in when no field is specified.
    default_field: Option<String>,
}

impl QueryParser {
    /// Create a new query parser.
    pub fn new() -> Self {
        QueryParser {
            default_field: None,
        }
    }

    /// Set the default field to search in when no field is specified.
    pub fn with_default_field<S: Into<String>>(mut self, field: S) -> Self {
        self.default_field = Some(field.into());
        self
    }

    /// Get the default field.
    pub fn default_field(&self) -> Option<&str> {
        self.default_field.as_deref()
    }

    /// Parse a query string into a tree.
    ///
    /// Supported syntax:
    /// - Field-specific terms: `title:hello`
    /// - Quoted values: `title:"master of puppets"`
    /// - Bare terms, when a default field is set: `hello`
    /// - Boolean operators: `title:hello AND body:world`, `a:x OR a:y`
    /// - Juxtaposition means AND: `a:x b:y`
    /// - Parentheses: `(title:hello OR body:world) AND year:1986`
    pub fn parse(&self, query_str: &str) -> Result<QueryTree> {
        let tokens = tokenize(query_str)?;
        if tokens.is_empty() {
            return Ok(QueryTree::empty());
        }

        let mut parser = TokenParser::new(tokens, Dialect::Simple, &self.default_field);
        let root = parser.parse_or_expression()?;
        parser.expect_end()?;
        Ok(QueryTree::new(root))
    }

    /// Parse the YQL subset `select * from sources * where <expr>;`.
    ///
    /// `<expr>` combines `field contains "value"` conditions with `and`,
    /// `or` and parentheses. Keywords are case-insensitive and the trailing
    /// semicolon is optional.
    pub fn parse_yql(&self, yql: &str) -> Result<QueryTree> {
        let tokens = tokenize(yql)?;
        let mut parser = TokenParser::new(tokens, Dialect::Yql, &self.default_field);

        parser.expect_keyword("select")?;
        parser.skip_until_keyword("from")?;
        parser.skip_until_keyword("where")?;

        let root = parser.parse_or_expression()?;
        if parser.peek() == Some(&Token::Semicolon) {
            parser.advance();
        }
        parser.expect_end()?;
        Ok(QueryTree::new(root))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
    Colon,
    LParen,
    RParen,
    Semicolon,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "'{word}'"),
            Token::Quoted(value) => write!(f, "\"{value}\""),
            Token::Colon => write!(f, "':'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Semicolon => write!(f, "';'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            ':' => {
                chars.next();
                tokens.push(Token::Colon);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semicolon);
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        _ => value.push(ch),
                    }
                }
                if !closed {
                    return Err(RewriteError::parse(format!(
                        "unterminated quoted value \"{value}"
                    )));
                }
                tokens.push(Token::Quoted(value));
            }
            _ => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() || matches!(ch, ':' | '(' | ')' | ';' | '"') {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    Ok(tokens)
}

/// Maximum parenthesis nesting accepted by the parser.
const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// `field:value AND ...`, upper-case operators, implicit AND.
    Simple,
    /// `field contains "value" and ...`, case-insensitive keywords.
    Yql,
}

/// Recursive-descent parser over a token stream.
struct TokenParser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    dialect: Dialect,
    default_field: &'a Option<String>,
}

impl<'a> TokenParser<'a> {
    fn new(tokens: Vec<Token>, dialect: Dialect, default_field: &'a Option<String>) -> Self {
        TokenParser {
            tokens,
            pos: 0,
            depth: 0,
            dialect,
            default_field,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        match (self.peek(), self.dialect) {
            (Some(Token::Word(word)), Dialect::Simple) => word == keyword,
            (Some(Token::Word(word)), Dialect::Yql) => word.eq_ignore_ascii_case(keyword),
            _ => false,
        }
    }

    fn operator_keyword(&self, operator: Operator) -> &'static str {
        match (operator, self.dialect) {
            (Operator::And, Dialect::Simple) => "AND",
            (Operator::Or, Dialect::Simple) => "OR",
            (Operator::And, Dialect::Yql) => "and",
            (Operator::Or, Dialect::Yql) => "or",
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.is_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{keyword}'")))
        }
    }

    fn skip_until_keyword(&mut self, keyword: &str) -> Result<()> {
        while self.peek().is_some() {
            if self.is_keyword(keyword) {
                self.advance();
                return Ok(());
            }
            self.advance();
        }
        Err(RewriteError::parse(format!(
            "expected '{keyword}' but reached end of query"
        )))
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of query")),
        }
    }

    fn unexpected(&self, expected: &str) -> RewriteError {
        match self.peek() {
            Some(token) => RewriteError::parse(format!(
                "expected {expected} but found {token} at token {}",
                self.pos
            )),
            None => RewriteError::parse(format!("expected {expected} but reached end of query")),
        }
    }

    fn parse_or_expression(&mut self) -> Result<TermNode> {
        let mut children = vec![self.parse_and_expression()?];

        while self.is_keyword(self.operator_keyword(Operator::Or)) {
            self.advance();
            children.push(self.parse_and_expression()?);
        }

        Ok(combine(Operator::Or, children))
    }

    fn parse_and_expression(&mut self) -> Result<TermNode> {
        let mut children = vec![self.parse_primary()?];

        loop {
            if self.is_keyword(self.operator_keyword(Operator::And)) {
                self.advance();
            } else if !self.continues_implicitly() {
                break;
            }
            children.push(self.parse_primary()?);
        }

        Ok(combine(Operator::And, children))
    }

    /// Juxtaposed terms are an implicit AND in the simple dialect.
    fn continues_implicitly(&self) -> bool {
        if self.dialect != Dialect::Simple {
            return false;
        }
        match self.peek() {
            Some(Token::Word(_)) => !self.is_keyword("OR"),
            Some(Token::Quoted(_)) | Some(Token::LParen) => true,
            _ => false,
        }
    }

    fn parse_primary(&mut self) -> Result<TermNode> {
        match self.peek() {
            Some(Token::LParen) => {
                if self.depth >= MAX_NESTING {
                    return Err(RewriteError::parse(format!(
                        "query nesting exceeds {MAX_NESTING} levels"
                    )));
                }
                self.advance();
                self.depth += 1;
                let inner = self.parse_or_expression();
                self.depth -= 1;
                let inner = inner?;
                if self.peek() == Some(&Token::RParen) {
                    self.advance();
                    Ok(inner)
                } else {
                    Err(self.unexpected("')'"))
                }
            }
            Some(Token::Word(_)) => match self.dialect {
                Dialect::Simple => self.parse_simple_term(),
                Dialect::Yql => self.parse_contains(),
            },
            Some(Token::Quoted(_)) if self.dialect == Dialect::Simple => {
                self.parse_simple_term()
            }
            _ => Err(self.unexpected("a term")),
        }
    }

    fn parse_simple_term(&mut self) -> Result<TermNode> {
        let first = match self.advance() {
            Some(Token::Word(word)) => word,
            Some(Token::Quoted(value)) => return self.default_term(value),
            _ => return Err(self.unexpected("a term")),
        };

        if self.peek() != Some(&Token::Colon) {
            return self.default_term(first);
        }
        self.advance();

        match self.take_value() {
            Some(value) => Ok(TermNode::from(WordTerm::new(first, value))),
            None => Err(self.unexpected(&format!("a value for field '{first}'"))),
        }
    }

    fn default_term(&self, value: String) -> Result<TermNode> {
        match self.default_field {
            Some(field) => Ok(TermNode::from(WordTerm::new(field.clone(), value))),
            None => Err(RewriteError::parse(format!(
                "no default field specified and no field prefix found for '{value}'"
            ))),
        }
    }

    fn parse_contains(&mut self) -> Result<TermNode> {
        let field = match self.advance() {
            Some(Token::Word(word)) => word,
            _ => return Err(self.unexpected("a field name")),
        };

        self.expect_keyword("contains")?;

        match self.take_value() {
            Some(value) => Ok(TermNode::from(WordTerm::new(field, value))),
            None => Err(self.unexpected(&format!("a value for field '{field}'"))),
        }
    }

    /// Consume a word or quoted token as a term value.
    fn take_value(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Word(_)) | Some(Token::Quoted(_)) => match self.advance() {
                Some(Token::Word(value)) | Some(Token::Quoted(value)) => Some(value),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Build a composite from a chain, or return a lone child as is.
fn combine(operator: Operator, mut children: Vec<TermNode>) -> TermNode {
    if children.len() == 1 {
        if let Some(only) = children.pop() {
            return only;
        }
    }
    TermNode::from(CompositeTerm::with_children(operator, children))
}
