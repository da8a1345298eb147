//! Recursive-descent parser for formatter definitions.
//!
//! Accepts `function (v) { ... }`, `v => ...` and `(v, opts) => ...` forms.
//! Free identifiers are resolved while parsing: anything that is not a
//! parameter, a local or a [`Global`] is rejected, so a compiled formatter
//! cannot reach the host.

use super::ast::{
    BinaryOp, Body, Expr, Function, Global, Literal, LogicalOp, Stmt, TemplatePart, UnaryOp,
};
use super::error::ExprError;
use super::lexer::{RawTemplatePart, Spanned, Token, tokenize};
use crate::constants::{MAX_EXPR_TOKENS, MAX_PARSE_DEPTH};

const KEYWORDS: &[&str] = &[
    "function", "return", "const", "let", "var", "if", "else", "true", "false", "null",
    "undefined", "typeof", "new", "this",
];

/// Parse a complete formatter definition
pub fn parse_function(src: &str) -> Result<Function, ExprError> {
    let mut parser = Parser::new(bounded(tokenize(src)?)?, Vec::new(), 0);
    let function = parser.function()?;
    parser.eat_punct(";");
    parser.expect_eof()?;
    Ok(function)
}

fn bounded(tokens: Vec<Spanned>) -> Result<Vec<Spanned>, ExprError> {
    if tokens.len() > MAX_EXPR_TOKENS {
        return Err(ExprError::TooLong(MAX_EXPR_TOKENS));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Spanned>,
    idx: usize,
    depth: usize,
    scope: Vec<String>,
}

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

impl Parser {
    fn new(tokens: Vec<Spanned>, scope: Vec<String>, depth: usize) -> Self {
        Self {
            tokens,
            idx: 0,
            depth,
            scope,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.idx)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn peek_next(&self) -> &Token {
        self.tokens
            .get(self.idx + 1)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn pos(&self) -> usize {
        self.tokens
            .get(self.idx)
            .or_else(|| self.tokens.last())
            .map(|s| s.pos)
            .unwrap_or(0)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.idx < self.tokens.len() {
            self.idx += 1;
        }
        token
    }

    fn at_punct(&self, p: &str) -> bool {
        matches!(self.peek(), Token::Punct(q) if *q == p)
    }

    fn at_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Token::Ident(name) if name == kw)
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.at_punct(p) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> Result<(), ExprError> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{}`", p)))
        }
    }

    fn expect_eof(&self) -> Result<(), ExprError> {
        match self.peek() {
            Token::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    fn unexpected(&self, wanted: &str) -> ExprError {
        let found = match self.peek() {
            Token::Num(n) => format!("number {}", n),
            Token::Str(_) | Token::Template(_) => "string".to_string(),
            Token::Ident(name) => format!("`{}`", name),
            Token::Punct(p) => format!("`{}`", p),
            Token::Eof => "end of input".to_string(),
        };
        ExprError::syntax(self.pos(), format!("expected {}, found {}", wanted, found))
    }

    fn binding_name(&mut self) -> Result<String, ExprError> {
        match self.peek().clone() {
            Token::Ident(name) if !is_keyword(&name) => {
                self.idx += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Run `f` one nesting level deeper
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ExprError>) -> Result<T, ExprError> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ExprError::TooDeep(MAX_PARSE_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ------------------------------------------------------------------
    // Function shapes
    // ------------------------------------------------------------------

    fn function(&mut self) -> Result<Function, ExprError> {
        if self.at_keyword("function") {
            self.advance();
            if matches!(self.peek(), Token::Ident(name) if !is_keyword(name)) {
                self.advance();
            }
            let params = self.params()?;
            self.scope.extend(params.iter().cloned());
            let body = Body::Block(self.block()?);
            return Ok(Function { params, body });
        }

        let single_param_arrow = matches!(self.peek_next(), Token::Punct("=>"));
        let params = match self.peek().clone() {
            Token::Ident(name) if single_param_arrow && !is_keyword(&name) => {
                self.advance();
                vec![name]
            }
            Token::Punct("(") => self.params().map_err(|_| ExprError::NotAFunction)?,
            _ => return Err(ExprError::NotAFunction),
        };
        if !self.eat_punct("=>") {
            return Err(ExprError::NotAFunction);
        }
        self.scope.extend(params.iter().cloned());
        let body = if self.at_punct("{") {
            Body::Block(self.block()?)
        } else {
            Body::Expr(self.expression()?)
        };
        Ok(Function { params, body })
    }

    fn params(&mut self) -> Result<Vec<String>, ExprError> {
        self.expect_punct("(")?;
        let mut params = Vec::new();
        if self.eat_punct(")") {
            return Ok(params);
        }
        loop {
            params.push(self.binding_name()?);
            if self.eat_punct(")") {
                return Ok(params);
            }
            self.expect_punct(",")?;
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self) -> Result<Vec<Stmt>, ExprError> {
        self.expect_punct("{")?;
        let mut stmts = Vec::new();
        while !self.eat_punct("}") {
            if matches!(self.peek(), Token::Eof) {
                return Err(self.unexpected("`}`"));
            }
            stmts.push(self.statement()?);
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Stmt, ExprError> {
        self.nested(|p| {
            if p.at_punct("{") {
                return Ok(Stmt::Block(p.block()?));
            }
            if p.eat_punct(";") {
                return Ok(Stmt::Block(Vec::new()));
            }
            if p.at_keyword("const") || p.at_keyword("let") || p.at_keyword("var") {
                p.advance();
                let name = p.binding_name()?;
                let init = if p.eat_punct("=") {
                    p.expression()?
                } else {
                    Expr::Literal(Literal::Undefined)
                };
                p.scope.push(name.clone());
                p.eat_punct(";");
                return Ok(Stmt::Let(name, init));
            }
            if p.at_keyword("return") {
                p.advance();
                let value = if p.at_punct(";") || p.at_punct("}") || matches!(p.peek(), Token::Eof) {
                    None
                } else {
                    Some(p.expression()?)
                };
                p.eat_punct(";");
                return Ok(Stmt::Return(value));
            }
            if p.at_keyword("if") {
                p.advance();
                p.expect_punct("(")?;
                let test = p.expression()?;
                p.expect_punct(")")?;
                let consequent = Box::new(p.statement()?);
                let alternate = if p.at_keyword("else") {
                    p.advance();
                    Some(Box::new(p.statement()?))
                } else {
                    None
                };
                return Ok(Stmt::If {
                    test,
                    consequent,
                    alternate,
                });
            }
            let expr = p.expression()?;
            p.eat_punct(";");
            Ok(Stmt::Expr(expr))
        })
    }

    // ------------------------------------------------------------------
    // Expressions, lowest precedence first
    // ------------------------------------------------------------------

    fn expression(&mut self) -> Result<Expr, ExprError> {
        self.nested(|p| p.conditional())
    }

    fn conditional(&mut self) -> Result<Expr, ExprError> {
        let test = self.logical_or()?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.expression()?;
        self.expect_punct(":")?;
        let alternate = self.expression()?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn logical_or(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.logical_and()?;
        loop {
            let op = if self.eat_punct("||") {
                LogicalOp::Or
            } else if self.eat_punct("??") {
                LogicalOp::Nullish
            } else {
                return Ok(left);
            };
            let right = self.logical_and()?;
            left = Expr::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn logical_and(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.equality()?;
        while self.eat_punct("&&") {
            let right = self.equality()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn binary_level(
        &mut self,
        ops: &[(&str, BinaryOp)],
        next: fn(&mut Self) -> Result<Expr, ExprError>,
    ) -> Result<Expr, ExprError> {
        let mut left = next(self)?;
        'outer: loop {
            for (punct, op) in ops {
                if self.eat_punct(punct) {
                    let right = next(self)?;
                    left = Expr::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            return Ok(left);
        }
    }

    fn equality(&mut self) -> Result<Expr, ExprError> {
        self.binary_level(
            &[
                ("===", BinaryOp::StrictEq),
                ("!==", BinaryOp::StrictNe),
                ("==", BinaryOp::LooseEq),
                ("!=", BinaryOp::LooseNe),
            ],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> Result<Expr, ExprError> {
        self.binary_level(
            &[
                ("<=", BinaryOp::Le),
                (">=", BinaryOp::Ge),
                ("<", BinaryOp::Lt),
                (">", BinaryOp::Gt),
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Expr, ExprError> {
        self.binary_level(&[("+", BinaryOp::Add), ("-", BinaryOp::Sub)], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Result<Expr, ExprError> {
        self.binary_level(
            &[("*", BinaryOp::Mul), ("/", BinaryOp::Div), ("%", BinaryOp::Rem)],
            Self::unary,
        )
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.nested(|p| {
            let op = if p.eat_punct("-") {
                UnaryOp::Neg
            } else if p.eat_punct("+") {
                UnaryOp::Plus
            } else if p.eat_punct("!") {
                UnaryOp::Not
            } else if p.at_keyword("typeof") {
                p.advance();
                UnaryOp::TypeOf
            } else {
                return p.postfix();
            };
            let operand = p.unary()?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            })
        })
    }

    fn property_name(&mut self) -> Result<Expr, ExprError> {
        match self.advance() {
            Token::Ident(name) => Ok(Expr::Literal(Literal::Str(name))),
            _ => {
                self.idx -= 1;
                Err(self.unexpected("property name"))
            }
        }
    }

    fn postfix(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.primary()?;
        loop {
            if self.eat_punct(".") {
                let property = self.property_name()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property: Box::new(property),
                    optional: false,
                };
            } else if self.eat_punct("?.") {
                let property = if self.eat_punct("[") {
                    let index = self.expression()?;
                    self.expect_punct("]")?;
                    index
                } else {
                    self.property_name()?
                };
                expr = Expr::Member {
                    object: Box::new(expr),
                    property: Box::new(property),
                    optional: true,
                };
            } else if self.eat_punct("[") {
                let index = self.expression()?;
                self.expect_punct("]")?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property: Box::new(index),
                    optional: false,
                };
            } else if self.eat_punct("(") {
                let mut args = Vec::new();
                if !self.eat_punct(")") {
                    loop {
                        args.push(self.expression()?);
                        if self.eat_punct(")") {
                            break;
                        }
                        self.expect_punct(",")?;
                    }
                }
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let pos = self.pos();
        match self.advance() {
            Token::Num(n) => Ok(Expr::Literal(Literal::Num(n))),
            Token::Str(s) => Ok(Expr::Literal(Literal::Str(s))),
            Token::Template(parts) => self.template(parts),
            Token::Punct("(") => {
                let inner = self.expression()?;
                self.expect_punct(")")?;
                Ok(inner)
            }
            Token::Ident(name) => self.identifier(name, pos),
            _ => {
                self.idx -= 1;
                Err(self.unexpected("expression"))
            }
        }
    }

    fn identifier(&mut self, name: String, pos: usize) -> Result<Expr, ExprError> {
        let literal = match name.as_str() {
            "true" => Some(Literal::Bool(true)),
            "false" => Some(Literal::Bool(false)),
            "null" => Some(Literal::Null),
            "undefined" => Some(Literal::Undefined),
            "NaN" => Some(Literal::Num(f64::NAN)),
            "Infinity" => Some(Literal::Num(f64::INFINITY)),
            _ => None,
        };
        if let Some(literal) = literal {
            return Ok(Expr::Literal(literal));
        }
        if is_keyword(&name) {
            self.idx -= 1;
            return Err(self.unexpected("expression"));
        }
        if self.scope.iter().any(|local| *local == name) {
            return Ok(Expr::Local(name));
        }
        match Global::lookup(&name) {
            Some(global) => Ok(Expr::Global(global)),
            None => Err(ExprError::UnknownIdentifier { name, pos }),
        }
    }

    fn template(&mut self, parts: Vec<RawTemplatePart>) -> Result<Expr, ExprError> {
        let mut out = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                RawTemplatePart::Text(text) => out.push(TemplatePart::Text(text)),
                RawTemplatePart::Code(code, offset) => {
                    let tokens = bounded(tokenize(&code).map_err(|e| shift(e, offset))?)?
                        .into_iter()
                        .map(|s| Spanned {
                            token: s.token,
                            pos: s.pos + offset,
                        })
                        .collect();
                    let mut inner = Parser::new(tokens, self.scope.clone(), self.depth);
                    let expr = inner.expression()?;
                    inner.expect_eof()?;
                    out.push(TemplatePart::Expr(expr));
                }
            }
        }
        Ok(Expr::Template(out))
    }
}

fn shift(err: ExprError, offset: usize) -> ExprError {
    match err {
        ExprError::Syntax { pos, message } => ExprError::Syntax {
            pos: pos + offset,
            message,
        },
        ExprError::UnknownIdentifier { name, pos } => ExprError::UnknownIdentifier {
            name,
            pos: pos + offset,
        },
        other => other,
    }
}
