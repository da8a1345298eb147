//! Tokenizer for formatter expressions.

use super::error::ExprError;

/// A piece of a template literal before parsing
#[derive(Debug, Clone, PartialEq)]
pub enum RawTemplatePart {
    Text(String),
    /// Source of an `${...}` substitution and its offset in the input
    Code(String, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Num(f64),
    Str(String),
    Template(Vec<RawTemplatePart>),
    Ident(String),
    Punct(&'static str),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Longest operators first so `===` wins over `==`
const PUNCTUATION: &[&str] = &[
    "===", "!==", "=>", "==", "!=", "<=", ">=", "&&", "||", "??", "?.", "(", ")", "{", "}", "[",
    "]", ",", ";", ".", "?", ":", "+", "-", "*", "/", "%", "<", ">", "!", "=",
];

pub fn tokenize(src: &str) -> Result<Vec<Spanned>, ExprError> {
    let mut lexer = Lexer { src, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        lexer.skip_trivia()?;
        let pos = lexer.pos;
        let Some(ch) = lexer.peek() else {
            tokens.push(Spanned {
                token: Token::Eof,
                pos,
            });
            return Ok(tokens);
        };
        let token = if ch.is_ascii_digit()
            || (ch == '.' && lexer.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
        {
            lexer.number()?
        } else if ch == '"' || ch == '\'' {
            lexer.string(ch)?
        } else if ch == '`' {
            lexer.template()?
        } else if ch.is_alphabetic() || ch == '_' || ch == '$' {
            lexer.ident()
        } else {
            lexer.punct()?
        };
        tokens.push(Spanned { token, pos });
    }
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_trivia(&mut self) -> Result<(), ExprError> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                let end = rest.find('\n').unwrap_or(rest.len());
                self.pos += end;
            } else if rest.starts_with("/*") {
                let end = rest[2..]
                    .find("*/")
                    .ok_or_else(|| ExprError::syntax(self.pos, "unterminated comment"))?;
                self.pos += end + 4;
            } else if self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            } else {
                return Ok(());
            }
        }
    }

    fn number(&mut self) -> Result<Token, ExprError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Token::Num)
            .map_err(|_| ExprError::syntax(start, format!("invalid number `{}`", text)))
    }

    fn escape(&mut self, start: usize) -> Result<char, ExprError> {
        let ch = self
            .bump()
            .ok_or_else(|| ExprError::syntax(start, "unterminated escape"))?;
        Ok(match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'u' => {
                let hex: String = (0..4).filter_map(|_| self.bump()).collect();
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| ExprError::syntax(start, "invalid unicode escape"))?
            }
            other => other,
        })
    }

    fn string(&mut self, quote: char) -> Result<Token, ExprError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(ExprError::syntax(start, "unterminated string")),
                Some(c) if c == quote => return Ok(Token::Str(out)),
                Some('\\') => out.push(self.escape(start)?),
                Some(c) => out.push(c),
            }
        }
    }

    fn template(&mut self) -> Result<Token, ExprError> {
        let start = self.pos;
        self.bump();
        let mut parts = Vec::new();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(ExprError::syntax(start, "unterminated template literal")),
                Some('`') => break,
                Some('\\') => text.push(self.escape(start)?),
                Some('$') if self.peek() == Some('{') => {
                    self.bump();
                    if !text.is_empty() {
                        parts.push(RawTemplatePart::Text(std::mem::take(&mut text)));
                    }
                    let code_start = self.pos;
                    let mut depth = 0usize;
                    loop {
                        match self.bump() {
                            None => {
                                return Err(ExprError::syntax(start, "unterminated substitution"));
                            }
                            Some('{') => depth += 1,
                            Some('}') if depth == 0 => break,
                            Some('}') => depth -= 1,
                            Some(_) => {}
                        }
                    }
                    let code = self.src[code_start..self.pos - 1].to_string();
                    parts.push(RawTemplatePart::Code(code, code_start));
                }
                Some(c) => text.push(c),
            }
        }
        if !text.is_empty() {
            parts.push(RawTemplatePart::Text(text));
        }
        Ok(Token::Template(parts))
    }

    fn ident(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.bump();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }

    fn punct(&mut self) -> Result<Token, ExprError> {
        let rest = self.rest();
        for p in PUNCTUATION {
            if rest.starts_with(p) {
                // `a ?.5 : b` is a conditional, not optional chaining
                if *p == "?." && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
                    continue;
                }
                self.pos += p.len();
                return Ok(Token::Punct(p));
            }
        }
        let ch = self.peek().unwrap_or_default();
        Err(ExprError::syntax(self.pos, format!("unexpected character `{}`", ch)))
    }
}
