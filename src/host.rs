//! Raw host values handed to the coercer, and a small text syntax for them.
//!
//! Syntax: numbers (`1`, `-2.5`, `1e3`), `true`/`false`, `null`, `fn`
//! (an opaque callable), double-quoted strings without escapes, bracketed
//! lists, and already-typed operands written `text:type` (`a:i32`,
//! `v:vec3f`).

use std::fmt;
use std::str::FromStr;

use crate::snippet::Snippet;

/// A value from the host program before it has a shader type.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Number(f64),
    Bool(bool),
    /// A value already typed upstream; passes through coercion unchanged.
    Typed(Snippet),
    List(Vec<HostValue>),
    Str(String),
    Null,
    Callable,
}

/// Host numbers print without a fractional part when they have none, so
/// `1.0` prints as `1`.
pub(crate) fn number_text(value: f64) -> String {
    value.to_string()
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Number(n) => write!(f, "{}", number_text(*n)),
            HostValue::Bool(b) => write!(f, "{}", b),
            HostValue::Typed(snippet) => write!(f, "{}", snippet.text),
            HostValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            HostValue::Str(s) => write!(f, "\"{}\"", s),
            HostValue::Null => write!(f, "null"),
            HostValue::Callable => write!(f, "fn"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostParseError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for HostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for HostParseError {}

impl FromStr for HostValue {
    type Err = HostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = HostParser { src: s, pos: 0 };
        let value = parser.parse_value()?;
        parser.skip_whitespace();
        if parser.pos < s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(value)
    }
}

struct HostParser<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> HostParser<'src> {
    fn error(&self, message: &str) -> HostParseError {
        HostParseError {
            message: message.to_string(),
            offset: self.pos,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn parse_value(&mut self) -> Result<HostValue, HostParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("expected a value")),
            Some('[') => self.parse_list(),
            Some('"') => self.parse_string(),
            Some(_) => self.parse_atom(),
        }
    }

    fn parse_list(&mut self) -> Result<HostValue, HostParseError> {
        self.pos += 1;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(HostValue::List(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(HostValue::List(items));
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<HostValue, HostParseError> {
        self.pos += 1;
        let rest = &self.src[self.pos..];
        match rest.find('"') {
            Some(end) => {
                self.pos += end + 1;
                Ok(HostValue::Str(rest[..end].to_string()))
            }
            None => Err(self.error("unterminated string")),
        }
    }

    /// Everything up to the next delimiter: a keyword, a number, or `text:type`.
    fn parse_atom(&mut self) -> Result<HostValue, HostParseError> {
        let start = self.pos;
        let mut depth = 0i32;
        while let Some(ch) = self.peek() {
            match ch {
                '<' => depth += 1,
                '>' => depth -= 1,
                ',' if depth > 0 => {}
                ',' | ']' => break,
                c if c.is_whitespace() && depth == 0 => break,
                _ => {}
            }
            self.pos += ch.len_utf8();
        }
        let atom = &self.src[start..self.pos];
        match atom {
            "true" => return Ok(HostValue::Bool(true)),
            "false" => return Ok(HostValue::Bool(false)),
            "null" => return Ok(HostValue::Null),
            "fn" => return Ok(HostValue::Callable),
            _ => {}
        }
        if let Some((text, ty)) = atom.split_once(':') {
            let ty = ty.parse().map_err(|_| HostParseError {
                message: format!("unknown type '{}'", ty),
                offset: start,
            })?;
            return Ok(HostValue::Typed(Snippet::new(text, ty)));
        }
        atom.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(HostValue::Number)
            .ok_or(HostParseError {
                message: format!("cannot parse '{}'", atom),
                offset: start,
            })
    }
}
