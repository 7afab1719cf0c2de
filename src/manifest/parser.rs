//! Manifest dict-literal parsing.
//!
//! Hand-rolled recursive descent over the Python literal subset found in
//! exported manifests. Comments (`# …`) and trailing commas are accepted;
//! anything else (tuples, f-strings, arithmetic) is a parse error.

use super::model::{Manifest, Value};

/// Parse a `__manifest__.py` dict literal.
///
/// # Errors
///
/// Returns a message describing the first offending position when the
/// content is not a well-formed dict literal.
pub fn parse_manifest(content: &str) -> Result<Manifest, String> {
    let mut parser = Parser {
        chars: content.char_indices().collect(),
        pos: 0,
    };
    parser.skip_trivia();
    let entries = parser.parse_dict()?;
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(format!(
            "unexpected trailing content at offset {}",
            parser.offset()
        ));
    }
    Ok(Manifest { entries })
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or_else(
            || self.chars.last().map_or(0, |(i, c)| i + c.len_utf8()),
            |(i, _)| *i,
        )
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(format!(
                "expected '{expected}' at offset {}, found '{c}'",
                self.offset()
            )),
            None => Err(format!("expected '{expected}', found end of input")),
        }
    }

    fn parse_dict(&mut self) -> Result<Vec<(String, Value)>, String> {
        self.expect('{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    return Ok(entries);
                }
                Some('\'' | '"') => {
                    let key = self.parse_string()?;
                    self.skip_trivia();
                    self.expect(':')?;
                    self.skip_trivia();
                    let value = self.parse_value()?;
                    entries.push((key, value));
                    self.skip_trivia();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    }
                }
                Some(c) => {
                    return Err(format!(
                        "expected key or '}}' at offset {}, found '{c}'",
                        self.offset()
                    ));
                }
                None => return Err("unterminated dict".to_string()),
            }
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Value>, String> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_trivia();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    }
                }
                None => return Err("unterminated list".to_string()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, String> {
        match self.peek() {
            Some('\'' | '"') => self.parse_string().map(Value::Str),
            Some('[') => self.parse_list().map(Value::List),
            Some('{') => self.parse_dict().map(Value::Dict),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_int(),
            Some(c) if c.is_alphabetic() => self.parse_keyword(),
            Some(c) => Err(format!(
                "unexpected character '{c}' at offset {}",
                self.offset()
            )),
            None => Err("unexpected end of input".to_string()),
        }
    }

    fn parse_string(&mut self) -> Result<String, String> {
        let Some(quote) = self.bump() else {
            return Err("expected string".to_string());
        };
        let mut out = String::new();
        loop {
            // Adjacent literals ('a' 'b') are not produced by exports and
            // are not concatenated here.
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err("unterminated escape in string".to_string()),
                },
                Some(c) => out.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }

    fn parse_int(&mut self) -> Result<Value, String> {
        let start = self.offset();
        let mut literal = String::new();
        if self.peek() == Some('-') {
            literal.push('-');
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                literal.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        literal
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("invalid integer literal at offset {start}"))
    }

    fn parse_keyword(&mut self) -> Result<Value, String> {
        let start = self.offset();
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            other => Err(format!("unexpected token '{other}' at offset {start}")),
        }
    }
}
