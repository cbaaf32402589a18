//! Literal syntax for values: `None`, `True`, `False`, integers, floats,
//! quoted strings, `[lists]` and `(tuples,)`. Bare words parse as strings.

use std::str::FromStr;

use crate::error::Error;

use super::Value;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn error(&self, what: &str) -> Error {
        Error::Value(format!("invalid literal at offset {}: {what}", self.pos))
    }

    fn expect(&mut self, ch: char) -> Result<(), Error> {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{ch}'")))
        }
    }

    fn value(&mut self) -> Result<Value, Error> {
        self.skip_ws();
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                let (items, _) = self.sequence(']')?;
                Ok(Value::List(items))
            }
            Some('(') => {
                self.pos += 1;
                let (items, trailing_comma) = self.sequence(')')?;
                if items.len() == 1 && !trailing_comma {
                    // parenthesised expression, not a tuple
                    return Ok(items.into_iter().next().unwrap_or_default());
                }
                Ok(Value::tuple(items))
            }
            Some(quote @ ('\'' | '"')) => self.string(quote),
            Some(_) => self.atom(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn sequence(&mut self, close: char) -> Result<(Vec<Value>, bool), Error> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok((items, trailing_comma));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    trailing_comma = true;
                }
                Some(c) if c == close => {
                    trailing_comma = false;
                }
                _ => return Err(self.error(&format!("expected ',' or '{close}'"))),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<Value, Error> {
        self.pos += 1;
        let mut out = String::new();
        let mut escaped = false;
        for (offset, ch) in self.rest().char_indices() {
            if escaped {
                out.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                self.pos += offset + 1;
                return Ok(Value::from(out));
            } else {
                out.push(ch);
            }
        }
        Err(self.error("unterminated string"))
    }

    fn atom(&mut self) -> Result<Value, Error> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c == ',' || c == ']' || c == ')' || c.is_whitespace())
            .unwrap_or(rest.len());
        let word = &rest[..end];
        if word.is_empty() {
            return Err(self.error("expected a value"));
        }
        self.pos += end;
        Ok(match word {
            "None" => Value::None,
            "True" => Value::Bool(true),
            "False" => Value::Bool(false),
            _ => {
                if let Ok(i) = word.parse::<i64>() {
                    Value::Int(i)
                } else if let Ok(f) = word.parse::<f64>() {
                    Value::Float(f)
                } else {
                    Value::str(word)
                }
            }
        })
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let value = parser.value()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error("trailing input"));
        }
        Ok(value)
    }
}
