use std::rc::Rc;

use crate::error::Result;
use crate::value::Value;

use super::Source;

/// Iterator over a shared slice of values. Exact length hint, forkable.
#[derive(Debug, Clone)]
pub struct SeqIter {
    items: Rc<[Value]>,
    pos: usize,
}

impl SeqIter {
    /// Iterate `items` from the start.
    pub fn new(items: Rc<[Value]>) -> Self {
        Self { items, pos: 0 }
    }
}

impl Source for SeqIter {
    fn type_name(&self) -> &'static str {
        "seq_iterator"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        let item = self.items.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        Ok(item)
    }

    fn length_hint(&self) -> Result<usize> {
        Ok(self.items.len() - self.pos)
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.clone()))
    }
}

/// Iterator over the characters of a string, each yielded as a
/// one-character string.
#[derive(Debug, Clone)]
pub struct StrIter {
    text: Rc<str>,
    offset: usize,
}

impl StrIter {
    /// Iterate the characters of `text`.
    pub fn new(text: Rc<str>) -> Self {
        Self { text, offset: 0 }
    }
}

impl Source for StrIter {
    fn type_name(&self) -> &'static str {
        "str_iterator"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        let Some(ch) = self.text[self.offset..].chars().next() else {
            return Ok(None);
        };
        self.offset += ch.len_utf8();
        Ok(Some(Value::from(ch.to_string())))
    }

    fn length_hint(&self) -> Result<usize> {
        Ok(self.text[self.offset..].chars().count())
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.clone()))
    }
}

crate::source::impl_iterator!(SeqIter, StrIter);
