use std::fmt::Write;

use crate::escape::Escaper;

pub(crate) const NULL: &str = "NULL";

pub(crate) struct FormatContext<'a, W: Write, E: Escaper + ?Sized> {
    pub(crate) writer: &'a mut W,
    pub(crate) escaper: &'a E,
}

impl<'a, W: Write, E: Escaper + ?Sized> FormatContext<'a, W, E> {
    pub fn new(writer: &'a mut W, escaper: &'a E) -> Self {
        Self { writer, escaper }
    }

    pub(crate) fn write_ident(&mut self, part: &str) -> std::fmt::Result {
        self.writer.write_char('`')?;
        self.writer.write_str(&self.escaper.escape_ident(part))?;
        self.writer.write_char('`')
    }

    pub(crate) fn write_literal(&mut self, part: &str) -> std::fmt::Result {
        self.writer.write_char('\'')?;
        self.writer.write_str(&self.escaper.escape(part))?;
        self.writer.write_char('\'')
    }

    pub(crate) fn write_null(&mut self) -> std::fmt::Result {
        self.writer.write_str(NULL)
    }

    pub(crate) fn write_bool(&mut self, value: bool) -> std::fmt::Result {
        self.writer.write_char(if value { '1' } else { '0' })
    }

    pub(crate) fn write_separator(&mut self, index: usize) -> std::fmt::Result {
        if index > 0 {
            self.writer.write_str(", ")?;
        }
        Ok(())
    }
}
