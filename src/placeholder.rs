use std::{fmt, iter::Peekable, str::CharIndices};

/// Placeholder type tag, the character right after `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `?`
    Default,
    /// `?a`
    Array,
    /// `?d`
    Int,
    /// `?f`
    Float,
    /// `?#`
    Ident,
}

impl Tag {
    /// Reads the tag from the char following `?`. `None` means the char is
    /// not a tag suffix and belongs to the surrounding text.
    pub fn from_suffix(suffix: Option<char>) -> Option<Tag> {
        match suffix? {
            'a' => Some(Tag::Array),
            'd' => Some(Tag::Int),
            'f' => Some(Tag::Float),
            '#' => Some(Tag::Ident),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Default => "?",
            Tag::Array => "?a",
            Tag::Int => "?d",
            Tag::Float => "?f",
            Tag::Ident => "?#",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Placeholder(Tag),
}

/// Splits text into literal runs and placeholders, left to right.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        chars: text.char_indices().peekable(),
        span_start: 0,
        pending: None,
    }
}

#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    span_start: usize,
    pending: Option<Tag>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tag) = self.pending.take() {
            return Some(Token::Placeholder(tag));
        }

        while let Some((index, char)) = self.chars.next() {
            if char != '?' {
                continue;
            }

            let suffix = self.chars.peek().map(|&(_, next_ch)| next_ch);
            let tag = match Tag::from_suffix(suffix) {
                Some(tag) => {
                    self.chars.next();
                    tag
                }
                None => Tag::Default,
            };

            let text = &self.text[self.span_start..index];
            let width = if matches!(tag, Tag::Default) { 1 } else { 2 };
            self.span_start = index + width;

            if text.is_empty() {
                return Some(Token::Placeholder(tag));
            }
            self.pending = Some(tag);
            return Some(Token::Text(text));
        }

        // write the rest of the text
        if self.span_start < self.text.len() {
            let text = &self.text[self.span_start..];
            self.span_start = self.text.len();
            return Some(Token::Text(text));
        }
        None
    }
}
