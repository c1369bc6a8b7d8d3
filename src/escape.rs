use std::{borrow::Cow, ops::Deref};

/// Makes raw text safe to embed between quotes in the target dialect.
///
/// `escape` is used for string literals (the caller adds the single
/// quotes) and `escape_ident` for identifiers (the caller adds the
/// backticks). Implementations return `Cow::Borrowed` when nothing had to
/// change.
pub trait Escaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str>;

    fn escape_ident<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        self.escape(raw)
    }
}

impl<D> Escaper for D
where
    D: Deref,
    D::Target: Escaper,
{
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        self.deref().escape(raw)
    }

    fn escape_ident<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        self.deref().escape_ident(raw)
    }
}

/// The escape set of the MySQL client library (`mysql_real_escape_string`).
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        replace_chars(raw, |char| match char {
            '\0' => Some("\\0"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\\' => Some("\\\\"),
            '\'' => Some("\\'"),
            '"' => Some("\\\""),
            '\x1a' => Some("\\Z"),
            _ => None,
        })
    }

    // backslashes mean nothing inside backticks
    fn escape_ident<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        double_backticks(raw)
    }
}

/// Quote doubling only, for servers running with `NO_BACKSLASH_ESCAPES`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiEscaper;

impl Escaper for AnsiEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        replace_chars(raw, |char| (char == '\'').then_some("''"))
    }

    fn escape_ident<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        double_backticks(raw)
    }
}

/// Adapts a plain function, mostly useful to plug a driver's own escaping
/// routine in, or a fake one in tests.
#[derive(Debug, Clone, Copy)]
pub struct FnEscaper<F>(pub F);

impl<F> Escaper for FnEscaper<F>
where
    F: Fn(&str) -> String,
{
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Owned((self.0)(raw))
    }
}

fn double_backticks(raw: &str) -> Cow<'_, str> {
    replace_chars(raw, |char| (char == '`').then_some("``"))
}

/// Copy `raw`, swapping every char `replace` has a substitute for. Only
/// allocates once the first substitution shows up.
fn replace_chars<F>(raw: &str, replace: F) -> Cow<'_, str>
where
    F: Fn(char) -> Option<&'static str>,
{
    let mut out: Option<String> = None;
    let mut last = 0;
    for (index, char) in raw.char_indices() {
        if let Some(sub) = replace(char) {
            let buf = out.get_or_insert_with(|| String::with_capacity(raw.len() + 8));
            buf.push_str(&raw[last..index]);
            buf.push_str(sub);
            last = index + char.len_utf8();
        }
    }

    match out {
        None => Cow::Borrowed(raw),
        Some(mut buf) => {
            // write trailing slice
            buf.push_str(&raw[last..]);
            Cow::Owned(buf)
        }
    }
}
