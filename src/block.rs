/// A slice of the template, either outside or inside `{...}`.
///
/// `Conditional` holds the text without its braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Conditional(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Conditional(text) => text,
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, Segment::Conditional(_))
    }
}

/// Splits `template` at its conditional blocks.
///
/// A block opens at a `{` and closes at the nearest `}` after it, with at
/// least one char between them; blocks never nest. The result alternates
/// `Plain`, `Conditional`, ..., `Plain`, starting and ending with a
/// (possibly empty) `Plain`.
pub fn split(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    let mut search = 0;

    while let Some(open) = template[search..].find('{').map(|at| search + at) {
        let body = open + 1;
        let Some(close) = template[body..].find('}').map(|at| body + at) else {
            // no `}` left, so no later `{` can close either
            break;
        };
        if close == body {
            // `{}` is not a block
            search = body;
            continue;
        }

        segments.push(Segment::Plain(&template[last..open]));
        segments.push(Segment::Conditional(&template[body..close]));
        last = close + 1;
        search = last;
    }

    segments.push(Segment::Plain(&template[last..]));
    segments
}
