use std::fmt::Write;

use tracing::{debug, trace};

use crate::{
    block::{self, Segment},
    cast::write_cast,
    error::{Error, Result},
    escape::Escaper,
    placeholder::{Tag, Token, tokenize},
    value::Value,
    writer::FormatContext,
};

/// What happens to the placeholders after a skip marker in the same segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SkipMode {
    /// Stop scanning the segment. Later placeholders of that segment
    /// consume no argument.
    #[default]
    Abort,
    /// Keep scanning the segment and consume, without casting, one argument
    /// per remaining placeholder.
    Drain,
}

/// Result of rendering one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SegmentOutcome {
    Rendered(String),
    Skipped,
}

/// The single read position into the arguments of one render call.
#[derive(Debug)]
pub(crate) struct ArgumentCursor<'a> {
    args: &'a [Value],
    position: usize,
}

impl<'a> ArgumentCursor<'a> {
    pub(crate) fn new(args: &'a [Value]) -> Self {
        Self { args, position: 0 }
    }

    pub(crate) fn next(&mut self) -> Result<&'a Value> {
        let Some(value) = self.args.get(self.position) else {
            return Err(Error::InsufficientArguments {
                position: self.position + 1,
                supplied: self.args.len(),
            });
        };
        self.position += 1;
        Ok(value)
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

/// Renders query templates against one escaper.
///
/// Holds no per-call state, so one instance can serve concurrent renders
/// as long as the escaper allows it.
#[derive(Debug, Clone)]
pub struct Templater<E> {
    escaper: E,
    skip_mode: SkipMode,
}

impl<E: Escaper> Templater<E> {
    pub fn new(escaper: E) -> Self {
        Self {
            escaper,
            skip_mode: SkipMode::Abort,
        }
    }

    pub fn with_skip_mode(mut self, skip_mode: SkipMode) -> Self {
        self.skip_mode = skip_mode;
        self
    }

    pub fn skip_mode(&self) -> SkipMode {
        self.skip_mode
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }

    /// Fills every placeholder of `template` from `args`, in order.
    ///
    /// A segment whose placeholder receives [`Value::Skip`] renders as
    /// nothing. Arguments left over at the end are ignored.
    pub fn render(&self, template: &str, args: &[Value]) -> Result<String> {
        let segments = block::split(template);
        let mut cursor = ArgumentCursor::new(args);
        let mut sql = String::with_capacity(template.len());

        for segment in &segments {
            match self.render_segment(segment, &mut cursor)? {
                SegmentOutcome::Rendered(part) => sql.push_str(&part),
                SegmentOutcome::Skipped => {}
            }
        }

        debug!(
            segments = segments.len(),
            consumed = cursor.position(),
            supplied = args.len(),
            "rendered query template"
        );
        Ok(sql)
    }

    /// Casts a single value the way a `tag` placeholder would.
    pub fn cast(&self, tag: Tag, value: &Value) -> Result<String> {
        let mut out = String::new();
        let mut context = FormatContext::new(&mut out, &self.escaper);
        write_cast(&mut context, tag, value)?;
        Ok(out)
    }

    pub(crate) fn render_segment(
        &self,
        segment: &Segment<'_>,
        cursor: &mut ArgumentCursor<'_>,
    ) -> Result<SegmentOutcome> {
        let mut out = String::with_capacity(segment.text().len());
        let mut context = FormatContext::new(&mut out, &self.escaper);
        let mut tokens = tokenize(segment.text());

        while let Some(token) = tokens.next() {
            let tag = match token {
                Token::Text(text) => {
                    context.writer.write_str(text)?;
                    continue;
                }
                Token::Placeholder(tag) => tag,
            };

            let value = cursor.next()?;
            if value.is_skip() {
                if matches!(self.skip_mode, SkipMode::Drain) {
                    for token in tokens.by_ref() {
                        if let Token::Placeholder(_) = token {
                            cursor.next()?;
                        }
                    }
                }
                debug!(
                    conditional = segment.is_conditional(),
                    cursor = cursor.position(),
                    "segment skipped"
                );
                return Ok(SegmentOutcome::Skipped);
            }

            trace!(%tag, position = cursor.position(), "placeholder");
            write_cast(&mut context, tag, value)?;
        }

        Ok(SegmentOutcome::Rendered(out))
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::{
        args,
        escape::{FnEscaper, MySqlEscaper},
        skip,
        tests::render,
        value::ValueKind,
    };

    #[test]
    fn test_plain_query() {
        let sql = render(
            "SELECT * FROM users WHERE name = ? AND block = ?d",
            &args!["Jack", true],
        )
        .unwrap();
        assert_eq!("SELECT * FROM users WHERE name = 'Jack' AND block = 1", sql);
    }

    #[test]
    fn test_conditional_block_skipped() {
        let sql = render(
            "SELECT name FROM users WHERE user_id = ?d {AND block = ?d}",
            &args![1, skip()],
        )
        .unwrap();
        assert_eq!("SELECT name FROM users WHERE user_id = 1 ", sql);
    }

    #[test]
    fn test_conditional_block_kept() {
        let sql = render(
            "SELECT name FROM users WHERE user_id = ?d {AND block = ?d}",
            &args![1, true],
        )
        .unwrap();
        assert_eq!("SELECT name FROM users WHERE user_id = 1 AND block = 1", sql);
    }

    #[test]
    fn test_identifier_list() {
        let sql = render("SELECT ?# FROM users", &args![vec!["name", "email"]]).unwrap();
        assert_eq!("SELECT `name`, `email` FROM users", sql);
    }

    #[test]
    fn test_update_with_map() {
        let mut set = IndexMap::new();
        set.insert("name", Value::from("Jack"));
        set.insert("block", Value::from(false));
        let sql = render("UPDATE users SET ?a WHERE id = ?d", &args![set, 1]).unwrap();
        assert_eq!(
            "UPDATE users SET `name` = 'Jack', `block` = 0 WHERE id = 1",
            sql
        );
    }

    #[test]
    fn test_null_insert() {
        let sql = render("INSERT INTO users (name) VALUES (?)", &args![Value::Null]).unwrap();
        assert_eq!("INSERT INTO users (name) VALUES (NULL)", sql);
    }

    #[test]
    fn test_insufficient_arguments() {
        let err = render("SELECT ?d", &[]).unwrap_err();
        assert_eq!(
            Error::InsufficientArguments {
                position: 1,
                supplied: 0
            },
            err
        );
        let err = render("SELECT ?d, {?d}", &args![1]).unwrap_err();
        assert_eq!(
            Error::InsufficientArguments {
                position: 2,
                supplied: 1
            },
            err
        );
    }

    #[test]
    fn test_unsupported_type_aborts_render() {
        let err = render("SELECT ? {AND x = ?}", &args![1, vec![1, 2]]).unwrap_err();
        assert_eq!(Error::unsupported(Tag::Default, ValueKind::List), err);
    }

    #[test]
    fn test_skip_keeps_later_segments_aligned() {
        let sql = render(
            "SELECT * FROM t WHERE a = ?d{ AND b = ?d}{ AND c = ?}",
            &args![1, skip(), "x"],
        )
        .unwrap();
        assert_eq!("SELECT * FROM t WHERE a = 1 AND c = 'x'", sql);
    }

    #[test]
    fn test_skip_drops_already_rendered_text() {
        // `2` was substituted before the skip and still disappears
        let sql = render("x{ AND a = ?d AND b = ?d}", &args![2, skip()]).unwrap();
        assert_eq!("x", sql);
    }

    #[test]
    fn test_abort_leaves_trailing_placeholders_unconsumed() {
        let sql = render(
            "SELECT 1{ AND a = ? AND b = ?}{ AND c = ?d}",
            &args![skip(), 5],
        )
        .unwrap();
        assert_eq!("SELECT 1 AND c = 5", sql);
    }

    #[test]
    fn test_drain_consumes_trailing_placeholders() {
        let templater = Templater::new(MySqlEscaper).with_skip_mode(SkipMode::Drain);
        let sql = templater
            .render(
                "SELECT 1{ AND a = ? AND b = ?}{ AND c = ?d}",
                &args![skip(), "unused", 5],
            )
            .unwrap();
        assert_eq!("SELECT 1 AND c = 5", sql);
    }

    #[test]
    fn test_drain_still_counts_arguments() {
        let templater = Templater::new(MySqlEscaper).with_skip_mode(SkipMode::Drain);
        let err = templater
            .render("SELECT 1{ AND a = ? AND b = ?}", &args![skip()])
            .unwrap_err();
        assert_eq!(
            Error::InsufficientArguments {
                position: 2,
                supplied: 1
            },
            err
        );
    }

    #[test]
    fn test_skip_in_plain_segment() {
        let sql = render("SELECT ?d {AND b = ?d}", &args![skip(), 3]).unwrap();
        assert_eq!("AND b = 3", sql);
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let sql = render("SELECT ?d", &args![1, 2, 3]).unwrap();
        assert_eq!("SELECT 1", sql);
    }

    #[test]
    fn test_braces_removed_and_literals_kept() {
        let sql = render("SELECT '{}' ?x {WHERE a = ?f}", &args!["a", 1.5]).unwrap();
        assert_eq!("SELECT '{}' 'a'x WHERE a = 1.5", sql);
    }

    #[test]
    fn test_render_segment_outcome() {
        let templater = Templater::new(MySqlEscaper);
        let args = args![1, skip()];
        let mut cursor = ArgumentCursor::new(&args);
        let outcome = templater
            .render_segment(&Segment::Plain("a = ?d"), &mut cursor)
            .unwrap();
        assert_eq!(SegmentOutcome::Rendered("a = 1".to_string()), outcome);
        let outcome = templater
            .render_segment(&Segment::Conditional("b = ?d"), &mut cursor)
            .unwrap();
        assert_eq!(SegmentOutcome::Skipped, outcome);
        assert_eq!(2, cursor.position());
    }

    #[test]
    fn test_custom_escaper() {
        let templater = Templater::new(FnEscaper(|raw: &str| raw.replace('\'', "''")));
        let sql = templater
            .render("SELECT ?# WHERE a = ?", &args!["col", "o'neil"])
            .unwrap();
        assert_eq!("SELECT `col` WHERE a = 'o''neil'", sql);
    }

    #[test]
    fn test_cast_entry_point() {
        let templater = Templater::new(MySqlEscaper);
        assert_eq!("NULL", templater.cast(Tag::Float, &Value::Null).unwrap());
        assert_eq!("'a\\'b'", templater.cast(Tag::Default, &"a'b".into()).unwrap());
    }
}
