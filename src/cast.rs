use std::fmt::Write;

use crate::{
    error::{Error, Result},
    escape::Escaper,
    placeholder::Tag,
    value::Value,
    writer::FormatContext,
};

/// Writes `value` the way a `tag` placeholder wants it.
pub(crate) fn write_cast<W, E>(
    context: &mut FormatContext<'_, W, E>,
    tag: Tag,
    value: &Value,
) -> Result<()>
where
    W: Write,
    E: Escaper + ?Sized,
{
    match tag {
        Tag::Default => write_default(context, tag, value),
        Tag::Int => match coerce_int(tag, value)? {
            Some(int) => Ok(write!(context.writer, "{int}")?),
            None => Ok(context.write_null()?),
        },
        Tag::Float => match coerce_float(tag, value)? {
            Some(float) => write_float(context, tag, float),
            None => Ok(context.write_null()?),
        },
        Tag::Ident => write_idents(context, value),
        Tag::Array => write_array(context, value),
    }
}

/// Untagged placeholders, and every element of an `?a` list or map.
fn write_default<W, E>(context: &mut FormatContext<'_, W, E>, tag: Tag, value: &Value) -> Result<()>
where
    W: Write,
    E: Escaper + ?Sized,
{
    match value {
        Value::Null => context.write_null()?,
        Value::Bool(b) => context.write_bool(*b)?,
        Value::Int(int) => write!(context.writer, "{int}")?,
        Value::Float(float) => write_float(context, tag, *float)?,
        Value::Str(s) => context.write_literal(s)?,
        Value::List(_) | Value::Map(_) | Value::Skip => {
            return Err(Error::unsupported(tag, value.kind()));
        }
    }
    Ok(())
}

fn write_float<W, E>(context: &mut FormatContext<'_, W, E>, tag: Tag, float: f64) -> Result<()>
where
    W: Write,
    E: Escaper + ?Sized,
{
    // NaN and infinities have no SQL literal
    if !float.is_finite() {
        return Err(Error::unsupported(tag, Value::Float(float).kind()));
    }
    Ok(write!(context.writer, "{float}")?)
}

fn write_idents<W, E>(context: &mut FormatContext<'_, W, E>, value: &Value) -> Result<()>
where
    W: Write,
    E: Escaper + ?Sized,
{
    match value {
        Value::Str(ident) => context.write_ident(ident)?,
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                let Value::Str(ident) = item else {
                    return Err(Error::unsupported(Tag::Ident, item.kind()));
                };
                context.write_separator(index)?;
                context.write_ident(ident)?;
            }
        }
        _ => return Err(Error::unsupported(Tag::Ident, value.kind())),
    }
    Ok(())
}

fn write_array<W, E>(context: &mut FormatContext<'_, W, E>, value: &Value) -> Result<()>
where
    W: Write,
    E: Escaper + ?Sized,
{
    match value {
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                context.write_separator(index)?;
                write_default(context, Tag::Array, item)?;
            }
        }
        Value::Map(entries) => {
            for (index, (key, item)) in entries.iter().enumerate() {
                context.write_separator(index)?;
                context.write_ident(key)?;
                context.writer.write_str(" = ")?;
                write_default(context, Tag::Array, item)?;
            }
        }
        _ => return Err(Error::unsupported(Tag::Array, value.kind())),
    }
    Ok(())
}

/// `None` stands for SQL `NULL`.
fn coerce_int(tag: Tag, value: &Value) -> Result<Option<i64>> {
    let int = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => i64::from(*b),
        Value::Int(int) => *int,
        // saturating, truncates toward zero
        Value::Float(float) if float.is_finite() => *float as i64,
        Value::Str(s) => {
            let prefix = numeric_prefix(s);
            match prefix.parse::<i64>() {
                Ok(int) => int,
                Err(_) => prefix.parse::<f64>().map_or(0, |float| float as i64),
            }
        }
        _ => return Err(Error::unsupported(tag, value.kind())),
    };
    Ok(Some(int))
}

fn coerce_float(tag: Tag, value: &Value) -> Result<Option<f64>> {
    let float = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Int(int) => *int as f64,
        Value::Float(float) => *float,
        Value::Str(s) => numeric_prefix(s).parse::<f64>().unwrap_or(0.0),
        _ => return Err(Error::unsupported(tag, value.kind())),
    };
    // "1e400" overflows to infinity
    if !float.is_finite() {
        return Err(Error::unsupported(tag, value.kind()));
    }
    Ok(Some(float))
}

/// Longest leading decimal number in `s` (sign, digits, fraction, exponent),
/// after leading whitespace. Empty when `s` does not start with one.
fn numeric_prefix(s: &str) -> &str {
    let s = s.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if digits > 0 || frac_end > end + 1 {
            digits += frac_end - (end + 1);
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if bytes.get(end).is_some_and(|b| (b | 0x20) == b'e') {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &s[..end]
}
