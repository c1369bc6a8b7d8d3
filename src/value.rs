use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

use indexmap::IndexMap;
use smol_str::SmolStr;

/// One argument handed to a template render.
///
/// `Skip` carries no payload: bound to a placeholder it drops the segment
/// the placeholder sits in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(SmolStr),
    List(Vec<Value>),
    Map(IndexMap<SmolStr, Value>),
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Skip,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Skip => "skip marker",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Skip => ValueKind::Skip,
        }
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, Value::Skip)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn str_static(value: &'static str) -> Self {
        Value::Str(SmolStr::new_static(value))
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// The ordered argument list for one render call.
pub type Args = Vec<Value>;

pub trait IntoArgs {
    fn into_args(self) -> Args;
}

impl IntoArgs for () {
    fn into_args(self) -> Args {
        Args::new()
    }
}

impl<T> IntoArgs for Vec<T>
where
    T: IntoValue,
{
    fn into_args(self) -> Args {
        self.into_iter().map(IntoValue::into_value).collect()
    }
}

impl<T, const N: usize> IntoArgs for [T; N]
where
    T: IntoValue,
{
    fn into_args(self) -> Args {
        self.into_iter().map(IntoValue::into_value).collect()
    }
}

impl<T> IntoArgs for &[T]
where
    T: IntoValue + Clone,
{
    fn into_args(self) -> Args {
        self.iter().cloned().map(IntoValue::into_value).collect()
    }
}

impl IntoValue for Value {
    #[inline(always)]
    fn into_value(self) -> Value {
        self
    }
}

macro_rules! impl_into_value {
    ($($ty:ty => |$v:ident| $body:expr),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    let $v = self;
                    $body
                }
            }

            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    value.into_value()
                }
            }
        )+
    };
}

impl_into_value! {
    bool => |v| Value::Bool(v),
    i8 => |v| Value::Int(v.into()),
    i16 => |v| Value::Int(v.into()),
    i32 => |v| Value::Int(v.into()),
    i64 => |v| Value::Int(v),
    u8 => |v| Value::Int(v.into()),
    u16 => |v| Value::Int(v.into()),
    u32 => |v| Value::Int(v.into()),
    f32 => |v| Value::Float(v.into()),
    f64 => |v| Value::Float(v),
    char => |v| Value::Str(smol_str::format_smolstr!("{}", v)),
    &str => |v| Value::Str(SmolStr::new(v)),
    &String => |v| Value::Str(SmolStr::new(v)),
    String => |v| Value::Str(SmolStr::new(v)),
    Box<str> => |v| Value::Str(SmolStr::new(v)),
    Arc<str> => |v| Value::Str(SmolStr::new(v)),
    SmolStr => |v| Value::Str(v),
}

impl<'a> IntoValue for Cow<'a, str> {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(SmolStr::new(self))
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(value: Cow<'a, str>) -> Self {
        value.into_value()
    }
}

impl<T> IntoValue for Option<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        if let Some(value) = self {
            value.into_value()
        } else {
            Value::Null
        }
    }
}

impl<T: IntoValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}

impl<T> IntoValue for Vec<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        value.into_value()
    }
}

impl<T, const N: usize> IntoValue for [T; N]
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        value.into_value()
    }
}

impl<T> IntoValue for &[T]
where
    T: IntoValue + Clone,
{
    fn into_value(self) -> Value {
        Value::List(self.iter().cloned().map(IntoValue::into_value).collect())
    }
}


impl<K, V, S> IntoValue for IndexMap<K, V, S>
where
    K: Into<SmolStr>,
    V: IntoValue,
{
    fn into_value(self) -> Value {
        self.into_iter().collect()
    }
}

impl<K: Into<SmolStr>, V: IntoValue, S> From<IndexMap<K, V, S>> for Value {
    fn from(value: IndexMap<K, V, S>) -> Self {
        value.into_value()
    }
}

impl<K, V> IntoValue for BTreeMap<K, V>
where
    K: Into<SmolStr>,
    V: IntoValue,
{
    fn into_value(self) -> Value {
        self.into_iter().collect()
    }
}

impl<K: Into<SmolStr>, V: IntoValue> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        value.into_value()
    }
}

impl<K, V> FromIterator<(K, V)> for Value
where
    K: Into<SmolStr>,
    V: IntoValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into_value()))
                .collect(),
        )
    }
}

#[cfg(feature = "chrono")]
mod chrono_impl {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

    use super::{IntoValue, Value};

    impl IntoValue for NaiveDate {
        fn into_value(self) -> Value {
            Value::Str(smol_str::format_smolstr!("{}", self.format("%Y-%m-%d")))
        }
    }

    impl From<NaiveDate> for Value {
        fn from(value: NaiveDate) -> Self {
            value.into_value()
        }
    }

    impl IntoValue for NaiveDateTime {
        fn into_value(self) -> Value {
            Value::Str(smol_str::format_smolstr!("{}", self.format("%Y-%m-%d %H:%M:%S")))
        }
    }

    impl From<NaiveDateTime> for Value {
        fn from(value: NaiveDateTime) -> Self {
            value.into_value()
        }
    }

    impl<Tz: TimeZone> IntoValue for DateTime<Tz> {
        fn into_value(self) -> Value {
            self.naive_local().into_value()
        }
    }

    impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
        fn from(value: DateTime<Tz>) -> Self {
            value.into_value()
        }
    }
}

#[cfg(feature = "uuid")]
mod uuid_impl {
    use super::{IntoValue, Value};

    impl IntoValue for uuid::Uuid {
        fn into_value(self) -> Value {
            Value::Str(smol_str::format_smolstr!("{}", self.hyphenated()))
        }
    }

    impl From<uuid::Uuid> for Value {
        fn from(value: uuid::Uuid) -> Self {
            value.into_value()
        }
    }
}

#[cfg(feature = "json")]
mod json_impl {
    use smol_str::SmolStr;

    use super::{IntoValue, Value};

    impl IntoValue for serde_json::Value {
        fn into_value(self) -> Value {
            match self {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::Bool(b),
                serde_json::Value::Number(number) => match number.as_i64() {
                    Some(int) => Value::Int(int),
                    None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
                },
                serde_json::Value::String(s) => Value::Str(SmolStr::new(s)),
                serde_json::Value::Array(items) => items.into_value(),
                serde_json::Value::Object(map) => map.into_iter().collect(),
            }
        }
    }

    impl From<serde_json::Value> for Value {
        fn from(value: serde_json::Value) -> Self {
            value.into_value()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::Int(5), 5i32.into_value());
        assert_eq!(Value::Bool(true), true.into_value());
        assert_eq!(Value::Float(1.5), 1.5f64.into_value());
        assert_eq!(Value::str_static("Jack"), "Jack".into_value());
        assert_eq!(Value::str_static("x"), 'x'.into_value());
    }

    #[test]
    fn test_option_none_is_null() {
        let none: Option<i32> = None;
        assert!(none.into_value().is_null());
        assert_eq!(Value::Int(3), Some(3i64).into_value());
    }

    #[test]
    fn test_list_conversion() {
        let value = vec!["name", "email"].into_value();
        assert_eq!(
            Value::List(vec![Value::str_static("name"), Value::str_static("email")]),
            value
        );
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("name", Value::from("Jack"));
        map.insert("block", Value::from(false));
        let Value::Map(map) = map.into_value() else {
            panic!("expected a map");
        };
        let keys: Vec<&str> = map.keys().map(SmolStr::as_str).collect();
        assert_eq!(vec!["name", "block"], keys);
    }

    #[test]
    fn test_btree_map_uses_key_order() {
        let mut map = BTreeMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        let Value::Map(map) = map.into_value() else {
            panic!("expected a map");
        };
        let entries: Vec<(&str, &Value)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(vec![("alpha", &Value::Int(2)), ("zeta", &Value::Int(1))], entries);
    }

    #[test]
    fn test_into_args() {
        assert!(().into_args().is_empty());
        let args = [1, 2, 3].into_args();
        assert_eq!(3, args.len());
        assert_eq!(Value::Int(2), args[1]);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!("skip marker", Value::Skip.kind().to_string());
        assert_eq!("map", Value::Map(IndexMap::new()).kind().to_string());
    }
}


#[cfg(all(test, feature = "uuid"))]
mod uuid_tests {
    use super::*;

    #[test]
    fn test_uuid_is_hyphenated() {
        assert_eq!(
            Value::str_static("00000000-0000-0000-0000-000000000000"),
            uuid::Uuid::nil().into_value()
        );
        let id = uuid::Uuid::parse_str("67e5504410b1426f9247bb680e5fe0c8").unwrap();
        assert_eq!(
            Value::str_static("67e55044-10b1-426f-9247-bb680e5fe0c8"),
            id.into_value()
        );
    }
}
