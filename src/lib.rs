extern crate self as qplate;

mod block;
mod cast;
mod database;
mod error;
mod escape;
mod placeholder;
mod template;
mod value;
mod writer;

pub use block::Segment;
pub use block::split;

pub use database::Database;

pub use error::Error;
pub use error::Result;

pub use escape::AnsiEscaper;
pub use escape::Escaper;
pub use escape::FnEscaper;
pub use escape::MySqlEscaper;

pub use placeholder::Tag;
pub use placeholder::Token;
pub use placeholder::Tokens;
pub use placeholder::tokenize;

pub use template::SkipMode;
pub use template::Templater;

pub use value::Args;
pub use value::IntoArgs;
pub use value::IntoValue;
pub use value::Value;
pub use value::ValueKind;

pub use qplate_derive::IntoValue;
pub use smol_str::SmolStr;

pub fn skip() -> Value {
    Value::Skip
}

/// Renders `template` with the MySQL escaping rules.
pub fn render(template: &str, args: &[Value]) -> Result<String> {
    Templater::new(MySqlEscaper).render(template, args)
}

#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ( $($arg:expr),+ $(,)? ) => {
        ::std::vec![$( $crate::IntoValue::into_value($arg) ),+]
    };
}
