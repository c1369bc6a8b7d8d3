use crate::{
    error::Result,
    escape::Escaper,
    template::Templater,
    value::{IntoArgs, Value},
};

/// Entry point tied to one connection's escaping rules.
#[derive(Debug, Clone)]
pub struct Database<E> {
    templater: Templater<E>,
}

impl<E: Escaper> Database<E> {
    pub fn new(escaper: E) -> Self {
        Self {
            templater: Templater::new(escaper),
        }
    }

    pub fn with_templater(templater: Templater<E>) -> Self {
        Self { templater }
    }

    pub fn templater(&self) -> &Templater<E> {
        &self.templater
    }

    /// Renders `query` with `args`; pass `()` when there is nothing to bind.
    pub fn build_query<A: IntoArgs>(&self, query: &str, args: A) -> Result<String> {
        let args = args.into_args();
        self.templater.render(query, &args)
    }

    /// The marker that drops the segment holding the placeholder it fills.
    pub fn skip(&self) -> Value {
        Value::Skip
    }
}
