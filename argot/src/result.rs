use std::fmt;

use crate::{
    errors::{Error, Result},
    parameter::{Value, ValueError},
};

/// The value bound to a single argument after a successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// The value of an option or positional
    String(String),

    /// The state of a boolean flag. Absent flags are `false`, never
    /// [`Absent`][BoundValue::Absent].
    Boolean(bool),

    /// An optional option or positional that didn't appear
    Absent,
}

impl BoundValue {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            BoundValue::Boolean(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, BoundValue::Absent)
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::String(value) => write!(f, "{value:?}"),
            BoundValue::Boolean(value) => write!(f, "{value}"),
            BoundValue::Absent => f.write_str("<absent>"),
        }
    }
}

/**
The outcome of a successful parse: every registered argument's identity
mapped to its [`BoundValue`], in registration order.

The identity of a flag is its first long alias (without the dashes), or its
short alias if it has no long one; the identity of a positional is its name.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    entries: Vec<(String, BoundValue)>,
}

impl ParseResult {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: BoundValue) {
        self.entries.push((name, value));
    }

    /// The value bound to `name`, or [`None`] if no such argument exists
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// The string value bound to `name`, if there is one
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(BoundValue::as_str)
    }

    /// True if the boolean flag `name` was given
    #[must_use]
    pub fn get_flag(&self, name: &str) -> bool {
        self.get(name).and_then(BoundValue::as_bool).unwrap_or(false)
    }

    /// True if `name` exists and isn't [`Absent`][BoundValue::Absent]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_absent())
    }

    /**
    Convert the string value bound to `name` into a `T`. Returns `Ok(None)`
    if the argument is absent or isn't a string value, and
    [`Error::InvalidValue`] if the conversion fails.

    ```
    # use argot::{ArgumentSpec, Parser};
    let mut parser = Parser::new("demo");
    parser.register(ArgumentSpec::option().long("count")).unwrap();

    let result = parser.parse(["--count", "12"]).unwrap();
    assert_eq!(result.parse::<u32>("count").unwrap(), Some(12));
    ```
    */
    pub fn parse<T: Value>(&self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.get_str(name) else {
            return Ok(None);
        };

        T::from_arg(value)
            .map(Some)
            .map_err(|ValueError { message }| Error::InvalidValue {
                name: name.to_owned(),
                value: value.to_owned(),
                message,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
