/*!
Traits for converting bound string values into typed values, used by
[`ParseResult::parse`][crate::ParseResult::parse].

For types with a [`FromStr`] implementation, implement the [`ParsedValue`]
marker trait to get a [`Value`] implementation for free; the common standard
library types already have one.
 */

use core::{fmt::Display, str::FromStr};

use joinery::JoinableIterator;
use lazy_format::lazy_format;

/// Error for things that can go wrong in a [`Value`] implementation
pub trait Error {
    /// The argument failed to parse into an instance of the type
    fn parse_error(arg: &str, msg: impl Display) -> Self;

    /// The argument should have been one of these (or, possibly, a case
    /// insensitive variation)
    fn should_be(arg: &str, expected: &'static [&'static str]) -> Self;
}

/// A basic [`Error`] that just keeps the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    pub message: String,
}

impl Error for ValueError {
    fn parse_error(_arg: &str, msg: impl Display) -> Self {
        Self {
            message: msg.to_string(),
        }
    }

    fn should_be(_arg: &str, expected: &'static [&'static str]) -> Self {
        let expected = expected.iter().map(|word| lazy_format!("{word:?}"));

        Self {
            message: format!("expected one of {}", expected.join_with(", ")),
        }
    }
}

/// A type that can be converted from a single bound argument value
pub trait Value: Sized {
    fn from_arg<E: Error>(arg: &str) -> Result<Self, E>;
}

/// For types with a [`FromStr`] implementation, [`ParsedValue`] automatically
/// gives them a [`Value`] implementation.
pub trait ParsedValue: FromStr {}

impl<T> Value for T
where
    T: ParsedValue,
    T::Err: Display,
{
    #[inline]
    fn from_arg<E: Error>(arg: &str) -> Result<Self, E> {
        arg.parse().map_err(|err| E::parse_error(arg, err))
    }
}
