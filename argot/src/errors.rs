/*!
The error type for everything that can go wrong in [`argot`][crate], from
registering arguments to parsing the command line to reading typed values
out of the result.
 */

use std::fmt;

use crate::spec::Alias;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Filtered, user-printable identification for an argument that was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// The argument is a flag, identified by its preferred alias
    Flag(Alias),

    /// The argument is a positional, identified by its placeholder
    Positional { placeholder: String },
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Flag(alias) => write!(f, "option {alias}"),
            FieldKind::Positional { placeholder } => write!(f, "argument <{placeholder}>"),
        }
    }
}

/**
Errors produced while registering arguments, parsing the command line, or
converting bound values. The [`Display`][fmt::Display] implementation is a
single-line diagnostic suitable for showing to a user; see also
[`format_error`][crate::help::format_error].

Parsing always stops at the first error.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A registered argument reused a name that was already taken. Short
    /// aliases, long aliases, and positional names all share one namespace.
    #[error("argument name {name:?} is already registered")]
    DuplicateName { name: String },

    /// Tried to register an argument after the parser had started parsing
    #[error("arguments can't be registered after parsing has started")]
    RegistryFrozen,

    /// A registered argument was malformed
    #[error("invalid argument definition {name:?}: {reason}")]
    InvalidSpec { name: String, reason: &'static str },

    /// A group of arguments was malformed
    #[error("invalid argument group {name:?}: {reason}")]
    InvalidGroup { name: String, reason: &'static str },

    /// Got an option that we didn't recognize
    #[error("unrecognized option {0}")]
    UnknownOption(Alias),

    /// This option needs a value, and none was provided
    #[error("option {0} requires an argument")]
    MissingValue(Alias),

    /// This option is a flag; it got a value and didn't want one
    #[error("option {option} doesn't take an argument (got {value:?})")]
    UnexpectedValue { option: Alias, value: String },

    /// Got a bare value after every positional was already bound
    #[error("unexpected argument {value:?}")]
    TooManyPositionals { value: String },

    /// An argument wasn't valid UTF-8
    #[error("argument {argument:?} wasn't valid utf-8")]
    InvalidUtf8 { argument: String },

    /// A required argument was absent
    #[error("required {kind} was omitted")]
    MissingRequired { name: String, kind: FieldKind },

    /// One member of an [`Included`][crate::registry::GroupKind::Included]
    /// group was given, so all of them must be
    #[error("missing {argument}, since {peer} was given")]
    IncludedDependency {
        group: String,
        argument: FieldKind,
        peer: FieldKind,
    },

    /// Two members of an [`Excluded`][crate::registry::GroupKind::Excluded]
    /// group were given
    #[error("{argument} can't be used with {peer}")]
    ExcludedDependency {
        group: String,
        argument: FieldKind,
        peer: FieldKind,
    },

    /// A member of a [`Required`][crate::registry::GroupKind::Required]
    /// group was given without the member before it
    #[error("{argument} was given without {peer}")]
    RequiredDependency {
        group: String,
        argument: FieldKind,
        peer: FieldKind,
    },

    /// A bound value couldn't be converted to the requested type
    #[error("{name}: failed to parse {value:?}: {message}")]
    InvalidValue {
        name: String,
        value: String,
        message: String,
    },

    /// `-h` or `--help` was given. This isn't really a failure; callers
    /// usually print the help text and exit successfully.
    #[error("usage message was requested")]
    HelpRequested,
}

impl Error {
    /// The identity of the argument a [`MissingRequired`][Error::MissingRequired]
    /// error is about
    #[must_use]
    pub fn missing_argument(&self) -> Option<&str> {
        match self {
            Error::MissingRequired { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True if this is a request for help rather than a real error
    #[inline]
    #[must_use]
    pub fn is_help_request(&self) -> bool {
        matches!(self, Error::HelpRequested)
    }
}
