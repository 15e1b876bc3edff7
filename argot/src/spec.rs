/*!
Definitions of the arguments a [`Parser`][crate::Parser] accepts. Build an
[`ArgumentSpec`] with one of its constructors, then pass it to
[`Parser::register`][crate::Parser::register].

```
use argot::ArgumentSpec;

let output = ArgumentSpec::option()
    .short('o')
    .long("output")
    .placeholder("FILE")
    .help("Where to write the result");

let verbose = ArgumentSpec::flag().short('v').long("verbose");
let input = ArgumentSpec::positional("input").help("The file to read");
```
*/

use std::{borrow::Cow, fmt};

/// A name by which a flag is invoked on the command line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alias {
    /// `-s`
    Short(char),

    /// `--long`
    Long(String),
}

impl Alias {
    #[inline]
    #[must_use]
    pub fn is_short(&self) -> bool {
        matches!(self, Alias::Short(_))
    }

    /// The alias without its leading dashes
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Alias::Short(short) => Cow::Owned(short.to_string()),
            Alias::Long(long) => Cow::Borrowed(long),
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alias::Short(short) => write!(f, "-{short}"),
            Alias::Long(long) => write!(f, "--{long}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Identified by one or more aliases, like `-o` or `--output`
    Flag,

    /// Identified only by its position among the other positionals
    Positional,
}

/// How many values a flag consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value, either inline (`--output=x`, `-ox`) or as the next
    /// argument
    TakesValue,

    /// No value; present means `true`, absent means `false`
    BooleanToggle,

    /// The built-in `-h`/`--help` flag. It's never bound; seeing it aborts
    /// the parse with [`Error::HelpRequested`][crate::Error::HelpRequested].
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Mandatory,
}

/// The definition of a single flag or positional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    kind: Kind,
    aliases: Vec<Alias>,
    name: String,
    arity: Arity,
    requirement: Requirement,
    help: String,
    placeholder: Option<String>,
    default: Option<String>,
}

impl ArgumentSpec {
    fn new(kind: Kind, arity: Arity, requirement: Requirement) -> Self {
        Self {
            kind,
            aliases: Vec::new(),
            name: String::new(),
            arity,
            requirement,
            help: String::new(),
            placeholder: None,
            default: None,
        }
    }

    /// An optional flag that takes a value, like `--output FILE`. Add at
    /// least one alias with [`short`][Self::short] or [`long`][Self::long].
    #[must_use]
    pub fn option() -> Self {
        Self::new(Kind::Flag, Arity::TakesValue, Requirement::Optional)
    }

    /// An optional boolean flag, like `--verbose`. Add at least one alias
    /// with [`short`][Self::short] or [`long`][Self::long].
    #[must_use]
    pub fn flag() -> Self {
        Self::new(Kind::Flag, Arity::BooleanToggle, Requirement::Optional)
    }

    /// A required positional argument
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(Kind::Positional, Arity::TakesValue, Requirement::Mandatory)
        }
    }

    pub(crate) fn help_flag() -> Self {
        Self::new(Kind::Flag, Arity::Help, Requirement::Optional)
            .short('h')
            .long("help")
            .help("Print this help message and exit")
    }

    /// Add a short alias, like `-o`
    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.aliases.push(Alias::Short(short));
        self
    }

    /// Add a long alias, like `--output`
    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.aliases.push(Alias::Long(long.into()));
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Mandatory;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// The name shown for this argument's value in usage messages
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// A value to bind when the argument is absent. This makes the argument
    /// optional.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self.requirement = Requirement::Optional;
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[inline]
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Mandatory
    }

    /// The aliases of a flag, in the order they were added. Always empty for
    /// positionals.
    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    #[inline]
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help
    }

    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /**
    The key this argument is stored under in a
    [`ParseResult`][crate::ParseResult]: the first long alias of a flag, or
    its first short alias if it has no long ones, or the name of a
    positional.
    */
    #[must_use]
    pub fn identity(&self) -> Cow<'_, str> {
        match self.kind {
            Kind::Positional => Cow::Borrowed(&self.name),
            Kind::Flag => self
                .aliases
                .iter()
                .find(|alias| !alias.is_short())
                .or_else(|| self.aliases.first())
                .map(Alias::name)
                .unwrap_or_default(),
        }
    }

    /// The alias used to mention this flag in messages. Long aliases are
    /// preferred.
    #[must_use]
    pub fn preferred_alias(&self) -> Option<&Alias> {
        self.aliases
            .iter()
            .find(|alias| !alias.is_short())
            .or_else(|| self.aliases.first())
    }

    /// The name shown for this argument's value in usage messages. Defaults
    /// to the upper-cased identity for flags and the name for positionals.
    #[must_use]
    pub fn value_placeholder(&self) -> Cow<'_, str> {
        match (&self.placeholder, self.kind) {
            (Some(placeholder), _) => Cow::Borrowed(placeholder),
            (None, Kind::Positional) => Cow::Borrowed(&self.name),
            (None, Kind::Flag) => Cow::Owned(self.identity().to_uppercase()),
        }
    }

    /// Every name this argument occupies in the shared namespace
    pub(crate) fn names(&self) -> Vec<String> {
        match self.kind {
            Kind::Positional => vec![self.name.clone()],
            Kind::Flag => self
                .aliases
                .iter()
                .map(|alias| alias.name().into_owned())
                .collect(),
        }
    }
}
