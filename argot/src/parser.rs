use argot_parser::ValuePolicy;
use tracing::debug;

use crate::{
    build::build,
    errors::Result,
    help::{DEFAULT_WIDTH, Usage},
    registry::{GroupKind, Registry},
    result::{BoundValue, ParseResult},
    spec::{Alias, ArgumentSpec, Kind},
    state::bind,
};

/// Knobs that change how a [`Parser`] behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// What to do when an option that takes a value is followed by something
    /// that looks like an option
    pub value_policy: ValuePolicy,

    /// If true, `-h` and `--help` are reserved, and cause parsing to fail with
    /// [`Error::HelpRequested`][crate::Error::HelpRequested]
    pub help: bool,

    /// The width that help text is wrapped to
    pub wrap_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            value_policy: ValuePolicy::Strict,
            help: true,
            wrap_width: DEFAULT_WIDTH,
        }
    }
}

/**
A command-line parser. Register the arguments it accepts, then hand it the
command line with [`parse`][Parser::parse].

```
use argot::Parser;

let mut parser = Parser::new("demo");
parser.add_option('o', "output", "Where to write").unwrap();
parser.add_flag('v', "verbose", "Say more").unwrap();
parser.add_positional("input", "What to read").unwrap();

let result = parser.parse(["-v", "--output=out.txt", "in.txt"]).unwrap();

assert_eq!(result.get_str("output"), Some("out.txt"));
assert!(result.get_flag("verbose"));
assert_eq!(result.get_str("input"), Some("in.txt"));
```

The first call to [`parse`][Parser::parse] freezes the set of registered
arguments; after that, registration fails with
[`RegistryFrozen`][crate::Error::RegistryFrozen]. `parse` only needs a shared
reference, so a frozen parser can be used from several threads at once.
*/
#[derive(Debug, Clone)]
pub struct Parser {
    program: String,
    description: Option<String>,
    settings: Settings,
    registry: Registry,
}

impl Parser {
    /// Create a parser with the default [`Settings`]. `program` is the name
    /// shown in the usage message.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_settings(program, Settings::default())
    }

    #[must_use]
    pub fn with_settings(program: impl Into<String>, settings: Settings) -> Self {
        Self {
            program: program.into(),
            description: None,
            settings,
            registry: if settings.help {
                Registry::with_help()
            } else {
                Registry::new()
            },
        }
    }

    /// Text shown above the usage message in [`help`][Parser::help]
    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    #[must_use]
    pub fn value_policy(mut self, value_policy: ValuePolicy) -> Self {
        self.settings.value_policy = value_policy;
        self
    }

    #[must_use]
    pub fn wrap_width(mut self, wrap_width: usize) -> Self {
        self.settings.wrap_width = wrap_width;
        self
    }

    /// Don't reserve `-h` and `--help`, freeing those names for other
    /// arguments.
    #[must_use]
    pub fn disable_help(mut self) -> Self {
        if self.settings.help && !self.registry.is_frozen() {
            self.settings.help = false;
            self.registry.remove_help();
        }

        self
    }

    #[inline]
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register an argument. Fails if any of its names are already taken,
    /// if it's malformed, or if parsing has already started.
    pub fn register(&mut self, spec: ArgumentSpec) -> Result<()> {
        self.registry.register(spec)
    }

    /// Register an optional `-s`/`--long` flag that takes a value
    pub fn add_option(
        &mut self,
        short: char,
        long: impl Into<String>,
        help: impl Into<String>,
    ) -> Result<()> {
        self.register(ArgumentSpec::option().short(short).long(long).help(help))
    }

    /// Register an optional `-s`/`--long` boolean flag
    pub fn add_flag(
        &mut self,
        short: char,
        long: impl Into<String>,
        help: impl Into<String>,
    ) -> Result<()> {
        self.register(ArgumentSpec::flag().short(short).long(long).help(help))
    }

    /// Register a required positional argument
    pub fn add_positional(&mut self, name: impl Into<String>, help: impl Into<String>) -> Result<()> {
        self.register(ArgumentSpec::positional(name).help(help))
    }

    /**
    Register a group constraint over arguments that are already registered,
    named by their identities. Groups are checked after every required
    argument is known to be present.

    ```
    use argot::{Error, GroupKind, Parser};

    let mut parser = Parser::new("demo");
    parser.add_flag('j', "json", "").unwrap();
    parser.add_flag('y', "yaml", "").unwrap();
    parser.add_group("format", GroupKind::Excluded, ["json", "yaml"]).unwrap();

    assert!(parser.parse(["-j"]).is_ok());
    assert!(matches!(
        parser.parse(["-j", "-y"]),
        Err(Error::ExcludedDependency { .. })
    ));
    ```
    */
    pub fn add_group<I>(&mut self, name: impl Into<String>, kind: GroupKind, members: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry.add_group(name, kind, members)
    }

    /**
    Parse a command line, not including the program name. The first call
    freezes the registry.

    Arguments are bytes, so the `OsStr` encoded bytes of
    [`LoadedArguments`][crate::arguments::LoadedArguments] work as well as
    `&str`. Parsing stops at the first error, and no partial result is
    returned.
    */
    pub fn parse<'arg, I, T>(&self, args: I) -> Result<ParseResult>
    where
        I: IntoIterator<Item = &'arg T>,
        T: AsRef<[u8]> + ?Sized + 'arg,
    {
        if !self.registry.is_frozen() {
            debug!(
                program = self.program.as_str(),
                arguments = self.registry.specs().len(),
                "freezing argument registry"
            );
            self.registry.freeze();
        }

        let args = args.into_iter().map(|arg| arg.as_ref());

        debug!(
            program = self.program.as_str(),
            policy = ?self.settings.value_policy,
            "parsing command line"
        );

        let result = bind(&self.registry, args, self.settings.value_policy)
            .and_then(|bound| build(&self.registry, bound));

        match result {
            Ok(ref result) => debug!(bound = result.len(), "parse succeeded"),
            Err(ref error) => debug!(%error, "parse failed"),
        }

        result
    }

    /// The usage message: a synopsis line, then a line for each argument
    #[must_use]
    pub fn usage(&self) -> String {
        Usage::new(&self.program, &self.registry)
            .width(self.settings.wrap_width)
            .to_string()
    }

    /// The usage message, preceded by the description
    #[must_use]
    pub fn help(&self) -> String {
        Usage::new(&self.program, &self.registry)
            .description(self.description.as_deref())
            .width(self.settings.wrap_width)
            .to_string()
    }

    /**
    Turn a result back into a command line that parses to the same result.
    Flags are written with their preferred alias, values are attached inline
    (`--output=value`, `-ovalue`), and positionals come last, after `--`.
    */
    #[must_use]
    pub fn to_args(&self, result: &ParseResult) -> Vec<String> {
        let mut args = Vec::new();
        let mut positionals = Vec::new();

        for spec in self.registry.specs() {
            let Some(value) = result.get(&spec.identity()) else {
                continue;
            };

            match (spec.kind(), value) {
                (Kind::Positional, BoundValue::String(value)) => positionals.push(value.clone()),
                (Kind::Flag, BoundValue::Boolean(true)) => {
                    args.extend(spec.preferred_alias().map(Alias::to_string))
                }
                (Kind::Flag, BoundValue::String(value)) => match spec.preferred_alias() {
                    Some(Alias::Long(long)) => args.push(format!("--{long}={value}")),
                    Some(&Alias::Short(short)) if value.is_empty() => {
                        args.extend([format!("-{short}"), String::new()])
                    }
                    Some(Alias::Short(short)) => args.push(format!("-{short}{value}")),
                    None => {}
                },
                _ => {}
            }
        }

        if !positionals.is_empty() {
            args.push("--".to_owned());
            args.extend(positionals);
        }

        args
    }
}
