use argot_parser::{Arg, ArgAccess, RawToken, Tokenizer, ValuePolicy};
use tracing::trace;

use crate::{
    errors::{Error, Result},
    registry::Registry,
    result::BoundValue,
    spec::{Alias, Arity},
};

/// The state associated with a parse in progress: the value bound to each
/// registered argument so far, indexed like [`Registry::specs`].
pub(crate) struct State<'r> {
    registry: &'r Registry,
    bound: Vec<BoundValue>,
    positionals: Vec<usize>,
    next_positional: usize,
}

impl<'r> State<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            bound: vec![BoundValue::Absent; registry.specs().len()],
            positionals: registry.positionals().map(|(index, _)| index).collect(),
            next_positional: 0,
        }
    }

    /// Bind a bare value to the next positional that doesn't have one yet
    pub fn add_positional(&mut self, argument: Arg<'_>) -> Result<()> {
        let Some(&index) = self.positionals.get(self.next_positional) else {
            return Err(Error::TooManyPositionals {
                value: lossy(argument),
            });
        };

        let value = to_string(argument)?;

        trace!(
            positional = %self.registry.specs()[index].identity(),
            value = value.as_str(),
            "bound positional"
        );

        self.bound[index] = BoundValue::String(value);
        self.next_positional += 1;
        Ok(())
    }

    /// Handle a `--long` or `--long=value` option
    pub fn add_long<'arg>(
        &mut self,
        option: Arg<'arg>,
        value: Option<Arg<'arg>>,
        argument: impl ArgAccess<'arg>,
    ) -> Result<()> {
        let registry = self.registry;
        let found = option.as_str().and_then(|name| registry.lookup_long(name));

        match found {
            Some((index, _)) => {
                let alias = Alias::Long(lossy(option));
                self.add_option(index, alias, value, argument)
            }
            None => Err(Error::UnknownOption(Alias::Long(lossy(option)))),
        }
    }

    /// Handle a `-s` or `-svalue` option
    pub fn add_short<'arg>(
        &mut self,
        option: char,
        value: Option<Arg<'arg>>,
        argument: impl ArgAccess<'arg>,
    ) -> Result<()> {
        let registry = self.registry;

        match registry.lookup_short(option) {
            Some((index, _)) => self.add_option(index, Alias::Short(option), value, argument),
            None => Err(Error::UnknownOption(Alias::Short(option))),
        }
    }

    fn add_option<'arg>(
        &mut self,
        index: usize,
        alias: Alias,
        value: Option<Arg<'arg>>,
        argument: impl ArgAccess<'arg>,
    ) -> Result<()> {
        match self.registry.specs()[index].arity() {
            Arity::Help => Err(Error::HelpRequested),
            Arity::BooleanToggle => match value {
                Some(value) => Err(Error::UnexpectedValue {
                    option: alias,
                    value: lossy(value),
                }),
                None => {
                    trace!(%alias, "bound flag");
                    self.bound[index] = BoundValue::Boolean(true);
                    Ok(())
                }
            },
            Arity::TakesValue => {
                let value = match value {
                    Some(value) => value,
                    None => match argument.take() {
                        Some(value) => value,
                        None => return Err(Error::MissingValue(alias)),
                    },
                };

                let value = to_string(value)?;
                trace!(%alias, value = value.as_str(), "bound option");

                // A repeated option overwrites the earlier value
                self.bound[index] = BoundValue::String(value);
                Ok(())
            }
        }
    }

    pub fn into_bound(self) -> Vec<BoundValue> {
        self.bound
    }
}

/// Walk the tokens of `args` in order, binding each to the registered
/// argument it matches. Stops at the first error.
pub(crate) fn bind<'arg>(
    registry: &Registry,
    args: impl Iterator<Item = &'arg [u8]>,
    policy: ValuePolicy,
) -> Result<Vec<BoundValue>> {
    let mut tokens = Tokenizer::new(args, registry);
    let mut state = State::new(registry);

    while let Some(token) = tokens.next() {
        match token {
            RawToken::Bare(argument) => state.add_positional(argument)?,
            RawToken::Long { name, value } => {
                state.add_long(name, value, tokens.access(policy))?
            }
            RawToken::Short { name, value } => {
                state.add_short(name, value, tokens.access(policy))?
            }
        }
    }

    Ok(state.into_bound())
}

fn lossy(arg: Arg<'_>) -> String {
    String::from_utf8_lossy(arg.bytes()).into_owned()
}

fn to_string(arg: Arg<'_>) -> Result<String> {
    match arg.as_str() {
        Some(value) => Ok(value.to_owned()),
        None => Err(Error::InvalidUtf8 {
            argument: lossy(arg),
        }),
    }
}
