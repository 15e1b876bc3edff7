use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::debug;

use crate::{
    errors::{Error, Result},
    spec::{Alias, ArgumentSpec, Arity, Kind},
};

/// How the members of a [`Group`] constrain each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// If any member is given, all of them must be
    Included,

    /// At most one member may be given
    Excluded,

    /// Each member may only be given if the member before it is
    Required,
}

/// A constraint between registered arguments, checked after every
/// required argument has been found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    kind: GroupKind,
    members: Vec<usize>,
}

impl Group {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The members, as indexes into [`Registry::specs`], in the order they
    /// were given
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

/**
The set of arguments a parser knows about, in registration order.

Every name (short alias, long alias, or positional name) is unique across the
whole registry. Once parsing starts the registry is frozen, and further
registration fails with [`Error::RegistryFrozen`].
*/
#[derive(Debug, Default)]
pub struct Registry {
    specs: Vec<ArgumentSpec>,
    names: HashMap<String, usize>,
    groups: Vec<Group>,
    frozen: AtomicBool,
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            specs: self.specs.clone(),
            names: self.names.clone(),
            groups: self.groups.clone(),
            frozen: AtomicBool::new(self.is_frozen()),
        }
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that already contains the built-in `-h`/`--help` flag
    pub(crate) fn with_help() -> Self {
        let mut registry = Self::new();
        registry.insert(ArgumentSpec::help_flag());
        registry
    }

    pub fn register(&mut self, spec: ArgumentSpec) -> Result<()> {
        if self.is_frozen() {
            return Err(Error::RegistryFrozen);
        }

        check_spec(&spec)?;

        let names = spec.names();

        for (i, name) in names.iter().enumerate() {
            if self.names.contains_key(name) || names[..i].contains(name) {
                return Err(Error::DuplicateName { name: name.clone() });
            }
        }

        debug!(
            identity = %spec.identity(),
            kind = ?spec.kind(),
            arity = ?spec.arity(),
            "registered argument"
        );

        self.insert(spec);
        Ok(())
    }

    fn insert(&mut self, spec: ArgumentSpec) {
        let index = self.specs.len();

        self.names
            .extend(spec.names().into_iter().map(|name| (name, index)));
        self.specs.push(spec);
    }

    /// Drop the built-in help flag, releasing its names
    pub(crate) fn remove_help(&mut self) {
        let Some(help) = self
            .specs
            .iter()
            .position(|spec| spec.arity() == Arity::Help)
        else {
            return;
        };

        let specs = std::mem::take(&mut self.specs);
        self.names.clear();

        specs
            .into_iter()
            .filter(|spec| spec.arity() != Arity::Help)
            .for_each(|spec| self.insert(spec));

        // Groups never contain the help flag, so only later members move
        self.groups
            .iter_mut()
            .flat_map(|group| group.members.iter_mut())
            .filter(|index| **index > help)
            .for_each(|index| *index -= 1);
    }

    /**
    Add a constraint between already registered arguments, named by their
    identities. Group names have their own namespace, separate from argument
    names. The help flag can't be part of a group.
    */
    pub fn add_group<I>(&mut self, name: impl Into<String>, kind: GroupKind, members: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let name = name.into();

        if self.is_frozen() {
            return Err(Error::RegistryFrozen);
        }

        if self.groups.iter().any(|group| group.name == name) {
            return Err(Error::DuplicateName { name });
        }

        let invalid = |reason| Error::InvalidGroup {
            name: name.clone(),
            reason,
        };

        let mut indexes = Vec::new();

        for member in members {
            let index = self
                .find(member.as_ref())
                .ok_or_else(|| invalid("members must be registered arguments"))?;

            if self.specs[index].arity() == Arity::Help {
                return Err(invalid("the help flag can't be in a group"));
            }

            if indexes.contains(&index) {
                return Err(invalid("an argument can only appear in a group once"));
            }

            indexes.push(index);
        }

        if indexes.len() < 2 {
            return Err(invalid("groups need at least two members"));
        }

        debug!(group = name.as_str(), ?kind, members = indexes.len(), "registered group");

        self.groups.push(Group {
            name,
            kind,
            members: indexes,
        });

        Ok(())
    }

    /// The index of the argument with this identity
    fn find(&self, identity: &str) -> Option<usize> {
        self.specs
            .iter()
            .position(|spec| spec.identity() == identity)
    }

    /// Stop accepting registrations. This only needs a shared reference, so
    /// that a parser shared between threads still freezes on its first parse.
    pub(crate) fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// All the registered arguments, in registration order
    #[inline]
    #[must_use]
    pub fn specs(&self) -> &[ArgumentSpec] {
        &self.specs
    }

    /// The constraints between arguments, in registration order
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The positional arguments, in declaration order, with their index
    pub fn positionals(&self) -> impl Iterator<Item = (usize, &ArgumentSpec)> + Clone {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.kind() == Kind::Positional)
    }

    /// The flags, in registration order, with their index
    pub fn flags(&self) -> impl Iterator<Item = (usize, &ArgumentSpec)> + Clone {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.kind() == Kind::Flag)
    }

    /// Find the flag with this short alias
    pub fn lookup_short(&self, short: char) -> Option<(usize, &ArgumentSpec)> {
        let mut buffer = [0; 4];
        let key: &str = short.encode_utf8(&mut buffer);

        self.lookup(key, |alias| *alias == Alias::Short(short))
    }

    /// Find the flag with this long alias
    pub fn lookup_long(&self, long: &str) -> Option<(usize, &ArgumentSpec)> {
        self.lookup(long, |alias| matches!(alias, Alias::Long(name) if name == long))
    }

    fn lookup(&self, key: &str, matches: impl Fn(&Alias) -> bool) -> Option<(usize, &ArgumentSpec)> {
        let index = *self.names.get(key)?;
        let spec = &self.specs[index];

        spec.aliases()
            .iter()
            .any(matches)
            .then_some((index, spec))
    }
}

impl argot_parser::Aliases for Registry {
    #[inline]
    fn is_short(&self, short: char) -> bool {
        self.lookup_short(short).is_some()
    }
}

fn invalid(spec: &ArgumentSpec, reason: &'static str) -> Error {
    Error::InvalidSpec {
        name: spec.identity().into_owned(),
        reason,
    }
}

fn valid_long(long: &str) -> bool {
    long.len() >= 2
        && !long.starts_with('-')
        && long
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn check_spec(spec: &ArgumentSpec) -> Result<()> {
    match spec.kind() {
        Kind::Positional => {
            let name = spec.identity();

            if name.is_empty() {
                return Err(invalid(spec, "positional arguments need a name"));
            }

            if name.starts_with('-') {
                return Err(invalid(spec, "positional names can't start with '-'"));
            }

            if !spec.aliases().is_empty() {
                return Err(invalid(spec, "positional arguments can't have aliases"));
            }
        }
        Kind::Flag => {
            if spec.aliases().is_empty() {
                return Err(invalid(spec, "flags need at least one alias"));
            }

            for alias in spec.aliases() {
                match alias {
                    Alias::Short(short) if !short.is_ascii_alphanumeric() => {
                        return Err(invalid(spec, "short aliases must be a letter or digit"));
                    }
                    Alias::Long(long) if !valid_long(long) => {
                        return Err(invalid(
                            spec,
                            "long aliases need at least two letters, digits, '_' or '-'",
                        ));
                    }
                    _ => {}
                }
            }
        }
    }

    match (spec.arity(), spec.default()) {
        (Arity::BooleanToggle | Arity::Help, Some(_)) => {
            Err(invalid(spec, "boolean flags can't have a default value"))
        }
        _ => Ok(()),
    }
}
