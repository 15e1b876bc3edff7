use crate::{
    errors::{Error, FieldKind, Result},
    registry::{Group, GroupKind, Registry},
    result::{BoundValue, ParseResult},
    spec::{Alias, ArgumentSpec, Arity, Kind},
};

/**
Turn the values bound during parsing into the final [`ParseResult`]. This is
where absent required arguments are detected: positionals are checked first,
in declaration order, then flags in registration order, so the reported
argument is always the same for the same input. After that, each group's
constraint is checked, in registration order.

Absent boolean flags become `false`, and absent arguments with a default get
their default. The help flag never appears in the result.
*/
pub(crate) fn build(registry: &Registry, bound: Vec<BoundValue>) -> Result<ParseResult> {
    debug_assert_eq!(registry.specs().len(), bound.len());

    registry
        .positionals()
        .chain(registry.flags())
        .filter(|&(index, spec)| spec.is_required() && bound[index].is_absent())
        .map(|(_, spec)| required(spec))
        .next()
        .map_or(Ok(()), Err)?;

    registry
        .groups()
        .iter()
        .try_for_each(|group| check_group(registry, group, &bound))?;

    let mut result = ParseResult::with_capacity(bound.len());

    registry
        .specs()
        .iter()
        .zip(bound)
        .filter(|(spec, _)| spec.arity() != Arity::Help)
        .for_each(|(spec, value)| {
            let value = match (value, spec.arity(), spec.default()) {
                (BoundValue::Absent, Arity::BooleanToggle, _) => BoundValue::Boolean(false),
                (BoundValue::Absent, _, Some(default)) => BoundValue::String(default.to_owned()),
                (value, _, _) => value,
            };

            result.push(spec.identity().into_owned(), value);
        });

    Ok(result)
}

fn field(spec: &ArgumentSpec) -> FieldKind {
    match spec.kind() {
        Kind::Positional => FieldKind::Positional {
            placeholder: spec.value_placeholder().into_owned(),
        },
        Kind::Flag => FieldKind::Flag(
            spec.preferred_alias()
                .cloned()
                .unwrap_or_else(|| Alias::Long(spec.identity().into_owned())),
        ),
    }
}

fn required(spec: &ArgumentSpec) -> Error {
    Error::MissingRequired {
        name: spec.identity().into_owned(),
        kind: field(spec),
    }
}

/// Given on the command line. A boolean flag that wasn't given is `false`,
/// not absent, once the result is built, but here it's still untouched.
fn given(value: &BoundValue) -> bool {
    match *value {
        BoundValue::String(_) => true,
        BoundValue::Boolean(value) => value,
        BoundValue::Absent => false,
    }
}

fn check_group(registry: &Registry, group: &Group, bound: &[BoundValue]) -> Result<()> {
    let specs = registry.specs();
    let members = group.members();
    let is_given = |index: usize| given(&bound[index]);

    let pair = match group.kind() {
        // The first absent member, blamed on the first given one
        GroupKind::Included => members
            .iter()
            .find(|&&index| is_given(index))
            .and_then(|&peer| {
                members
                    .iter()
                    .find(|&&index| !is_given(index))
                    .map(|&argument| (argument, peer))
            }),

        // The second given member, blamed on the first
        GroupKind::Excluded => {
            let mut present = members.iter().copied().filter(|&index| is_given(index));
            present
                .next()
                .and_then(|peer| present.next().map(|argument| (argument, peer)))
        }

        // The first given member whose predecessor wasn't given
        GroupKind::Required => members
            .windows(2)
            .find(|pair| is_given(pair[1]) && !is_given(pair[0]))
            .map(|pair| (pair[1], pair[0])),
    };

    let Some((argument, peer)) = pair else {
        return Ok(());
    };

    let name = group.name().to_owned();
    let argument = field(&specs[argument]);
    let peer = field(&specs[peer]);

    Err(match group.kind() {
        GroupKind::Included => Error::IncludedDependency {
            group: name,
            argument,
            peer,
        },
        GroupKind::Excluded => Error::ExcludedDependency {
            group: name,
            argument,
            peer,
        },
        GroupKind::Required => Error::RequiredDependency {
            group: name,
            argument,
            peer,
        },
    })
}
