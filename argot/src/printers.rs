use std::{
    borrow::Cow,
    fmt::{self, Display, Write},
};

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;
use textwrap::core::display_width;

use crate::{
    registry::Registry,
    spec::{Alias, ArgumentSpec, Arity, Requirement},
};

/// Items wider than this get their description on the following line
const MAX_COLUMN: usize = 24;

/// The indentation of section bodies
const INDENT: &str = "  ";

/// `-o, --output <OUTPUT>`, as shown in the options section
fn flag_item(spec: &ArgumentSpec) -> impl Display + '_ {
    let shorts = spec.aliases().iter().filter(|alias| alias.is_short());
    let longs = spec.aliases().iter().filter(|alias| !alias.is_short());
    let tags = shorts.clone().chain(longs).join_with(", ");

    // Line up long-only flags with the long aliases of the others
    let pad = match shorts.clone().next() {
        Some(_) => "",
        None => "    ",
    };

    lazy_format!(match (spec.arity()) {
        Arity::TakesValue => (
            "{pad}{tags} <{placeholder}>",
            placeholder = spec.value_placeholder()
        ),
        _ => "{pad}{tags}",
    })
}

/// `<input>` or `[input]`
fn positional_item(spec: &ArgumentSpec) -> impl Display + '_ {
    let placeholder = spec.value_placeholder();

    lazy_format!(match (spec.requirement()) {
        Requirement::Mandatory => "<{placeholder}>",
        Requirement::Optional => "[{placeholder}]",
    })
}

/// `--output <OUTPUT>`, as shown in the synopsis line
fn flag_synopsis(spec: &ArgumentSpec) -> impl Display + '_ {
    let tag = spec
        .preferred_alias()
        .cloned()
        .unwrap_or_else(|| Alias::Long(spec.identity().into_owned()));

    let tag = lazy_format!(match (spec.arity()) {
        Arity::TakesValue => (
            "{tag} <{placeholder}>",
            placeholder = spec.value_placeholder()
        ),
        _ => "{tag}",
    });

    lazy_format!(match (spec.requirement()) {
        Requirement::Mandatory => "{tag}",
        Requirement::Optional => "[{tag}]",
    })
}

fn help_text(spec: &ArgumentSpec) -> Cow<'_, str> {
    match (spec.help_text(), spec.default()) {
        (help, None) => Cow::Borrowed(help),
        ("", Some(default)) => Cow::Owned(format!("[default: {default}]")),
        (help, Some(default)) => Cow::Owned(format!("{help} [default: {default}]")),
    }
}

/*
Overall structure:

DESCRIPTION

Usage: command [--foo <FOO>] <arg>

Arguments:
  <arg>        Text

Options:
  -f, --foo <FOO>  Text
  -h, --help       Text
 */
pub fn print_help(
    out: &mut (impl Write + ?Sized),
    program: &str,
    description: Option<&str>,
    registry: &Registry,
    width: usize,
) -> fmt::Result {
    if let Some(description) = description {
        writeln!(out, "{}\n", textwrap::fill(description, width))?;
    }

    print_usage(out, program, registry, width)
}

pub fn print_usage(
    out: &mut (impl Write + ?Sized),
    program: &str,
    registry: &Registry,
    width: usize,
) -> fmt::Result {
    write!(out, "Usage: {program}")?;

    registry
        .flags()
        .filter(|(_, spec)| spec.arity() != Arity::Help)
        .try_for_each(|(_, spec)| write!(out, " {}", flag_synopsis(spec)))?;

    registry
        .positionals()
        .try_for_each(|(_, spec)| write!(out, " {}", positional_item(spec)))?;

    writeln!(out)?;

    let positionals: Vec<(String, &ArgumentSpec)> = registry
        .positionals()
        .map(|(_, spec)| (positional_item(spec).to_string(), spec))
        .collect();

    let flags: Vec<(String, &ArgumentSpec)> = registry
        .flags()
        .map(|(_, spec)| (flag_item(spec).to_string(), spec))
        .collect();

    // Descriptions all start in the same column, unless an item is too wide
    let column = positionals
        .iter()
        .chain(&flags)
        .map(|(item, _)| display_width(item))
        .filter(|&item_width| item_width <= MAX_COLUMN)
        .max()
        .unwrap_or(0)
        + 2;

    let width = width.saturating_sub(INDENT.len());

    maybe_section(out, "Arguments", &positionals, |out, (item, spec)| {
        describe(out, item, spec, column, width)
    })?;

    maybe_section(out, "Options", &flags, |out, (item, spec)| {
        describe(out, item, spec, column, width)
    })
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<O: Write + ?Sized>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(&mut IndentWriter<&mut O>) -> fmt::Result,
) -> fmt::Result {
    writeln!(out, "\n{header}:")?;
    body(&mut IndentWriter::new(INDENT, out))
}

/// Write a section only if there's something to put in it
fn maybe_section<O: Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    items: &[T],
    body: impl Fn(&mut IndentWriter<&mut O>, &T) -> fmt::Result,
) -> fmt::Result {
    match items {
        [] => Ok(()),
        items => section(out, header, |out| {
            items.iter().try_for_each(|item| body(out, item))
        }),
    }
}

/// Describe an item by printing it, followed by its wrapped description,
/// starting at `column`. If the item doesn't fit before the column, the
/// description starts on the next line instead.
fn describe(
    out: &mut (impl Write + ?Sized),
    item: &str,
    spec: &ArgumentSpec,
    column: usize,
    width: usize,
) -> fmt::Result {
    let text = help_text(spec);

    if text.is_empty() {
        return writeln!(out, "{item}");
    }

    let indent = " ".repeat(column);
    let options = textwrap::Options::new(width.max(column + 16)).subsequent_indent(&indent);

    let item_width = display_width(item);

    if item_width + 2 <= column {
        let first = format!("{item}{}", " ".repeat(column - item_width));
        writeln!(out, "{}", textwrap::fill(&text, options.initial_indent(&first)))
    } else {
        writeln!(out, "{item}")?;
        writeln!(out, "{}", textwrap::fill(&text, options.initial_indent(&indent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Registry {
        let mut registry = Registry::with_help();
        registry
            .register(
                ArgumentSpec::option()
                    .short('o')
                    .long("output")
                    .help("Try me!"),
            )
            .unwrap();
        registry
            .register(
                ArgumentSpec::flag()
                    .short('1')
                    .long("123")
                    .help("How u do dis!"),
            )
            .unwrap();
        registry.register(ArgumentSpec::positional("test")).unwrap();
        registry
    }

    fn usage(registry: &Registry, width: usize) -> String {
        let mut out = String::new();
        print_usage(&mut out, "demo", registry, width).unwrap();
        out
    }

    #[test]
    fn items() {
        let spec = ArgumentSpec::option().long("level").placeholder("N");
        assert_eq!(flag_item(&spec).to_string(), "    --level <N>");
        assert_eq!(flag_synopsis(&spec).to_string(), "[--level <N>]");

        let spec = ArgumentSpec::flag().short('v').required();
        assert_eq!(flag_item(&spec).to_string(), "-v");
        assert_eq!(flag_synopsis(&spec).to_string(), "-v");

        let spec = ArgumentSpec::positional("input").optional();
        assert_eq!(positional_item(&spec).to_string(), "[input]");
    }

    #[test]
    fn full_usage() {
        let expected = "\
Usage: demo [--output <OUTPUT>] [--123] <test>

Arguments:
  <test>

Options:
  -h, --help             Print this help message and exit
  -o, --output <OUTPUT>  Try me!
  -1, --123              How u do dis!
";

        assert_eq!(usage(&demo(), 80), expected);
    }

    #[test]
    fn defaults_are_described() {
        let mut registry = Registry::new();
        registry
            .register(ArgumentSpec::option().long("level").default_value("3"))
            .unwrap();

        let expected = "\
Usage: demo [--level <LEVEL>]

Options:
      --level <LEVEL>  [default: 3]
";

        assert_eq!(usage(&registry, 80), expected);
    }

    #[test]
    fn wide_items_get_their_own_line() {
        let mut registry = Registry::new();
        registry
            .register(
                ArgumentSpec::option()
                    .long("extremely-long-option-name")
                    .placeholder("VALUE")
                    .help("Described below"),
            )
            .unwrap();
        registry
            .register(ArgumentSpec::flag().short('q').help("Quiet"))
            .unwrap();

        let expected = "\
Usage: demo [--extremely-long-option-name <VALUE>] [-q]

Options:
      --extremely-long-option-name <VALUE>
      Described below
  -q  Quiet
";

        assert_eq!(usage(&registry, 80), expected);
    }

    #[test]
    fn columns_use_display_width() {
        let mut registry = Registry::new();
        registry
            .register(
                ArgumentSpec::option()
                    .long("price")
                    .placeholder("値段")
                    .help("Cost"),
            )
            .unwrap();
        registry
            .register(ArgumentSpec::flag().short('q').help("Quiet"))
            .unwrap();

        let expected = "\
Usage: demo [--price <値段>] [-q]

Options:
      --price <値段>  Cost
  -q                  Quiet
";

        assert_eq!(usage(&registry, 80), expected);
    }

    #[test]
    fn long_descriptions_wrap() {
        let mut registry = Registry::new();
        registry
            .register(
                ArgumentSpec::flag()
                    .short('v')
                    .help("one two three four five six seven eight nine ten"),
            )
            .unwrap();

        let out = usage(&registry, 30);
        let lines: Vec<&str> = out.lines().skip(3).collect();

        assert!(lines.len() > 1, "{out}");
        assert!(lines.iter().all(|line| line.len() <= 30), "{out}");
        assert!(lines[0].starts_with("  -v  one"));
        assert!(lines[1..].iter().all(|line| line.starts_with("      ")));
    }

    #[test]
    fn help_starts_with_the_description() {
        let mut out = String::new();
        print_help(&mut out, "demo", Some("Does things."), &demo(), 80).unwrap();

        assert!(out.starts_with("Does things.\n\nUsage: demo "));
        assert!(out.ends_with(&usage(&demo(), 80)));
    }
}
