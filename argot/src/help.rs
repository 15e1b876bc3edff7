/*!
Usage messages and error diagnostics. Nothing in here prints or exits; the
formatted text is handed back to the caller to do with as it pleases.

Most of the time you want [`Parser::usage`][crate::Parser::usage],
[`Parser::help`][crate::Parser::help] and [`format_error`], which fill in the
program name and settings from the parser.
 */

use core::fmt;

use crate::{errors::Error, printers, registry::Registry};

/// The width that help text is wrapped to, unless configured otherwise
pub const DEFAULT_WIDTH: usize = 80;

/**
A usage or help message, rendered through its [`Display`][fmt::Display]
implementation.

The usage message is a synopsis line, followed by an `Arguments` section and
an `Options` section with each argument's help text. The help message is the
same thing with the program's description in front. The output depends only
on the inputs, so formatting it again gives identical text.
*/
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    program: &'a str,
    description: Option<&'a str>,
    registry: &'a Registry,
    width: usize,
}

impl<'a> Usage<'a> {
    #[must_use]
    pub fn new(program: &'a str, registry: &'a Registry) -> Self {
        Self {
            program,
            description: None,
            registry,
            width: DEFAULT_WIDTH,
        }
    }

    /// Include a description, making this a full help message
    #[must_use]
    pub fn description(self, description: Option<&'a str>) -> Self {
        Self {
            description,
            ..self
        }
    }

    #[must_use]
    pub fn width(self, width: usize) -> Self {
        Self { width, ..self }
    }
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        printers::print_help(
            f,
            self.program,
            self.description,
            self.registry,
            self.width,
        )
    }
}

/// The [`Usage`] message for `registry`, rendered to a [`String`] at the
/// default width
#[must_use]
pub fn format_usage(program: &str, registry: &Registry) -> String {
    Usage::new(program, registry).to_string()
}

/// A single-line diagnostic for `error`, like `error: unrecognized option
/// --bogus`
#[must_use]
pub fn format_error(error: &Error) -> String {
    format!("error: {error}")
}
