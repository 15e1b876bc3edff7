/*!
A small, strict command-line argument parser. Register the flags and
positional arguments your program accepts on a [`Parser`], hand it the
command line, and get back a [`ParseResult`] or a typed [`Error`].

```
use argot::{BoundValue, Error, Parser};

let mut parser = Parser::new("demo");
parser.add_option('o', "output", "Try me!").unwrap();
parser.add_flag('1', "123", "How u do dis!").unwrap();
parser.add_positional("test", "").unwrap();

let result = parser.parse(["-1", "positional1"]).unwrap();
assert_eq!(result.get("123"), Some(&BoundValue::Boolean(true)));
assert_eq!(result.get("output"), Some(&BoundValue::Absent));
assert_eq!(result.get_str("test"), Some("positional1"));

let error = parser.parse(["--bogus"]).unwrap_err();
assert_eq!(argot::help::format_error(&error), "error: unrecognized option --bogus");
```

Option syntax:

- `--name` and `--name=value` are long options.
- `-c` and `-cvalue` are short options; there's no bundling, so anything
  after the option character is its value.
- `-5` and other dash-digit tokens are plain values, unless a short option
  with that digit is registered.
- `--` ends option parsing; everything after it is positional.

Parsing never prints anything or exits the process; that's up to the caller,
with the help of [`Parser::usage`] and [`help::format_error`].
*/

pub mod arguments;
mod build;
pub mod errors;
pub mod help;
mod impls;
pub mod parameter;
mod parser;
mod printers;
pub mod registry;
mod result;
pub mod spec;
mod state;

pub use argot_parser::ValuePolicy;

pub use crate::{
    errors::{Error, FieldKind, Result},
    parser::{Parser, Settings},
    registry::{Group, GroupKind, Registry},
    result::{BoundValue, ParseResult},
    spec::{Alias, ArgumentSpec, Arity, Kind, Requirement},
};
