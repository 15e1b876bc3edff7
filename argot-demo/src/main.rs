use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use argot::{Error, Parser, arguments::LoadedArguments, help::format_error};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_parser(program: &str) -> argot::Result<Parser> {
    let mut parser =
        Parser::new(program).description("Parses its arguments and prints what it found.");

    parser.add_option('o', "output", "Try me!")?;
    parser.add_flag('1', "123", "How u do dis!")?;
    parser.add_positional("test", "Any value at all")?;

    Ok(parser)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ARGOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let arguments = LoadedArguments::from_env();
    let program = arguments.argv0().to_string_lossy();
    let program = program
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("argot-demo");

    let parser = build_parser(program)?;
    debug!(arguments = arguments.args().count(), "loaded arguments");

    match parser.parse(arguments.args()) {
        Ok(result) => {
            let mut out = io::stdout().lock();

            for (name, value) in result.iter() {
                writeln!(out, "{name} = {value}")?;
            }

            Ok(ExitCode::SUCCESS)
        }
        Err(Error::HelpRequested) => {
            write!(io::stdout().lock(), "{}", parser.help())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let mut err = io::stderr().lock();

            writeln!(err, "{}\n", format_error(&error))?;
            write!(err, "{}", parser.usage())?;

            Ok(ExitCode::from(2))
        }
    }
}
