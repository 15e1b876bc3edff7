use std::thread;

use argot::{
    Alias, ArgumentSpec, BoundValue, Error, FieldKind, GroupKind, Parser, ParseResult,
    ValuePolicy, help::format_usage,
};

fn demo() -> Parser {
    let mut parser = Parser::new("demo");
    parser.add_option('o', "output", "Try me!").unwrap();
    parser.add_flag('1', "123", "How u do dis!").unwrap();
    parser.add_positional("test", "").unwrap();
    parser
}

fn string(value: &str) -> BoundValue {
    BoundValue::String(value.to_owned())
}

#[test]
fn separate_value() {
    let result = demo().parse(["-o", "value", "positional1"]).unwrap();

    assert_eq!(result.get("output"), Some(&string("value")));
    assert_eq!(result.get("123"), Some(&BoundValue::Boolean(false)));
    assert_eq!(result.get("test"), Some(&string("positional1")));
    assert!(result.get("help").is_none());
}

#[test]
fn inline_value() {
    let separate = demo().parse(["-o", "value", "positional1"]).unwrap();
    let inline = demo().parse(["--output=value", "positional1"]).unwrap();

    assert_eq!(separate, inline);
}

#[test]
fn digit_short_flag() {
    let result = demo().parse(["-1", "positional1"]).unwrap();

    assert_eq!(result.get("123"), Some(&BoundValue::Boolean(true)));
    assert_eq!(result.get_str("test"), Some("positional1"));
}

#[test]
fn missing_positional() {
    let error = demo().parse::<_, str>([]).unwrap_err();

    assert_eq!(
        error,
        Error::MissingRequired {
            name: "test".to_owned(),
            kind: FieldKind::Positional {
                placeholder: "test".to_owned()
            },
        }
    );
    assert_eq!(error.missing_argument(), Some("test"));
}

#[test]
fn unknown_option() {
    assert_eq!(
        demo().parse(["--bogus"]),
        Err(Error::UnknownOption(Alias::Long("bogus".to_owned())))
    );
}

#[test]
fn duplicate_names_fail_in_any_order() {
    let specs = || {
        [
            ArgumentSpec::option().short('o').long("output"),
            ArgumentSpec::flag().short('x').long("output"),
        ]
    };

    for order in [[0, 1], [1, 0]] {
        let mut specs = specs().map(Some);
        let mut parser = Parser::new("demo");

        let first = specs[order[0]].take().unwrap();
        let second = specs[order[1]].take().unwrap();

        parser.register(first).unwrap();
        assert_eq!(
            parser.register(second),
            Err(Error::DuplicateName {
                name: "output".to_owned()
            })
        );
    }
}

#[test]
fn registration_after_parse() {
    let mut parser = demo();
    parser.parse(["x"]).unwrap();

    assert_eq!(
        parser.register(ArgumentSpec::flag().short('v')),
        Err(Error::RegistryFrozen)
    );
}

#[test]
fn shared_parse_freezes_registration() {
    let mut parser = demo();

    let shared = &parser;
    shared.parse(["x"]).unwrap();

    assert!(parser.registry().is_frozen());
    assert_eq!(
        parser.add_flag('v', "verbose", ""),
        Err(Error::RegistryFrozen)
    );
    assert_eq!(parser.add_positional("extra", ""), Err(Error::RegistryFrozen));
}

#[test]
fn mutually_exclusive_flags() {
    let mut parser = Parser::new("convert");
    parser.add_flag('j', "json", "").unwrap();
    parser.add_flag('y', "yaml", "").unwrap();
    parser.add_option('i', "indent", "").unwrap();
    parser
        .add_group("format", GroupKind::Excluded, ["json", "yaml"])
        .unwrap();
    parser
        .add_group("layout", GroupKind::Required, ["yaml", "indent"])
        .unwrap();

    assert!(parser.parse(["-j"]).is_ok());
    assert!(parser.parse(["-y", "-i4"]).is_ok());

    let error = parser.parse(["--yaml", "--json"]).unwrap_err();
    assert_eq!(
        error,
        Error::ExcludedDependency {
            group: "format".to_owned(),
            argument: FieldKind::Flag(Alias::Long("yaml".to_owned())),
            peer: FieldKind::Flag(Alias::Long("json".to_owned())),
        }
    );
    assert_eq!(
        error.to_string(),
        "option --yaml can't be used with option --json"
    );

    assert!(matches!(
        parser.parse(["-j", "--indent=2"]),
        Err(Error::RequiredDependency { ref group, .. }) if group == "layout"
    ));
}

#[test]
fn usage_is_idempotent() {
    let parser = demo();
    parser.parse(["x"]).unwrap();

    let first = parser.usage();
    let second = parser.usage();
    assert_eq!(first, second);
    assert_eq!(format_usage("demo", parser.registry()), first);

    assert!(first.starts_with("Usage: demo [--output <OUTPUT>] [--123] <test>\n"));
    assert!(first.contains("-1, --123"));
}

#[test]
fn round_trip() {
    let parser = demo();

    let command_lines: [&[&str]; 5] = [
        &["-o", "value", "positional1"],
        &["-1", "-80"],
        &["--output=", "--", "--output"],
        &["x", "--output", "a=b"],
        &["-o-5", "-"],
    ];

    for args in command_lines {
        let result = parser.parse(args.iter().copied()).unwrap();
        let serialized = parser.to_args(&result);
        let reparsed = parser.parse(serialized.iter().map(String::as_str)).unwrap();

        assert_eq!(result, reparsed, "{args:?} became {serialized:?}");
    }
}

fn assert_round_trips(parser: &Parser, args: &[String]) -> ParseResult {
    let result = parser.parse(args.iter().map(String::as_str)).unwrap();
    let serialized = parser.to_args(&result);
    let reparsed = parser.parse(serialized.iter().map(String::as_str)).unwrap();

    assert_eq!(result, reparsed, "{args:?} became {serialized:?}");
    result
}

/// Every combination of awkward values, written in forms that strict parsing
/// accepts
#[test]
fn generated_round_trips() {
    let mut parser = demo();
    parser
        .register(ArgumentSpec::option().short('n').default_value("7"))
        .unwrap();
    parser
        .register(ArgumentSpec::positional("rest").default_value("d"))
        .unwrap();

    let values = ["", "v", "-5", "a=b", "--", "-o"];
    let positionals = ["x", "-", "--", "-80", "", "--output"];

    // An empty value can't be attached to a short alias, so it's separate
    let short = |alias: char, value: &str| match value {
        "" => vec![format!("-{alias}"), String::new()],
        value => vec![format!("-{alias}{value}")],
    };

    let outputs: Vec<Vec<String>> = values
        .into_iter()
        .flat_map(|value| [vec![format!("--output={value}")], short('o', value)])
        .chain([Vec::new()])
        .collect();

    let mut count = 0;

    for output in &outputs {
        for flag in [false, true] {
            for n in values.iter().copied().map(Some).chain([None]) {
                for test in positionals {
                    for rest in positionals.iter().copied().map(Some).chain([None]) {
                        let mut args = output.clone();
                        if flag {
                            args.push("-1".to_owned());
                        }
                        if let Some(n) = n {
                            args.extend(short('n', n));
                        }
                        args.push("--".to_owned());
                        args.push(test.to_owned());
                        args.extend(rest.map(str::to_owned));

                        let result = assert_round_trips(&parser, &args);
                        assert_eq!(result.get_str("test"), Some(test));
                        assert_eq!(result.get_str("n"), Some(n.unwrap_or("7")));
                        assert_eq!(result.get_str("rest"), Some(rest.unwrap_or("d")));
                        assert_eq!(result.get_flag("123"), flag);
                        count += 1;
                    }
                }
            }
        }
    }

    assert_eq!(count, 13 * 2 * 7 * 6 * 7);
}

#[test]
fn empty_short_values_round_trip() {
    let mut parser = Parser::new("demo");
    parser
        .register(ArgumentSpec::option().short('n').default_value("7"))
        .unwrap();
    parser.register(ArgumentSpec::flag().short('q')).unwrap();

    let command_lines: [&[&str]; 5] = [&["-n", ""], &["-q", "-n", ""], &["-n", "", "-q"], &["-q"], &[]];

    for args in command_lines {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        assert_round_trips(&parser, &args);
    }
}

#[test]
fn value_policies() {
    let strict = demo().parse(["--output", "-1", "x"]);
    assert_eq!(
        strict,
        Err(Error::MissingValue(Alias::Long("output".to_owned())))
    );

    let greedy = demo().value_policy(ValuePolicy::Greedy);
    let result = greedy.parse(["--output", "-1", "x"]).unwrap();

    assert_eq!(result.get_str("output"), Some("-1"));
    assert!(!result.get_flag("123"));
    assert_eq!(result.get_str("test"), Some("x"));
}

#[test]
fn help_requests() {
    let parser = demo().description("Demonstrates things.");

    assert_eq!(parser.parse(["--help"]), Err(Error::HelpRequested));
    assert_eq!(parser.parse(["x", "-h"]), Err(Error::HelpRequested));
    assert!(parser.help().starts_with("Demonstrates things.\n\n"));

    // After `--`, it's just a value
    let result = parser.parse(["--", "--help"]).unwrap();
    assert_eq!(result.get_str("test"), Some("--help"));
}

#[test]
fn typed_access() {
    let mut parser = Parser::new("demo");
    parser
        .register(ArgumentSpec::option().long("count").default_value("1"))
        .unwrap();

    let result = parser.parse(["--count", "12"]).unwrap();
    assert_eq!(result.parse::<u32>("count"), Ok(Some(12)));

    let result = parser.parse::<_, str>([]).unwrap();
    assert_eq!(result.parse::<u32>("count"), Ok(Some(1)));

    let result = parser.parse(["--count=lots"]).unwrap();
    let error = result.parse::<u32>("count").unwrap_err();
    assert!(matches!(error, Error::InvalidValue { ref value, .. } if value == "lots"));
}

#[test]
fn parsers_are_shared_between_threads() {
    let parser = demo();
    let parser = &parser;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let value = i.to_string();
                    let result = parser.parse(["--output", value.as_str(), "x"]).unwrap();

                    result.get_str("output").map(str::to_owned)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(i.to_string()));
        }
    });

    assert!(parser.registry().is_frozen());
}
