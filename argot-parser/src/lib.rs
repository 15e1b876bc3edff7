#![cfg_attr(not(test), no_std)]

/*!
Low-level implementation of argument handling. Takes care of distinctions
between long options, short options, and bare values, that sort of thing. No
type handling or matching against known arguments happens here, with one
exception: a short option whose name is a digit is only recognized if the
caller says it exists (see [`Aliases`]), so that negative numbers can still
be passed as values. Usually this is too low level to use directly.
*/

mod arg;

use core::iter::Peekable;

pub use arg::Arg;

/**
The small amount of knowledge the [`Tokenizer`] needs about the arguments
that have been registered. Consider `-1`: is this the short option `1`, or a
negative number? The tokenizer can't tell on its own, so it asks.
*/
pub trait Aliases {
    /// True if `short` is the name of a registered short option.
    fn is_short(&self, short: char) -> bool;
}

impl<T: Aliases + ?Sized> Aliases for &T {
    #[inline]
    fn is_short(&self, short: char) -> bool {
        T::is_short(self, short)
    }
}

/// No aliases at all. Every digit-led token like `-5` is a value.
impl Aliases for () {
    #[inline]
    fn is_short(&self, _short: char) -> bool {
        false
    }
}

/**
What to do when an option that needs a value is followed by something that
looks like another option, as in `--output -v`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// Refuse to use the next token as a value if it is shaped like an
    /// option (`--long`, `-s`) or is the `--` separator.
    #[default]
    Strict,

    /// Always use the next token as the value, whatever it looks like.
    Greedy,
}

/// A single classified argument produced by the [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'arg> {
    /// `--name` or `--name=value`
    Long {
        name: Arg<'arg>,
        value: Option<Arg<'arg>>,
    },

    /// `-s` or `-svalue`
    Short {
        name: char,
        value: Option<Arg<'arg>>,
    },

    /// Anything else, including a lone `-` and every argument after `--`
    Bare(Arg<'arg>),
}

/**
[`ArgAccess`] allows the consumer of a [`RawToken`] to decide if an option
needs a value, based on the identity of the option.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? The [`Tokenizer`] can't independently classify a given argument, so
instead the caller requests an argument via this trait only for options that
need them.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the tokenizer. This should only be called by options
    that need it; flags should simply ignore it, to ensure that the next
    command line argument can correctly be tokenized independently.

    This returns [`None`] if all of the CLI arguments have been exhausted, or
    if the [`ValuePolicy`] refused the next argument.
    */
    fn take(self) -> Option<Arg<'arg>>;
}

impl<'arg> ArgAccess<'arg> for Option<Arg<'arg>> {
    #[inline]
    fn take(self) -> Option<Arg<'arg>> {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    PositionalOnly,
}

/**
A `Tokenizer` is the main entry point into `argot_parser`. It's an iterator
of [`RawToken`]s, classified from a list of raw arguments. It handles the
`--name=value` and `-svalue` inline forms and the `--` separator.

The tokenizer operates entirely on borrowed data, because we assume that
command-line arguments can be loaded early on in `main` and then handled in a
borrowed form for the rest of the program. The ubiquitous `'arg` lifetime
refers to this borrowed command line data. It holds no state beyond its
position in the arguments; to tokenize again, create a new one.
*/
#[derive(Debug, Clone)]
pub struct Tokenizer<'arg, I, A>
where
    I: Iterator<Item = &'arg [u8]>,
{
    state: State,
    args: Peekable<I>,
    aliases: A,
}

impl<'arg, I, A> Tokenizer<'arg, I, A>
where
    I: Iterator<Item = &'arg [u8]>,
    A: Aliases,
{
    /**
    Create a new [`Tokenizer`] from an iterator of byte slices, where each
    byte slice is a single argument received from the command line. This list
    should *exclude* the name of the program, which is commonly passed as the
    first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>, aliases: A) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter().peekable(),
            aliases,
        }
    }

    /// True once a `--` has been seen; every later token is a bare value
    #[inline]
    #[must_use]
    pub fn positional_only(&self) -> bool {
        self.state == State::PositionalOnly
    }

    /**
    Take the next raw argument as the value of an option, without classifying
    it. With [`ValuePolicy::Strict`], an argument that would tokenize as an
    option (or the `--` separator) is left in place and [`None`] is returned.
    After `--`, every argument is a value.
    */
    pub fn take_value(&mut self, policy: ValuePolicy) -> Option<Arg<'arg>> {
        if self.state == State::PositionalOnly {
            return self.args.next().map(Arg::new);
        }

        let &next = self.args.peek()?;

        let refused = match policy {
            ValuePolicy::Greedy => false,
            ValuePolicy::Strict => {
                next == b"--" || !matches!(classify(next, &self.aliases), RawToken::Bare(_))
            }
        };

        match refused {
            true => None,
            false => self.args.next().map(Arg::new),
        }
    }

    /// Get an [`ArgAccess`] that takes the next value under `policy`
    #[inline]
    pub fn access(&mut self, policy: ValuePolicy) -> ValueAccess<'_, 'arg, I, A> {
        ValueAccess {
            tokenizer: self,
            policy,
        }
    }
}

impl<'arg, I, A> Iterator for Tokenizer<'arg, I, A>
where
    I: Iterator<Item = &'arg [u8]>,
    A: Aliases,
{
    type Item = RawToken<'arg>;

    fn next(&mut self) -> Option<RawToken<'arg>> {
        match self.state {
            State::PositionalOnly => self.args.next().map(|arg| RawToken::Bare(Arg::new(arg))),
            State::Ready => match self.args.next()? {
                b"--" => {
                    self.state = State::PositionalOnly;
                    self.next()
                }
                argument => Some(classify(argument, &self.aliases)),
            },
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.args.size_hint().1)
    }
}

/// [`ArgAccess`] implementation that gets the next argument from the
/// [`Tokenizer`], subject to a [`ValuePolicy`].
pub struct ValueAccess<'a, 'arg, I, A>
where
    I: Iterator<Item = &'arg [u8]>,
{
    tokenizer: &'a mut Tokenizer<'arg, I, A>,
    policy: ValuePolicy,
}

impl<'arg, I, A> ArgAccess<'arg> for ValueAccess<'_, 'arg, I, A>
where
    I: Iterator<Item = &'arg [u8]>,
    A: Aliases,
{
    #[inline]
    fn take(self) -> Option<Arg<'arg>> {
        self.tokenizer.take_value(self.policy)
    }
}

/// Classify a single argument. The `--` separator must be handled by the
/// caller; here it would come out as a long option with an empty name.
fn classify<'arg>(argument: &'arg [u8], aliases: &impl Aliases) -> RawToken<'arg> {
    match argument {
        [b'-', b'-', option @ ..] => match split_once(option, b'=') {
            Some((name, value)) => RawToken::Long {
                name: Arg::new(name),
                value: Some(Arg::new(value)),
            },
            None => RawToken::Long {
                name: Arg::new(option),
                value: None,
            },
        },
        [b'-', short @ ..] => match split_first_char(short) {
            Some((name, rest)) if !name.is_ascii_digit() || aliases.is_short(name) => {
                RawToken::Short {
                    name,
                    value: match rest {
                        [] => None,
                        rest => Some(Arg::new(rest)),
                    },
                }
            }
            _ => RawToken::Bare(Arg::new(argument)),
        },
        _ => RawToken::Bare(Arg::new(argument)),
    }
}

fn split_once(input: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    memchr::memchr(delimiter, input).map(|i| (&input[..i], &input[i + 1..]))
}

/// Split off the leading character, if `input` starts with valid UTF-8
fn split_first_char(input: &[u8]) -> Option<(char, &[u8])> {
    let chunk = input.utf8_chunks().next()?;
    let c = chunk.valid().chars().next()?;

    Some((c, &input[c.len_utf8()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shorts(&'static str);

    impl Aliases for Shorts {
        fn is_short(&self, short: char) -> bool {
            self.0.contains(short)
        }
    }

    fn tokenize<'a>(
        args: &'a [&'a str],
        shorts: &'static str,
    ) -> Tokenizer<'a, impl Iterator<Item = &'a [u8]>, Shorts> {
        Tokenizer::new(args.iter().map(|arg| arg.as_bytes()), Shorts(shorts))
    }

    fn long<'a>(name: &'a str, value: Option<&'a str>) -> RawToken<'a> {
        RawToken::Long {
            name: Arg::new(name.as_bytes()),
            value: value.map(|value| Arg::new(value.as_bytes())),
        }
    }

    fn short(name: char, value: Option<&str>) -> RawToken<'_> {
        RawToken::Short {
            name,
            value: value.map(|value| Arg::new(value.as_bytes())),
        }
    }

    fn bare(text: &str) -> RawToken<'_> {
        RawToken::Bare(Arg::new(text.as_bytes()))
    }

    #[test]
    fn long_options() {
        let tokens: Vec<_> = tokenize(&["--output", "--output=a=b", "--path="], "").collect();

        assert_eq!(
            tokens,
            [
                long("output", None),
                long("output", Some("a=b")),
                long("path", Some("")),
            ]
        );
    }

    #[test]
    fn short_options_with_inline_values() {
        let tokens: Vec<_> = tokenize(&["-o", "-ovalue", "-o=x"], "").collect();

        assert_eq!(
            tokens,
            [short('o', None), short('o', Some("value")), short('o', Some("=x"))]
        );
    }

    #[test]
    fn lone_dash_is_bare() {
        let tokens: Vec<_> = tokenize(&["-", "input.txt"], "").collect();

        assert_eq!(tokens, [bare("-"), bare("input.txt")]);
    }

    #[test]
    fn digits_are_values_unless_registered() {
        let tokens: Vec<_> = tokenize(&["-80", "-1", "-1x"], "1").collect();

        assert_eq!(tokens, [bare("-80"), short('1', None), short('1', Some("x"))]);
    }

    #[test]
    fn non_ascii_short_option() {
        let tokens: Vec<_> = tokenize(&["-ünf"], "").collect();

        assert_eq!(tokens, [short('ü', Some("nf"))]);
    }

    #[test]
    fn invalid_utf8_short_is_bare() {
        let args: [&[u8]; 1] = [b"-\xff"];
        let tokens: Vec<_> = Tokenizer::new(args.iter().copied(), ()).collect();

        assert_eq!(tokens, [RawToken::Bare(Arg::new(b"-\xff"))]);
    }

    #[test]
    fn separator_switches_to_positional_only() {
        let mut tokens = tokenize(&["-v", "--", "--output", "-o", "--"], "");

        assert_eq!(tokens.next(), Some(short('v', None)));
        assert!(!tokens.positional_only());
        assert_eq!(tokens.next(), Some(bare("--output")));
        assert!(tokens.positional_only());
        assert_eq!(tokens.next(), Some(bare("-o")));
        assert_eq!(tokens.next(), Some(bare("--")));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn strict_values_refuse_options() {
        let mut tokens = tokenize(&["-o", "-v", "--", "-5", "value"], "");

        assert_eq!(tokens.next(), Some(short('o', None)));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), None);
        assert_eq!(tokens.next(), Some(short('v', None)));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), None);
        assert_eq!(tokens.next(), Some(bare("-5")));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), Some(Arg::new(b"value")));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), None);
    }

    #[test]
    fn strict_values_accept_negative_numbers() {
        let mut tokens = tokenize(&["-5", "-1"], "1");

        assert_eq!(tokens.take_value(ValuePolicy::Strict), Some(Arg::new(b"-5")));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), None);
    }

    #[test]
    fn greedy_values_take_anything() {
        let mut tokens = tokenize(&["--verbose", "--", "-x"], "");

        assert_eq!(
            tokens.access(ValuePolicy::Greedy).take(),
            Some(Arg::new(b"--verbose"))
        );
        assert_eq!(tokens.take_value(ValuePolicy::Greedy), Some(Arg::new(b"--")));
        assert!(!tokens.positional_only());
        assert_eq!(tokens.next(), Some(short('x', None)));
    }

    #[test]
    fn values_after_separator_are_always_accepted() {
        let mut tokens = tokenize(&["--", "--output"], "");

        assert_eq!(tokens.next(), Some(bare("--output")));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), None);

        let mut tokens = tokenize(&["--", "a", "--b"], "");
        assert_eq!(tokens.next(), Some(bare("a")));
        assert_eq!(tokens.take_value(ValuePolicy::Strict), Some(Arg::new(b"--b")));
    }

    #[test]
    fn restarting_yields_the_same_tokens() {
        let args = ["-o", "x", "--flag", "pos"];

        let first: Vec<_> = tokenize(&args, "").collect();
        let second: Vec<_> = tokenize(&args, "").collect();

        assert_eq!(first, second);
    }
}
