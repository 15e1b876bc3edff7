use core::{
    fmt::{self, Debug, Write},
    str,
};

/**
A single, raw argument passed in from the command line.

This type is used in two ways: to indicate long command line options, and to
indicate arguments themselves. For instance, given
`--output foo --path=bar input.txt`, `output`, `foo`, `path`, `bar`, and
`input.txt` would all be passed around as [`Arg`] values.

An [`Arg`] internally is just a byte slice, since that's what the OS gives us.
Callers can turn it into a [`str`] with [`as_str`][Arg::as_str], and from
there parse it however they need.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arg<'arg>(&'arg [u8]);

impl<'arg> Arg<'arg> {
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'arg [u8]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'arg [u8] {
        self.0
    }

    /// Get this argument as a string, if it's valid UTF-8
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&'arg str> {
        str::from_utf8(self.0).ok()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<[u8]> for Arg<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<str> for Arg<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Arg<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/**
Debug-print an arg. This implementation does its best to treat the arg as a
string, but includes non-utf-8 bytes in their hex representation as needed.
 */
impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
            f.write_char('[')?;

            let mut bytes = bytes.iter().copied();

            if let Some(b) = bytes.next() {
                write!(f, "{b:#x}")?;
                bytes.try_for_each(|b| write!(f, ",{b:#x}"))?;
            }

            f.write_char(']')
        }

        if self.0.is_empty() {
            return f.write_str("\"\"");
        }

        self.0.utf8_chunks().enumerate().try_for_each(|(i, chunk)| {
            if i > 0 {
                write!(f, "..")?
            }

            match (chunk.valid(), chunk.invalid()) {
                (s, b"") => write!(f, "{s:?}"),
                ("", b) => write_bytes(f, b),
                (s, b) => {
                    write!(f, "{s:?}..")?;
                    write_bytes(f, b)
                }
            }
        })
    }
}
