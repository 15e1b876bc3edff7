/*!
Implementations of the [`parameter`][crate::parameter] traits for various
primitive and standard library types
 */

use crate::parameter::{Error, ParsedValue, Value};

macro_rules! from_str {
    ($($type:ident $($(::$path:ident)+)?,)*) => {
        $(
            impl ParsedValue for $type $($(:: $path)+)? {}
        )*
    };
}

from_str! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    char,

    std::string::String,
    std::path::PathBuf,
    std::ffi::OsString,

    core::net::Ipv4Addr,
    core::net::Ipv6Addr,
    core::net::IpAddr,
    core::net::SocketAddrV4,
    core::net::SocketAddrV6,
    core::net::SocketAddr,
}

const TRUE_WORDS: &[&str] = &["true", "yes", "y", "1"];
const FALSE_WORDS: &[&str] = &["false", "no", "n", "0"];

/// Booleans accept the usual spellings, ignoring case and surrounding
/// whitespace.
impl Value for bool {
    fn from_arg<E: Error>(arg: &str) -> Result<Self, E> {
        let word = arg.trim();
        let is = |words: &[&str]| words.iter().any(|w| w.eq_ignore_ascii_case(word));

        if is(TRUE_WORDS) {
            Ok(true)
        } else if is(FALSE_WORDS) {
            Ok(false)
        } else {
            Err(E::should_be(arg, &["true", "yes", "y", "1", "false", "no", "n", "0"]))
        }
    }
}
