use std::ffi::{OsStr, OsString};

/// Helper type for loading arguments from the environment.
///
/// This provides a convenient owned container for the args retrieved from
/// [`std::env`], which a [`Parser`][crate::Parser] can then borrow from
/// through [`args`][LoadedArguments::args].
#[derive(Debug, Clone, Default)]
pub struct LoadedArguments {
    arguments: Vec<OsString>,
}

impl LoadedArguments {
    #[must_use]
    pub fn from_env() -> Self {
        std::env::args_os().collect()
    }

    /// The program name, as given by the OS. Empty if there wasn't one.
    #[must_use]
    pub fn argv0(&self) -> &OsStr {
        self.arguments
            .first()
            .map(OsString::as_os_str)
            .unwrap_or_default()
    }

    /// The arguments after the program name
    pub fn args(&self) -> impl Iterator<Item = &[u8]> + Clone {
        self.arguments
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(|arg| arg.as_encoded_bytes())
    }
}

impl<T: Into<OsString>> FromIterator<T> for LoadedArguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
