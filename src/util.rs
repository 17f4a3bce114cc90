use core::fmt;

/// Wraps a string such that it does not get quoted when printed with [`fmt::Debug`].
pub(crate) struct Unquote<'a>(pub(crate) &'a str);

impl fmt::Debug for Unquote<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
