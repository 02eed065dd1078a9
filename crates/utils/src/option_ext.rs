use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Better option outputs
    ///
    /// Generic over anything that implements `Display`, this will either be the
    /// value contained within `Some()` or "none" for the `None` variant.
    ///
    /// Optional identifiers such as the deposit of a pure power monitor are
    /// the main use.
    ///
    /// ```rust
    /// # use fctools_utils::OptionExt;
    /// let deposit: Option<&str> = Some("U235");
    /// assert_eq!(deposit.display(), "U235");
    ///
    /// let deposit: Option<&str> = None;
    /// assert_eq!(deposit.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
