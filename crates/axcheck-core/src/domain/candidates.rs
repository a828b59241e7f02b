//! Ordered-candidate resolution.
//!
//! Several fields are resolved from a short list of optional sources where
//! the first usable value wins. Empty strings count as absent because the
//! platform uses both `null` and `""` for "not recorded".

/// Return the first candidate that is present and non-empty.
pub fn first_present<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: Into<String>,
{
    candidates
        .into_iter()
        .flatten()
        .map(Into::into)
        .find(|value| !value.is_empty())
}

/// Like [`first_present`], with an explicit final default.
pub fn first_present_or<I, S>(candidates: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: Into<String>,
{
    first_present(candidates).unwrap_or_else(|| default.to_string())
}
