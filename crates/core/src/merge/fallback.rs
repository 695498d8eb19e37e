//! Ordered candidate selection.
//!
//! Each display field lists its sources in precedence order; the first
//! present one wins. Empty strings count as absent.

/// First candidate that is `Some`.
pub fn first_some<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    candidates.into_iter().flatten().next()
}

/// First candidate that is a non-empty string.
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
