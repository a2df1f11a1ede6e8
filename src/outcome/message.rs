//! Message fragments supplied at the signaling site.

use std::fmt;

/// Ordered text fragments attached to an outcome.
///
/// Fragments are joined with a single space when rendered into a header
/// value or body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Vec<String>);

impl Message {
    /// An empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.0.push(fragment.into());
    }

    /// True when no fragment was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.0
    }

    /// Fragments joined with a single space.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for Message {
    fn from(fragment: &str) -> Self {
        Self(vec![fragment.to_string()])
    }
}

impl From<String> for Message {
    fn from(fragment: String) -> Self {
        Self(vec![fragment])
    }
}

impl From<&String> for Message {
    fn from(fragment: &String) -> Self {
        Self(vec![fragment.clone()])
    }
}

impl From<Vec<String>> for Message {
    fn from(fragments: Vec<String>) -> Self {
        Self(fragments)
    }
}

impl<const N: usize> From<[&str; N]> for Message {
    fn from(fragments: [&str; N]) -> Self {
        fragments.into_iter().collect()
    }
}

impl From<()> for Message {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl<S: Into<String>> FromIterator<S> for Message {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
