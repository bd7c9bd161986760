use std::fmt;

/// Dotted path to a field, e.g. `extended.producers`.
///
/// List indices never appear in a path: every element of a list shares the
/// path of the list itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns `self.name`, or `name` at the root.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// True at the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The dotted form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
