//! Stage name list passed to the dashboard template.

use std::fmt;

use crate::{Error, Result};

/// Ordered stage names, safe to embed in a double-quoted array literal.
///
/// `Display` yields the literal itself, e.g. `["dev", "staging"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageList(Vec<String>);

impl StageList {
    /// Validates and collects stage names.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if a name contains `"` or `\`.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();

        if let Some(name) = names.iter().find(|name| name.contains(['"', '\\'])) {
            return Err(Error::invalid_input()
                .with_message(format!("stage name {name:?} cannot be embedded in a list literal")));
        }

        Ok(Self(names))
    }

    /// Returns the stage names in order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when there are no stages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, name) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{name}\"")?;
        }
        f.write_str("]")
    }
}
