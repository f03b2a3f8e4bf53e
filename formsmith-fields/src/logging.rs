//! Log formatting for field data.

use std::fmt;

use serde::Serialize;

/// Renders a value as an indented YAML block for multi-line log messages.
///
/// ```ignore
/// use formsmith_fields::Pretty;
/// use tracing::debug;
///
/// debug!("imported fields: {}", Pretty(&fields));
/// ```
///
/// Every line is indented two spaces below the log line it follows. Values
/// that YAML cannot represent fall back to their `Debug` form.
pub struct Pretty<T>(pub T);

impl<T: Serialize + fmt::Debug> Pretty<T> {
    fn block(&self) -> String {
        serde_yaml_ng::to_string(&self.0).unwrap_or_else(|_| format!("{:#?}", self.0))
    }
}

impl<T: Serialize + fmt::Debug> fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.block().lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

impl<T: Serialize + fmt::Debug> fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
