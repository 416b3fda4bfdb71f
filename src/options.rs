//! Extraction options configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// WordprocessingML main namespace URI.
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Conventional prefix bound to [`WORDPROCESSING_NS`] in `document.xml`.
pub const WORDPROCESSING_PREFIX: &str = "w";

/// Local name of the WordprocessingML text run element.
pub const TEXT_ELEMENT: &str = "t";

/// A namespace-qualified element name.
///
/// Elements are matched by namespace URI and local name; the prefix used in
/// the document does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace URI, or `None` for elements in no namespace
    pub namespace: Option<String>,
    /// Local part of the name
    pub local: String,
}

impl QualifiedName {
    /// Create a name in the given namespace.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// Create a name that only matches elements outside any namespace.
    pub fn unqualified(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// The WordprocessingML `w:t` text run element.
    pub fn wordprocessing_text() -> Self {
        Self::new(WORDPROCESSING_NS, TEXT_ELEMENT)
    }

    /// Check whether a resolved element name matches.
    ///
    /// `namespace` is the bound namespace URI of the element, if any.
    pub fn matches(&self, namespace: Option<&[u8]>, local: &[u8]) -> bool {
        if self.local.as_bytes() != local {
            return false;
        }
        match (&self.namespace, namespace) {
            (Some(expected), Some(actual)) => expected.as_bytes() == actual,
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for QualifiedName {
    fn default() -> Self {
        Self::wordprocessing_text()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

impl FromStr for QualifiedName {
    type Err = Error;

    /// Parse Clark notation (`{uri}local`), the `w:local` shorthand, or a
    /// bare local name in no namespace.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        let name = if let Some(rest) = s.strip_prefix('{') {
            let (ns, local) = rest.split_once('}').ok_or_else(|| {
                Error::InvalidOption(format!("unterminated namespace in '{}'", s))
            })?;
            if ns.is_empty() {
                Self::unqualified(local)
            } else {
                Self::new(ns, local)
            }
        } else if let Some((prefix, local)) = s.split_once(':') {
            if prefix != WORDPROCESSING_PREFIX {
                return Err(Error::InvalidOption(format!(
                    "unknown prefix '{}' (use {{namespace}}{} instead)",
                    prefix, local
                )));
            }
            Self::new(WORDPROCESSING_NS, local)
        } else {
            Self::unqualified(s)
        };

        if name.local.is_empty() {
            return Err(Error::InvalidOption(format!(
                "empty element name in '{}'",
                s
            )));
        }
        if name.local.contains([':', '{', '}']) || name.local.contains(char::is_whitespace) {
            return Err(Error::InvalidOption(format!(
                "invalid element name '{}'",
                name.local
            )));
        }

        Ok(name)
    }
}

/// Options for text extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Element whose text content is collected
    pub target: QualifiedName,

    /// Inserted between consecutive fragments (empty by default)
    pub separator: String,
}

impl ExtractOptions {
    /// Create new extraction options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element to collect.
    pub fn with_target(mut self, target: QualifiedName) -> Self {
        self.target = target;
        self
    }

    /// Set the separator placed between fragments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Check that the options describe a usable extraction.
    pub fn validate(&self) -> Result<()> {
        if self.target.local.is_empty() {
            return Err(Error::InvalidOption("empty element name".to_string()));
        }
        Ok(())
    }
}
