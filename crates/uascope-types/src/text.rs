// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Qualified names and localized text.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// QualifiedName
// =============================================================================

/// OPC UA qualified name: a name scoped by a namespace index.
///
/// Browse names are qualified so that two models can both define e.g. a
/// `Status` member without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index of the name.
    pub namespace_index: u16,

    /// The name string.
    pub name: String,
}

impl QualifiedName {
    /// Creates a new qualified name.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Creates a qualified name in the standard namespace (index 0).
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

impl From<&str> for QualifiedName {
    /// Parses the `<ns>:<name>` notation; a missing or non-numeric prefix
    /// yields a standard-namespace name.
    fn from(s: &str) -> Self {
        if let Some((ns, name)) = s.split_once(':') {
            if let Ok(namespace_index) = ns.parse::<u16>() {
                return Self::new(namespace_index, name);
            }
        }
        Self::standard(s)
    }
}

// =============================================================================
// LocalizedText
// =============================================================================

/// Human-readable text with an optional locale.
///
/// Display names, descriptions, and inverse names are localized. Both fields
/// are nullable on the wire; [`LocalizedText::null`] models the fully-absent
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale id such as `en-US`, if the server supplied one.
    pub locale: Option<String>,

    /// The text itself.
    pub text: Option<String>,
}

impl LocalizedText {
    /// Creates localized text without a locale.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: Some(text.into()),
        }
    }

    /// Creates localized text with a locale.
    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: Some(text.into()),
        }
    }

    /// The null localized text (no locale, no text).
    pub const fn null() -> Self {
        Self {
            locale: None,
            text: None,
        }
    }

    /// Returns `true` if neither locale nor text is present.
    pub fn is_null(&self) -> bool {
        self.locale.is_none() && self.text.is_none()
    }

    /// The text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_parsing() {
        let qn = QualifiedName::from("2:Temperature");
        assert_eq!(qn.namespace_index, 2);
        assert_eq!(qn.name, "Temperature");

        let qn = QualifiedName::from("Temperature");
        assert_eq!(qn.namespace_index, 0);

        // A non-numeric prefix is part of the name.
        let qn = QualifiedName::from("a:b");
        assert_eq!(qn, QualifiedName::standard("a:b"));
    }

    #[test]
    fn test_qualified_name_display() {
        assert_eq!(QualifiedName::standard("Objects").to_string(), "0:Objects");
    }

    #[test]
    fn test_localized_text_null() {
        assert!(LocalizedText::null().is_null());
        assert!(!LocalizedText::new("x").is_null());
        assert_eq!(LocalizedText::null().text(), "");
    }

    #[test]
    fn test_localized_text_display() {
        assert_eq!(LocalizedText::with_locale("en", "Pump").to_string(), "Pump");
    }
}
