// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Browse and display name value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace-qualified name, used as the browse name of an entity and as
/// a step in a browse path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index the name is defined in.
    pub namespace_index: u16,
    /// The name itself.
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

    /// Creates a qualified name in the standard namespace (0).
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

impl From<(u16, &str)> for QualifiedName {
    fn from((ns, name): (u16, &str)) -> Self {
        Self::new(ns, name)
    }
}

/// Human-readable text tagged with a locale.
///
/// Used for display names and descriptions. The locale/text pair is always
/// replaced atomically; there is no partial-locale update anywhere in the
/// stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale tag, e.g. `en-US`. May be empty.
    pub locale: String,
    /// The text. May be empty.
    pub text: String,
}

impl LocalizedText {
    /// Creates localized text from a locale tag and a text.
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Creates localized text with an empty locale tag.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new("", text)
    }

    /// Returns `true` if both locale and text are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locale.is_empty() && self.text.is_empty()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.locale.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "[{}] {}", self.locale, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_display() {
        assert_eq!(QualifiedName::standard("Objects").to_string(), "Objects");
        assert_eq!(QualifiedName::new(2, "Motor").to_string(), "2:Motor");
    }

    #[test]
    fn localized_text_replaced_as_pair() {
        let a = LocalizedText::new("en-US", "Temperature");
        let b = LocalizedText::new("de-DE", "Temperatur");
        assert_ne!(a, b);
        assert!(LocalizedText::default().is_empty());
        assert!(!LocalizedText::plain("x").is_empty());
    }
}
