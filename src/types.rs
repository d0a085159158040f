//! Core symbol types shared by the index, the resolver and the tool surfaces.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a search entry navigates to.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Type,
    Member,
    Namespace,
    Page,
}

impl SymbolKind {
    /// Infer the kind of an entry from its owning scope and target URL.
    ///
    /// - anchored URL: `Member` inside a scope, otherwise a `Page` section
    /// - unanchored `namespace*` page: `Namespace`
    /// - unanchored page with a scope: `Type`
    /// - anything else: `Page`
    pub fn infer(scope_label: &str, target_url: &str) -> Self {
        let (page, fragment) = match target_url.split_once('#') {
            Some((page, fragment)) => (page, Some(fragment)),
            None => (target_url, None),
        };

        if fragment.is_some() {
            return if scope_label.is_empty() {
                Self::Page
            } else {
                Self::Member
            };
        }

        let file_name = page.rsplit('/').next().unwrap_or(page);
        if file_name.starts_with("namespace") {
            Self::Namespace
        } else if scope_label.is_empty() {
            Self::Page
        } else {
            Self::Type
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Member => "member",
            Self::Namespace => "namespace",
            Self::Page => "page",
        }
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "type" => Ok(Self::Type),
            "member" => Ok(Self::Member),
            "namespace" => Ok(Self::Namespace),
            "page" => Ok(Self::Page),
            other => Err(format!(
                "unknown symbol kind '{}' (expected type, member, namespace or page)",
                other
            )),
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single navigable search result.
///
/// Entries sharing a display name are kept apart by `scope_label` and `target_url`;
/// identity is the triple of display name, scope and URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEntry {
    pub display_name: String,
    pub normalized_key: String,
    pub scope_label: String,
    pub target_url: String,
    pub kind: SymbolKind,
}

impl SymbolEntry {
    /// The URL without its `#fragment`, i.e. the documentation page.
    pub fn page(&self) -> &str {
        self.target_url
            .split_once('#')
            .map_or(self.target_url.as_str(), |(page, _)| page)
    }

    /// The anchor inside the page, if the entry points at one.
    pub fn anchor(&self) -> Option<&str> {
        self.target_url.split_once('#').map(|(_, anchor)| anchor)
    }
}

impl fmt::Display for SymbolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope_label.is_empty() || self.scope_label == self.display_name {
            write!(f, "{} ({})", self.display_name, self.kind)
        } else {
            write!(f, "{} [{}] ({})", self.display_name, self.scope_label, self.kind)
        }
    }
}
