//! Built-in review documents
//!
//! The document registry is a fixed, ordered list of markdown review records
//! embedded in the binary at compile time. It is built once on first access
//! and never mutated afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

// ============================================================================
// Types
// ============================================================================

/// Severity of a review finding.
///
/// Ordered from most to least severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must fix immediately.
    Critical,
    /// Fix within weeks.
    High,
    /// Address over time.
    Medium,
    /// Minor.
    Low,
}

impl Severity {
    /// All severities in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// Lowercase identifier, used in CSS classes and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Uppercase badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Coloured-circle marker shown next to the severity.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single review document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key, also the URL path segment (e.g. "security").
    pub id: String,

    /// Display title.
    pub title: String,

    /// One-sentence summary shown on cards.
    pub description: String,

    /// Severity of the finding.
    pub severity: Severity,

    /// Score in `[0, 10]`; higher is better.
    pub score: f64,

    /// Free-form document type label (e.g. "Security Analysis").
    #[serde(rename = "type")]
    pub kind: String,

    /// Markdown body.
    pub content: String,
}

/// The ordered, immutable collection of review documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    documents: Vec<Document>,
}

// ============================================================================
// Built-in Documents
// ============================================================================

struct BuiltinDocument {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    severity: Severity,
    score: f64,
    kind: &'static str,
    content: &'static str,
}

const BUILTIN_DOCUMENTS: &[BuiltinDocument] = &[
    BuiltinDocument {
        id: "overview",
        title: "Project Architecture Analysis",
        description: "Comprehensive production readiness assessment of the NEOCARE healthcare mobile application.",
        severity: Severity::Critical,
        score: 4.8,
        kind: "Overview Document",
        content: include_str!("../../content/overview.md"),
    },
    BuiltinDocument {
        id: "security",
        title: "Security Vulnerabilities",
        description: "Critical security issues including exposed API keys, hardcoded credentials, and configuration vulnerabilities.",
        severity: Severity::Critical,
        score: 1.0,
        kind: "Security Analysis",
        content: include_str!("../../content/security.md"),
    },
    BuiltinDocument {
        id: "error-boundaries",
        title: "No Error Boundaries",
        description: "Complete lack of error handling causing app crashes. No error boundaries, crash reporting, or fallback UI.",
        severity: Severity::Critical,
        score: 0.0,
        kind: "Error Handling",
        content: include_str!("../../content/error-boundaries.md"),
    },
    BuiltinDocument {
        id: "hardcoding",
        title: "Extensive Hardcoding",
        description: "Magic numbers, hardcoded strings, and values scattered throughout the codebase without constants.",
        severity: Severity::Critical,
        score: 1.0,
        kind: "Code Quality",
        content: include_str!("../../content/hardcoding.md"),
    },
    BuiltinDocument {
        id: "material-design",
        title: "No Material Design System",
        description: "Absence of established design system. Custom components without Material Design foundation.",
        severity: Severity::Critical,
        score: 0.0,
        kind: "Design System",
        content: include_str!("../../content/material-design.md"),
    },
    BuiltinDocument {
        id: "styling",
        title: "Chaotic Styling Approach",
        description: "Inconsistent styling patterns mixing inline styles, StyleSheet, and component props chaotically.",
        severity: Severity::Critical,
        score: 3.0,
        kind: "Styling Architecture",
        content: include_str!("../../content/styling.md"),
    },
    BuiltinDocument {
        id: "git-conflicts",
        title: "Git Merge Conflicts",
        description: "Unresolved merge conflicts in production files indicating poor version control practices.",
        severity: Severity::Critical,
        score: 0.0,
        kind: "Version Control",
        content: include_str!("../../content/git-conflicts.md"),
    },
];

fn builtin_documents() -> Vec<Document> {
    BUILTIN_DOCUMENTS
        .iter()
        .map(|d| Document {
            id: d.id.to_string(),
            title: d.title.to_string(),
            description: d.description.to_string(),
            severity: d.severity,
            score: d.score,
            kind: d.kind.to_string(),
            content: d.content.to_string(),
        })
        .collect()
}

// Checked by `builtin_registry_satisfies_invariants`.
static BUILTIN_REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry {
    documents: builtin_documents(),
});

// ============================================================================
// Public API
// ============================================================================

impl Registry {
    /// Builds a registry, enforcing id format, id uniqueness and score range.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] for the first record that violates an
    /// invariant.
    pub fn new(documents: Vec<Document>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(documents.len());
        for doc in &documents {
            if !is_valid_id(&doc.id) {
                return Err(RegistryError::InvalidId(doc.id.clone()));
            }
            if !doc.score.is_finite() || !(0.0..=10.0).contains(&doc.score) {
                return Err(RegistryError::ScoreOutOfRange {
                    id: doc.id.clone(),
                    score: doc.score,
                });
            }
            if !seen.insert(doc.id.as_str()) {
                return Err(RegistryError::DuplicateId(doc.id.clone()));
            }
        }
        Ok(Self { documents })
    }

    /// The registry compiled into the binary.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_REGISTRY
    }

    /// All documents in registry order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterates documents in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by exact id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents with the given severity, in registry order.
    #[must_use]
    pub fn filter_by_severity(&self, severity: Severity) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Suggest a similar document id for typo correction.
    ///
    /// Returns the closest id if its Damerau-Levenshtein distance is ≤ 3.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Option<&str> {
        self.documents
            .iter()
            .map(|d| (d.id.as_str(), strsim::damerau_levenshtein(input, &d.id)))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(id, _)| id)
    }
}

/// Whether `id` is kebab-case: `[a-z0-9][a-z0-9-]*`.
///
/// Ids become URL path segments and export directory names, so nothing
/// outside this set is accepted.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    let mut bytes = id.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        && bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
