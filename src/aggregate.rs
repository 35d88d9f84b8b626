//! Landing-view aggregates
//!
//! Severity counts, mean score, score tiers and the production status
//! derived from them.

use std::fmt;

use serde::Serialize;

use crate::registry::{Document, Severity};

/// Placeholder shown when no score can be computed.
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Score Tier
// ============================================================================

/// Display bucket for a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// Score ≤ 3.
    Critical,
    /// 3 < score ≤ 6.
    Warning,
    /// Score > 6.
    Good,
}

impl ScoreTier {
    /// Upper bound (inclusive) of the critical tier.
    pub const CRITICAL_MAX: f64 = 3.0;

    /// Upper bound (inclusive) of the warning tier.
    pub const WARNING_MAX: f64 = 6.0;

    /// Buckets a score. Boundaries belong to the lower tier.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= Self::CRITICAL_MAX {
            Self::Critical
        } else if score <= Self::WARNING_MAX {
            Self::Warning
        } else {
            Self::Good
        }
    }

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Good => "good",
        }
    }

    /// CSS class for score badges (`score-critical` etc.).
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Critical => "score-critical",
            Self::Warning => "score-warning",
            Self::Good => "score-good",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Production Status
// ============================================================================

/// Release readiness derived from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductionStatus {
    /// Critical findings remain or the mean score is critical.
    NotReady,
    /// High findings remain or the mean score is in the warning tier.
    NeedsWork,
    /// Nothing blocks a release.
    Ready,
    /// No documents to judge.
    Unknown,
}

impl ProductionStatus {
    /// Headline label for the status card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotReady => "NOT READY",
            Self::NeedsWork => "NEEDS WORK",
            Self::Ready => "READY",
            Self::Unknown => NOT_AVAILABLE,
        }
    }

    /// One-line explanation under the headline.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NotReady => "Critical issues must be fixed",
            Self::NeedsWork => "High priority issues remain",
            Self::Ready => "No blocking issues",
            Self::Unknown => "No documents loaded",
        }
    }

    /// Sidebar banner text.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::NotReady => "❌ NOT PRODUCTION READY",
            Self::NeedsWork => "⚠️ NEEDS WORK BEFORE RELEASE",
            Self::Ready => "✅ PRODUCTION READY",
            Self::Unknown => "❔ NO DATA",
        }
    }

    /// CSS class suffix (`status-not-ready` etc.).
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::NotReady => "status-not-ready",
            Self::NeedsWork => "status-needs-work",
            Self::Ready => "status-ready",
            Self::Unknown => "status-unknown",
        }
    }
}

// ============================================================================
// Counts and Mean
// ============================================================================

/// Number of documents per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    /// Critical documents.
    pub critical: usize,
    /// High documents.
    pub high: usize,
    /// Medium documents.
    pub medium: usize,
    /// Low documents.
    pub low: usize,
}

impl SeverityCounts {
    /// Counts documents by severity.
    #[must_use]
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut counts = Self::default();
        for doc in docs {
            match doc.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Count for one severity.
    #[must_use]
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Sum over all severities.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Arithmetic mean of the documents' scores, `None` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_score<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Option<f64> {
    let (sum, n) = docs
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, n), d| (sum + d.score, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Formats an aggregate score as `"x.y/10"`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| NOT_AVAILABLE.to_string(), |s| format!("{s:.1}/10"))
}

/// Formats a single document score: integral scores drop the decimals.
#[must_use]
pub fn format_document_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}/10")
    } else {
        format!("{score:.1}/10")
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Everything the landing view derives from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of documents.
    pub total: usize,
    /// Documents per severity.
    pub counts: SeverityCounts,
    /// Mean score, `None` for an empty registry.
    pub mean_score: Option<f64>,
    /// Tier of the mean score.
    pub tier: Option<ScoreTier>,
    /// Derived release readiness.
    pub status: ProductionStatus,
}

impl Summary {
    /// Computes the summary in one pass over the documents.
    #[must_use]
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a Document> + Clone) -> Self {
        let counts = SeverityCounts::from_documents(docs.clone());
        let mean_score = mean_score(docs);
        let tier = mean_score.map(ScoreTier::from_score);
        let status = derive_status(&counts, tier);

        Self {
            total: counts.total(),
            counts,
            mean_score,
            tier,
            status,
        }
    }

    /// Formatted mean score (`"1.4/10"` or `"N/A"`).
    #[must_use]
    pub fn score_display(&self) -> String {
        format_score(self.mean_score)
    }

    /// CSS class for the mean score; empty registries use the critical style.
    #[must_use]
    pub fn score_class(&self) -> &'static str {
        self.tier.unwrap_or(ScoreTier::Critical).css_class()
    }
}

fn derive_status(counts: &SeverityCounts, tier: Option<ScoreTier>) -> ProductionStatus {
    let Some(tier) = tier else {
        return ProductionStatus::Unknown;
    };
    if counts.critical > 0 || tier == ScoreTier::Critical {
        ProductionStatus::NotReady
    } else if counts.high > 0 || tier == ScoreTier::Warning {
        ProductionStatus::NeedsWork
    } else {
        ProductionStatus::Ready
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::registry::tests::doc;

    fn six_records() -> Registry {
        Registry::new(vec![
            doc("a", Severity::Critical, 1.0),
            doc("b", Severity::Critical, 0.0),
            doc("c", Severity::Critical, 1.0),
            doc("d", Severity::Critical, 0.0),
            doc("e", Severity::Critical, 3.0),
            doc("f", Severity::High, 4.8),
        ])
        .unwrap()
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_lower_side() {
        assert_eq!(ScoreTier::from_score(3.0), ScoreTier::Critical);
        assert_eq!(ScoreTier::from_score(3.1), ScoreTier::Warning);
        assert_eq!(ScoreTier::from_score(6.0), ScoreTier::Warning);
        assert_eq!(ScoreTier::from_score(6.1), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Critical);
        assert_eq!(ScoreTier::from_score(10.0), ScoreTier::Good);
    }

    #[test]
    fn six_record_counts_and_mean() {
        let registry = six_records();
        let counts = SeverityCounts::from_documents(&registry);
        assert_eq!(
            counts,
            SeverityCounts {
                critical: 5,
                high: 1,
                medium: 0,
                low: 0
            }
        );
        assert_eq!(registry.filter_by_severity(Severity::Critical).len(), 5);
        for &severity in Severity::all() {
            assert_eq!(
                counts.get(severity),
                registry.filter_by_severity(severity).len()
            );
        }

        let mean = mean_score(&registry).unwrap();
        assert!((mean - 9.8 / 6.0).abs() < 1e-9);
        assert_eq!(format_score(Some(mean)), "1.6/10");
    }

    #[test]
    fn empty_mean_is_sentinel() {
        let registry = Registry::new(Vec::new()).unwrap();
        assert_eq!(mean_score(&registry), None);
        assert_eq!(format_score(None), "N/A");

        let summary = Summary::from_documents(&registry);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.tier, None);
        assert_eq!(summary.status, ProductionStatus::Unknown);
        assert_eq!(summary.score_display(), "N/A");
    }

    #[test]
    fn builtin_summary() {
        let summary = Summary::from_documents(Registry::builtin());
        assert_eq!(summary.total, 7);
        assert_eq!(summary.counts.critical, 7);
        let mean = summary.mean_score.unwrap();
        assert!((mean - 9.8 / 7.0).abs() < 1e-9);
        assert_eq!(summary.score_display(), "1.4/10");
        assert_eq!(summary.tier, Some(ScoreTier::Critical));
        assert_eq!(summary.status, ProductionStatus::NotReady);
    }

    #[test]
    fn status_derivation() {
        let high_only = Registry::new(vec![doc("a", Severity::High, 8.0)]).unwrap();
        assert_eq!(
            Summary::from_documents(&high_only).status,
            ProductionStatus::NeedsWork
        );

        let low_but_poor = Registry::new(vec![doc("a", Severity::Low, 5.0)]).unwrap();
        assert_eq!(
            Summary::from_documents(&low_but_poor).status,
            ProductionStatus::NeedsWork
        );

        let healthy = Registry::new(vec![
            doc("a", Severity::Low, 9.0),
            doc("b", Severity::Medium, 7.0),
        ])
        .unwrap();
        assert_eq!(
            Summary::from_documents(&healthy).status,
            ProductionStatus::Ready
        );
    }

    #[test]
    fn document_score_formatting() {
        assert_eq!(format_document_score(3.0), "3/10");
        assert_eq!(format_document_score(0.0), "0/10");
        assert_eq!(format_document_score(4.8), "4.8/10");
    }

    #[test]
    fn summary_serializes_null_mean_when_empty() {
        let registry = Registry::new(Vec::new()).unwrap();
        let json = serde_json::to_value(Summary::from_documents(&registry)).unwrap();
        assert!(json["mean_score"].is_null());
        assert_eq!(json["status"], "unknown");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tier_is_monotonic(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let rank = |t: ScoreTier| match t {
                    ScoreTier::Critical => 0,
                    ScoreTier::Warning => 1,
                    ScoreTier::Good => 2,
                };
                prop_assert!(rank(ScoreTier::from_score(lo)) <= rank(ScoreTier::from_score(hi)));
            }

            #[test]
            fn mean_is_finite_and_in_range(scores in proptest::collection::vec(0.0f64..=10.0, 1..40)) {
                let docs: Vec<Document> = scores
                    .iter()
                    .enumerate()
                    .map(|(i, s)| doc(&format!("d{i}"), Severity::Low, *s))
                    .collect();
                let mean = mean_score(&docs).unwrap();
                prop_assert!(mean.is_finite());
                prop_assert!((0.0..=10.0 + 1e-9).contains(&mean));
            }
        }
    }
}
