//! Site configuration schema
//!
//! Editorial content around the documents: project header, summary cards,
//! priority actions and the highlight theme. Every field defaults to the
//! built-in NEOCARE review so an empty file is a valid configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::registry::Severity;

/// Default syntect theme for fenced code blocks.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Root of a site configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Project header shown in the sidebar and dashboard.
    pub project: ProjectInfo,

    /// Syntax highlighting theme name.
    pub theme: String,

    /// "Analysis Summary" cards.
    pub summary: Vec<SummaryCard>,

    /// "Priority Actions" groups.
    pub priorities: Vec<PriorityGroup>,
}

/// Project under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectInfo {
    /// Short name (sidebar header).
    pub name: String,

    /// Dashboard headline.
    pub title: String,

    /// Dashboard subtitle.
    pub subtitle: String,

    /// Reviewed version.
    pub version: String,

    /// Date of the review.
    pub review_date: NaiveDate,

    /// Technology stack label.
    pub technology: String,
}

impl ProjectInfo {
    /// Review date as "October 6, 2025".
    #[must_use]
    pub fn review_date_display(&self) -> String {
        self.review_date.format("%B %-d, %Y").to_string()
    }
}

/// One "Analysis Summary" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryCard {
    /// Card heading, may include an emoji.
    pub title: String,

    /// Bullet findings.
    #[serde(default)]
    pub items: Vec<SummaryItem>,

    /// Required action line.
    #[serde(default)]
    pub action: Option<String>,
}

/// One bullet of a summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryItem {
    /// Severity marker shown before the text.
    pub severity: Severity,

    /// Finding text.
    pub text: String,
}

/// Urgency of a priority group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    /// Do not deploy until done.
    Urgent,
    /// Within weeks.
    High,
    /// Within the quarter.
    Medium,
    /// Future improvements.
    Low,
}

impl PriorityLevel {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One "Priority Actions" group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityGroup {
    /// Urgency, drives styling.
    pub level: PriorityLevel,

    /// Emoji marker.
    #[serde(default)]
    pub marker: String,

    /// Group heading.
    pub title: String,

    /// Actions.
    #[serde(default)]
    pub items: Vec<String>,

    /// Footer status line.
    #[serde(default)]
    pub status: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project: ProjectInfo::default(),
            theme: DEFAULT_THEME.to_string(),
            summary: default_summary(),
            priorities: default_priorities(),
        }
    }
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "NEOCARE".to_string(),
            title: "NEOCARE Code Review Dashboard".to_string(),
            subtitle: "Production Readiness Analysis - Healthcare Mobile Application".to_string(),
            version: "1.2.0".to_string(),
            review_date: NaiveDate::from_ymd_opt(2025, 10, 6).unwrap_or_default(),
            technology: "React Native + Expo".to_string(),
        }
    }
}

fn card(title: &str, items: &[(Severity, &str)], action: &str) -> SummaryCard {
    SummaryCard {
        title: title.to_string(),
        items: items
            .iter()
            .map(|(severity, text)| SummaryItem {
                severity: *severity,
                text: (*text).to_string(),
            })
            .collect(),
        action: Some(action.to_string()),
    }
}

fn default_summary() -> Vec<SummaryCard> {
    use Severity::{Critical, High};

    vec![
        card(
            "🔒 Security Issues",
            &[
                (Critical, "API keys exposed in repository"),
                (Critical, "Firebase configuration exposed"),
                (Critical, "No environment variable management"),
                (Critical, "Hardcoded credentials and URLs"),
            ],
            "Rotate all keys, implement env vars immediately",
        ),
        card(
            "💥 Error Handling",
            &[
                (Critical, "No error boundaries - app crashes completely"),
                (Critical, "No crash reporting (Sentry/Crashlytics)"),
                (Critical, "Poor API error handling"),
                (Critical, "No fallback UI for failures"),
            ],
            "Implement error boundaries and crash reporting",
        ),
        card(
            "🎨 Design System",
            &[
                (Critical, "No Material Design system"),
                (Critical, "Chaotic styling approach (5+ patterns)"),
                (Critical, "Extensive hardcoded values"),
                (Critical, "No design tokens or constants"),
            ],
            "Implement React Native Paper, create constants",
        ),
        card(
            "⚙️ Code Quality",
            &[
                (Critical, "Magic numbers everywhere (8, 12, 480, etc.)"),
                (Critical, "No enums for string literals"),
                (Critical, "Git merge conflicts in production files"),
                (High, "Outdated dependencies"),
            ],
            "Create constants, enums, fix git practices",
        ),
    ]
}

fn group(
    level: PriorityLevel,
    marker: &str,
    title: &str,
    items: &[&str],
    status: &str,
) -> PriorityGroup {
    PriorityGroup {
        level,
        marker: marker.to_string(),
        title: title.to_string(),
        items: items.iter().map(|s| (*s).to_string()).collect(),
        status: status.to_string(),
    }
}

fn default_priorities() -> Vec<PriorityGroup> {
    vec![
        group(
            PriorityLevel::Urgent,
            "🚨",
            "IMMEDIATE - Critical",
            &[
                "Rotate all exposed API keys",
                "Implement environment variables",
                "Add error boundaries",
                "Fix git merge conflicts",
            ],
            "Critical - Do not deploy until fixed",
        ),
        group(
            PriorityLevel::High,
            "🔧",
            "HIGH PRIORITY",
            &[
                "Install React Native Paper",
                "Create constants and enums",
                "Add crash reporting (Sentry)",
                "Update dependencies",
            ],
            "High Priority",
        ),
        group(
            PriorityLevel::Medium,
            "🏗️",
            "MEDIUM PRIORITY",
            &[
                "Refactor to Material Design",
                "Optimize performance",
                "Add comprehensive documentation",
                "Implement caching strategy",
            ],
            "Medium Priority",
        ),
        group(
            PriorityLevel::Low,
            "🚀",
            "FUTURE IMPROVEMENTS",
            &[
                "Add comprehensive testing",
                "Implement CI/CD pipeline",
                "Security audit",
                "Performance optimization",
            ],
            "Future Improvements",
        ),
    ]
}
