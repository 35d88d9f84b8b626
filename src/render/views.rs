//! HTML views: page layout, sidebar, dashboard and document viewer.
//!
//! Every view is a pure function of a [`PageContext`] and the current
//! [`View`]. All dynamic text goes through [`escape_html`].

use std::fmt::Write as _;

use crate::aggregate::{ScoreTier, Summary, format_document_score};
use crate::config::{PriorityGroup, SiteConfig, SummaryCard};
use crate::registry::{Document, Registry, Severity};
use crate::render::escape::escape_html;
use crate::render::highlight::Highlighter;
use crate::render::markdown::render_markdown;
use crate::selector::View;

/// Path the stylesheet is served from.
pub const STYLESHEET_PATH: &str = "/assets/style.css";

/// Embedded stylesheet.
pub const STYLESHEET: &str = include_str!("../../assets/style.css");

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TITLE__</title>
  <link rel="stylesheet" href="__STYLESHEET__">
</head>
<body>
<div class="app">
__SIDEBAR__
<main class="main-content">
__MAIN__
</main>
</div>
</body>
</html>
"#;

/// Everything a view needs besides the current selection.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Documents to show.
    pub registry: &'a Registry,
    /// Editorial content.
    pub site: &'a SiteConfig,
    /// Code block highlighter.
    pub highlighter: &'a Highlighter,
}

impl PageContext<'_> {
    fn summary(&self) -> Summary {
        Summary::from_documents(self.registry)
    }
}

/// Renders a complete HTML page for `view`.
#[must_use]
pub fn render_page(ctx: &PageContext<'_>, view: &View<'_>) -> String {
    let selected = view.document();
    let title = match selected {
        Some(doc) => format!("{} · {}", doc.title, ctx.site.project.name),
        None => ctx.site.project.title.clone(),
    };
    let main = match view {
        View::Dashboard => render_dashboard(ctx),
        View::Document { document, body } => render_viewer(ctx, Some(*document), body),
    };

    PAGE_TEMPLATE
        .replace("__TITLE__", &escape_html(&title))
        .replace("__STYLESHEET__", STYLESHEET_PATH)
        .replace("__SIDEBAR__", &render_sidebar(ctx, selected))
        .replace("__MAIN__", &main)
}

// ============================================================================
// Sidebar
// ============================================================================

/// Renders the navigation sidebar, highlighting `selected`.
#[must_use]
pub fn render_sidebar(ctx: &PageContext<'_>, selected: Option<&Document>) -> String {
    let summary = ctx.summary();
    let project = &ctx.site.project;
    let mut out = String::with_capacity(4096);

    out.push_str("<aside class=\"sidebar\">\n<div class=\"sidebar-header\">\n");
    let _ = writeln!(out, "<h2>🏥 {}</h2>", escape_html(&project.name));
    out.push_str("<p>Code Review Dashboard</p>\n<div class=\"overall-score\">\n");
    out.push_str("<span class=\"score-label\">Overall Score</span>\n");
    let _ = writeln!(
        out,
        "<span class=\"score-value {}\">{}</span>",
        summary.score_class(),
        summary.score_display()
    );
    let _ = writeln!(
        out,
        "<span class=\"production-status {}\">{}</span>",
        summary.status.css_class(),
        summary.status.banner()
    );
    out.push_str("</div>\n</div>\n");

    out.push_str("<nav class=\"sidebar-nav\">\n");
    let _ = writeln!(
        out,
        "<a class=\"nav-item{}\" href=\"/\"><span class=\"nav-icon\">📊</span><span class=\"nav-title\">Dashboard Overview</span></a>",
        active(selected.is_none())
    );

    out.push_str("<div class=\"nav-section\">\n<h3>📋 Analysis Documents</h3>\n");
    for doc in ctx.registry {
        let is_active = selected.is_some_and(|s| s.id == doc.id);
        let _ = writeln!(
            out,
            "<a class=\"nav-item{}\" href=\"{}\"><span class=\"nav-icon\">{}</span><div class=\"nav-content\"><span class=\"nav-title\">{}</span><div class=\"nav-meta\">{}{}</div></div></a>",
            active(is_active),
            document_href(doc),
            doc.severity.icon(),
            escape_html(&doc.title),
            severity_badge(doc.severity),
            score_badge(doc.score),
        );
    }
    out.push_str("</div>\n</nav>\n");

    out.push_str("<div class=\"sidebar-footer\">\n<div class=\"legend\">\n<h4>Severity Levels</h4>\n");
    out.push_str("<div class=\"legend-item\"><span>🔴</span> Critical - Must fix immediately</div>\n");
    out.push_str("<div class=\"legend-item\"><span>🟠</span> High - Fix within weeks</div>\n");
    out.push_str("<div class=\"legend-item\"><span>🟡</span> Medium/Low - Address over time</div>\n");
    out.push_str("</div>\n<div class=\"review-info\"><small>");
    let _ = write!(
        out,
        "<strong>Review Date:</strong> {}<br><strong>Version:</strong> {}",
        escape_html(&project.review_date_display()),
        escape_html(&project.version)
    );
    out.push_str("</small></div>\n</div>\n</aside>");
    out
}

// ============================================================================
// Dashboard
// ============================================================================

/// Renders the landing view.
#[must_use]
pub fn render_dashboard(ctx: &PageContext<'_>) -> String {
    let summary = ctx.summary();
    let project = &ctx.site.project;
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<div class=\"dashboard\">\n<div class=\"dashboard-header\">\n<div class=\"header-content\">\n");
    let _ = writeln!(out, "<h1>🏥 {}</h1>", escape_html(&project.title));
    let _ = writeln!(out, "<p class=\"subtitle\">{}</p>", escape_html(&project.subtitle));
    let _ = writeln!(
        out,
        "<div class=\"project-info\"><span><strong>Version:</strong> {}</span><span><strong>Review Date:</strong> {}</span><span><strong>Technology:</strong> {}</span></div>",
        escape_html(&project.version),
        escape_html(&project.review_date_display()),
        escape_html(&project.technology)
    );
    out.push_str("</div>\n</div>\n");

    // Stats grid
    out.push_str("<div class=\"stats-grid\">\n");
    stat_card(
        &mut out,
        "overall-score",
        "📊",
        "Overall Score",
        &format!(
            "<div class=\"stat-value {}\">{}</div>",
            summary.score_class(),
            summary.score_display()
        ),
        "Production Readiness",
    );
    stat_card(
        &mut out,
        "production-status",
        "⚠️",
        "Production Status",
        &format!(
            "<div class=\"stat-value {}\">{}</div>",
            summary.status.css_class(),
            summary.status.label()
        ),
        summary.status.description(),
    );
    stat_card(
        &mut out,
        "critical-issues",
        Severity::Critical.icon(),
        "Critical Issues",
        &format!("<div class=\"stat-value\">{}</div>", summary.counts.critical),
        "Must fix immediately",
    );
    stat_card(
        &mut out,
        "high-issues",
        Severity::High.icon(),
        "High Priority",
        &format!("<div class=\"stat-value\">{}</div>", summary.counts.high),
        "Fix within weeks",
    );
    out.push_str("</div>\n");

    out.push_str("<div class=\"dashboard-content\">\n");

    // Critical issues
    let critical = ctx.registry.filter_by_severity(Severity::Critical);
    if !critical.is_empty() {
        out.push_str("<section class=\"critical-section\">\n<h2>🚨 Critical Issues Requiring Immediate Attention</h2>\n");
        out.push_str("<p class=\"section-description\">These issues prevent the application from being production-ready and must be addressed immediately.</p>\n");
        out.push_str("<div class=\"issues-grid\">\n");
        for doc in critical {
            let _ = writeln!(
                out,
                "<a class=\"issue-card critical\" href=\"{}\"><div class=\"issue-header\"><span class=\"issue-icon\">{}</span><div class=\"issue-meta\">{}{}</div></div><h3>{}</h3><p>{}</p><div class=\"issue-footer\"><span class=\"click-hint\">Click to view details →</span></div></a>",
                document_href(doc),
                doc.severity.icon(),
                severity_badge(doc.severity),
                score_badge(doc.score),
                escape_html(&doc.title),
                escape_html(&doc.description),
            );
        }
        out.push_str("</div>\n</section>\n");
    }

    if !ctx.site.summary.is_empty() {
        out.push_str("<section class=\"summary-section\">\n<h2>📋 Analysis Summary</h2>\n<div class=\"summary-grid\">\n");
        for card in &ctx.site.summary {
            summary_card(&mut out, card);
        }
        out.push_str("</div>\n</section>\n");
    }

    if !ctx.site.priorities.is_empty() {
        out.push_str("<section class=\"priority-section\">\n<h2>🎯 Priority Actions</h2>\n<div class=\"priority-grid\">\n");
        for group in &ctx.site.priorities {
            priority_group(&mut out, group);
        }
        out.push_str("</div>\n</section>\n");
    }

    // All documents
    out.push_str("<section class=\"documents-section\">\n<h2>📚 All Analysis Documents</h2>\n");
    if ctx.registry.is_empty() {
        out.push_str("<p class=\"empty-note\">No analysis documents available.</p>\n");
    } else {
        out.push_str("<div class=\"documents-grid\">\n");
        for doc in ctx.registry {
            let _ = writeln!(
                out,
                "<a class=\"document-card severity-{}\" href=\"{}\"><div class=\"document-header\"><span class=\"document-icon\">{}</span>{}</div><h3>{}</h3><p>{}</p><div class=\"document-footer\">{}<span class=\"document-type\">{}</span></div></a>",
                doc.severity.as_str(),
                document_href(doc),
                doc.severity.icon(),
                severity_badge(doc.severity),
                escape_html(&doc.title),
                escape_html(&doc.description),
                score_badge(doc.score),
                escape_html(&doc.kind),
            );
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n</div>\n</div>");
    out
}

fn stat_card(out: &mut String, class: &str, icon: &str, title: &str, value_html: &str, description: &str) {
    let _ = writeln!(
        out,
        "<div class=\"stat-card {class}\"><div class=\"stat-icon\">{icon}</div><div class=\"stat-content\"><h3>{title}</h3>{value_html}<p class=\"stat-description\">{}</p></div></div>",
        escape_html(description)
    );
}

fn summary_card(out: &mut String, card: &SummaryCard) {
    let _ = writeln!(
        out,
        "<div class=\"summary-card\">\n<h3>{}</h3>\n<ul>",
        escape_html(&card.title)
    );
    for item in &card.items {
        let _ = writeln!(
            out,
            "<li>{} {}</li>",
            item.severity.icon(),
            escape_html(&item.text)
        );
    }
    out.push_str("</ul>\n");
    if let Some(ref action) = card.action {
        let _ = writeln!(
            out,
            "<div class=\"action-required\"><strong>Action:</strong> {}</div>",
            escape_html(action)
        );
    }
    out.push_str("</div>\n");
}

fn priority_group(out: &mut String, group: &PriorityGroup) {
    let _ = writeln!(
        out,
        "<div class=\"priority-item {}\">\n<div class=\"priority-marker\">{}</div>\n<div class=\"priority-content\">\n<h3>{}</h3>\n<ul>",
        group.level.as_str(),
        escape_html(&group.marker),
        escape_html(&group.title)
    );
    for item in &group.items {
        let _ = writeln!(out, "<li>{}</li>", escape_html(item));
    }
    let _ = writeln!(
        out,
        "</ul>\n<span class=\"priority-status\">{}</span>\n</div>\n</div>",
        escape_html(&group.status)
    );
}

// ============================================================================
// Viewer
// ============================================================================

/// Renders the document viewer; without a document, the empty state.
#[must_use]
pub fn render_viewer(ctx: &PageContext<'_>, document: Option<&Document>, body: &str) -> String {
    let Some(doc) = document else {
        return concat!(
            "<div class=\"markdown-viewer empty\"><div class=\"empty-state\">",
            "<h2>📄 No Document Selected</h2>",
            "<p>Select a document from the sidebar to view its content.</p>",
            "</div></div>"
        )
        .to_string();
    };

    let mut out = String::with_capacity(body.len() * 2 + 1024);
    out.push_str("<div class=\"markdown-viewer\">\n<div class=\"document-header\">\n<div class=\"document-info\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&doc.title));
    let _ = writeln!(
        out,
        "<div class=\"document-meta\">{}<span class=\"score-badge {}\">Score: {}</span><span class=\"document-type\">{}</span></div>",
        severity_badge(doc.severity),
        ScoreTier::from_score(doc.score).css_class(),
        format_document_score(doc.score),
        escape_html(&doc.kind)
    );
    out.push_str("</div>\n</div>\n<article class=\"markdown-content\">\n");
    out.push_str(&render_markdown(body, ctx.highlighter));
    out.push_str("</article>\n</div>");
    out
}

// ============================================================================
// Fragments
// ============================================================================

/// Root-relative link to a document.
#[must_use]
pub fn document_href(doc: &Document) -> String {
    format!("/{}", escape_html(&doc.id))
}

fn severity_badge(severity: Severity) -> String {
    format!(
        "<span class=\"severity-badge severity-{}\">{}</span>",
        severity.as_str(),
        severity.label()
    )
}

fn score_badge(score: f64) -> String {
    format!(
        "<span class=\"score-badge {}\">{}</span>",
        ScoreTier::from_score(score).css_class(),
        format_document_score(score)
    )
}

const fn active(is_active: bool) -> &'static str {
    if is_active { " active" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THEME;
    use crate::registry::tests::doc;
    use crate::selector::Navigator;

    struct Fixture {
        site: SiteConfig,
        highlighter: Highlighter,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                site: SiteConfig::default(),
                highlighter: Highlighter::new(DEFAULT_THEME).unwrap(),
            }
        }

        fn ctx<'a>(&'a self, registry: &'a Registry) -> PageContext<'a> {
            PageContext {
                registry,
                site: &self.site,
                highlighter: &self.highlighter,
            }
        }
    }

    #[test]
    fn dashboard_shows_live_aggregate() {
        let fx = Fixture::new();
        let html = render_dashboard(&fx.ctx(Registry::builtin()));
        assert!(html.contains("<div class=\"stat-value score-critical\">1.4/10</div>"));
        assert!(html.contains("NOT READY"));
        assert!(html.contains("<div class=\"stat-value\">7</div>"));
        assert!(html.contains("Critical Issues Requiring Immediate Attention"));
        assert_eq!(html.matches("class=\"issue-card critical\"").count(), 7);
        assert_eq!(html.matches("class=\"document-card ").count(), 7);
        assert!(html.contains("October 6, 2025"));
    }

    #[test]
    fn empty_registry_dashboard_uses_sentinel() {
        let fx = Fixture::new();
        let registry = Registry::new(Vec::new()).unwrap();
        let html = render_page(&fx.ctx(&registry), &View::Dashboard);
        assert!(html.contains("N/A"));
        assert!(!html.contains("NaN"));
        assert!(html.contains("No analysis documents available."));
        assert!(!html.contains("critical-section"));
    }

    #[test]
    fn sidebar_marks_active_document() {
        let fx = Fixture::new();
        let registry = Registry::builtin();
        let security = registry.find("security");
        let html = render_sidebar(&fx.ctx(registry), security);
        assert!(html.contains("<a class=\"nav-item active\" href=\"/security\">"));
        assert!(html.contains("<a class=\"nav-item\" href=\"/\">"));
        assert_eq!(html.matches("nav-item active").count(), 1);
    }

    #[test]
    fn sidebar_marks_dashboard_when_nothing_selected() {
        let fx = Fixture::new();
        let html = render_sidebar(&fx.ctx(Registry::builtin()), None);
        assert!(html.contains("<a class=\"nav-item active\" href=\"/\">"));
        assert!(html.contains("❌ NOT PRODUCTION READY"));
        assert!(html.contains("1.4/10"));
    }

    #[test]
    fn viewer_renders_document() {
        let fx = Fixture::new();
        let registry = Registry::builtin();
        let mut nav = Navigator::new(registry);
        nav.navigate("/styling");
        let html = render_page(&fx.ctx(registry), &nav.view());
        assert!(html.contains("<title>Chaotic Styling Approach · NEOCARE</title>"));
        assert!(html.contains("<h1>Chaotic Styling Approach</h1>"));
        assert!(html.contains("Score: 3/10"));
        assert!(html.contains("Styling Architecture"));
        assert!(html.contains("class=\"markdown-content\""));
    }

    #[test]
    fn viewer_without_document_shows_empty_state() {
        let fx = Fixture::new();
        let html = render_viewer(&fx.ctx(Registry::builtin()), None, "");
        assert!(html.contains("No Document Selected"));
    }

    #[test]
    fn user_text_is_escaped() {
        let fx = Fixture::new();
        let mut evil = doc("x", Severity::High, 6.5);
        evil.title = "<img src=x>".to_string();
        let registry = Registry::new(vec![evil]).unwrap();
        let html = render_page(&fx.ctx(&registry), &View::Dashboard);
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(html.contains("score-badge score-good\">6.5/10"));
        assert!(html.contains("NEEDS WORK"));
    }

    #[test]
    fn page_links_stylesheet() {
        let fx = Fixture::new();
        let html = render_page(&fx.ctx(Registry::builtin()), &View::Dashboard);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(STYLESHEET_PATH));
        assert!(!STYLESHEET.is_empty());
    }
}
