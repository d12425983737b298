use std::fmt;
use std::str::FromStr;

use crate::models::RepositorySummary;

/// Shown in place of a missing repository description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Ordering offered by the sort controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortCriterion {
    /// Most stars first
    #[default]
    Stars,
    /// Most recently updated first
    Recency,
}

impl SortCriterion {
    /// Identifier carried by the matching sort control
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Stars => "stars",
            SortCriterion::Recency => "recency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortCriterion::Stars => "Most Stars",
            SortCriterion::Recency => "Recently Updated",
        }
    }

    pub fn all() -> [SortCriterion; 2] {
        [SortCriterion::Stars, SortCriterion::Recency]
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stars" => Ok(SortCriterion::Stars),
            "recency" | "updated" => Ok(SortCriterion::Recency),
            other => Err(format!("unknown sort criterion: {}", other)),
        }
    }
}

/// Copy of `repos` in the requested order.
///
/// Both orders are descending and stable, so entries with equal keys keep
/// their relative order.
pub fn sorted_by(repos: &[RepositorySummary], criterion: SortCriterion) -> Vec<RepositorySummary> {
    let mut sorted = repos.to_vec();
    match criterion {
        SortCriterion::Stars => sorted.sort_by(|a, b| b.star_count.cmp(&a.star_count)),
        SortCriterion::Recency => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    sorted
}

/// Entries whose name, language or description contains `query`,
/// ignoring case. An empty query keeps everything.
pub fn filtered_by(repos: &[RepositorySummary], query: &str) -> Vec<RepositorySummary> {
    let query = query.to_lowercase();

    repos
        .iter()
        .filter(|repo| matches_query(repo, &query))
        .cloned()
        .collect()
}

fn matches_query(repo: &RepositorySummary, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&repo.name)
        || repo.language.as_deref().is_some_and(contains)
        || repo.description.as_deref().is_some_and(contains)
}

/// The page surface the projects section writes to
pub trait ProjectsDisplay {
    /// Replace everything inside the grid
    fn replace_contents(&mut self, html: String);
    fn set_loading_visible(&mut self, visible: bool);
    fn set_error_visible(&mut self, visible: bool);
    /// Mark which sort control is active
    fn set_active_sort(&mut self, _criterion: SortCriterion) {}
}

/// Render one card per repository and hand the markup to `display`.
///
/// An empty slice clears the grid.
pub fn render<D: ProjectsDisplay + ?Sized>(display: &mut D, repos: &[RepositorySummary]) {
    display.replace_contents(render_cards(repos));
}

pub fn render_cards(repos: &[RepositorySummary]) -> String {
    repos.iter().map(render_card).collect()
}

pub fn render_card(repo: &RepositorySummary) -> String {
    // Blank text counts as missing
    let description = repo
        .description
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    let badge = repo
        .language
        .as_deref()
        .filter(|lang| !lang.is_empty())
        .map(|lang| format!("<span class=\"project-badge\">{}</span>", escape_html(lang)))
        .unwrap_or_default();

    format!(
        "<div class=\"project-card\">\
<h3>{name}</h3>\
<p>{description}</p>\
{badge}\
<div class=\"project-meta\">\
<span>⭐ {stars}</span>\
<span>🍴 {forks}</span>\
<span>Updated: {updated}</span>\
</div>\
<a href=\"{url}\" target=\"_blank\" rel=\"noopener\" class=\"cta-btn\">View on GitHub</a>\
</div>\n",
        name = escape_html(&repo.name),
        description = escape_html(description),
        badge = badge,
        stars = repo.star_count,
        forks = repo.fork_count,
        updated = format_date(repo),
        url = escape_html(&repo.html_url),
    )
}

/// `M/D/YYYY`, the en-US short date
pub fn format_date(repo: &RepositorySummary) -> String {
    repo.updated_at.format("%-m/%-d/%Y").to_string()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// In-memory stand-in for the projects grid of the page.
///
/// Records what was written to it and can emit the whole section as an
/// HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlRegion {
    pub contents: String,
    pub loading_visible: bool,
    pub error_visible: bool,
    pub active_sort: SortCriterion,
    pub search_query: String,
}

impl Default for HtmlRegion {
    fn default() -> Self {
        Self {
            contents: String::new(),
            // The page ships with the spinner showing
            loading_visible: true,
            error_visible: false,
            active_sort: SortCriterion::default(),
            search_query: String::new(),
        }
    }
}

impl HtmlRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards currently in the grid
    pub fn card_count(&self) -> usize {
        self.contents.matches("class=\"project-card\"").count()
    }

    /// The full projects section: controls, indicators and grid
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        out.push_str("<section id=\"projects\" class=\"section\">\n");
        out.push_str("<div class=\"project-controls\">\n");
        for criterion in SortCriterion::all() {
            let class = if criterion == self.active_sort {
                "sort-btn active"
            } else {
                "sort-btn"
            };
            out.push_str(&format!(
                "<button class=\"{}\" data-sort=\"{}\">{}</button>\n",
                class,
                criterion.as_str(),
                criterion.label()
            ));
        }
        out.push_str(&format!(
            "<input type=\"search\" class=\"search-input\" placeholder=\"Search projects\" value=\"{}\">\n",
            escape_html(&self.search_query)
        ));
        out.push_str("</div>\n");

        out.push_str(&format!(
            "<div class=\"loading{}\">Loading projects...</div>\n",
            hidden_class(self.loading_visible)
        ));
        out.push_str(&format!(
            "<div class=\"error{}\">Could not load projects. Please try again later.</div>\n",
            hidden_class(self.error_visible)
        ));
        out.push_str("<div id=\"projects-grid\" class=\"projects-grid\">\n");
        out.push_str(&self.contents);
        out.push_str("</div>\n</section>\n");

        out
    }
}

fn hidden_class(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " hidden"
    }
}

impl ProjectsDisplay for HtmlRegion {
    fn replace_contents(&mut self, html: String) {
        self.contents = html;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn set_error_visible(&mut self, visible: bool) {
        self.error_visible = visible;
    }

    fn set_active_sort(&mut self, criterion: SortCriterion) {
        self.active_sort = criterion;
    }
}
