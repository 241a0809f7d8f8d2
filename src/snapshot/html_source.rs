use std::path::Path;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::PomError;
use crate::snapshot::extractor::build_snapshot;
use crate::snapshot::snapshot_model::{
    Attributes, BoundingBox, ComputedStyle, PageSnapshot, RawElement, RawPage,
};
use crate::snapshot::source::SnapshotSource;
use crate::text::collapse_whitespace;

// ============================================================================
// Static HTML source: approximates layout without a rendering engine
// ============================================================================

/// Containers whose content is never rendered.
const NON_RENDERED: [&str; 5] = ["head", "script", "style", "template", "noscript"];

/// Elements that draw a box even without text or children.
const SELF_SIZED: [&str; 9] = [
    "input", "select", "textarea", "button", "img", "iframe", "video", "canvas", "svg",
];

/// Nominal box assigned to anything considered rendered.
const NOMINAL_BOX: BoundingBox = BoundingBox {
    width: 100.0,
    height: 20.0,
};

/// Snapshot source over a static HTML document.
pub struct HtmlSnapshotSource {
    html: String,
    url: String,
}

impl HtmlSnapshotSource {
    pub fn new(html: &str, url: &str) -> Self {
        Self {
            html: html.to_string(),
            url: url.to_string(),
        }
    }

    /// Read a local file. The page URL defaults to its `file://` URL.
    pub fn from_file(path: &Path, url: Option<&str>) -> Result<Self, PomError> {
        let html = std::fs::read_to_string(path).map_err(|e| {
            PomError::SnapshotUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let url = match url {
            Some(u) => u.to_string(),
            None => {
                let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                format!("file://{}", absolute.display())
            }
        };

        Ok(Self { html, url })
    }

    /// Download the page with a blocking HTTP GET.
    pub fn fetch(url: &str) -> Result<Self, PomError> {
        debug!(url, "fetching page");

        let response = reqwest::blocking::get(url)
            .map_err(|e| PomError::SnapshotUnavailable(format!("cannot fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PomError::SnapshotUnavailable(format!(
                "{} answered HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let html = response
            .text()
            .map_err(|e| PomError::SnapshotUnavailable(format!("cannot read {}: {}", url, e)))?;

        Ok(Self {
            html,
            url: url.to_string(),
        })
    }

    pub fn raw_page(&self) -> RawPage {
        parse_html(&self.html, &self.url)
    }
}

impl SnapshotSource for HtmlSnapshotSource {
    fn produce(&self) -> Result<PageSnapshot, PomError> {
        Ok(build_snapshot(&self.raw_page()))
    }

    fn describe(&self) -> String {
        format!("html {}", self.url)
    }
}

// ============================================================================
// HTML → RawPage
// ============================================================================

/// Parse a document into probe-shaped output, in document order.
pub fn parse_html(html: &str, url: &str) -> RawPage {
    let document = Html::parse_document(html);

    let mut title = String::new();
    let mut elements = Vec::new();

    for node in document.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };

        if title.is_empty() && el.value().name() == "title" {
            title = collapse_whitespace(&el.text().collect::<String>());
        }

        elements.push(raw_element(el));
    }

    RawPage {
        url: url.to_string(),
        title,
        elements,
    }
}

fn raw_element(el: ElementRef) -> RawElement {
    let tag = el.value().name().to_ascii_lowercase();

    let mut pairs: Vec<(&str, &str)> = el.value().attrs().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let attributes: Attributes = pairs.into_iter().collect();

    let subtree_hidden = el
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(hidden_by_markup);

    let style = ComputedStyle {
        display: computed_display(el),
        visibility: computed_visibility(el),
    };

    let rect = if subtree_hidden || hidden_by_markup(el) || has_zero_size(el) {
        BoundingBox::default()
    } else {
        NOMINAL_BOX
    };

    RawElement {
        xpath: Some(xpath_for(el)),
        text: el.text().collect(),
        has_click_handler: el.value().attr("onclick").is_some(),
        tag,
        attributes,
        style,
        rect,
    }
}

/// Parse `style="a: b; c: d"` into lowercase property/value pairs.
fn inline_style(el: ElementRef) -> Vec<(String, String)> {
    el.value()
        .attr("style")
        .map(|style| {
            style
                .split(';')
                .filter_map(|decl| {
                    let (prop, value) = decl.split_once(':')?;
                    let value = value.trim().trim_end_matches("!important").trim();
                    Some((prop.trim().to_ascii_lowercase(), value.to_ascii_lowercase()))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn style_value(el: ElementRef, property: &str) -> Option<String> {
    inline_style(el)
        .into_iter()
        .rev()
        .find(|(p, _)| p == property)
        .map(|(_, v)| v)
}

fn hidden_by_markup(el: ElementRef) -> bool {
    let tag = el.value().name();
    NON_RENDERED.contains(&tag)
        || el.value().attr("hidden").is_some()
        || style_value(el, "display").as_deref() == Some("none")
        || (tag == "input"
            && el
                .value()
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("hidden")))
}

fn computed_display(el: ElementRef) -> String {
    if hidden_by_markup(el) {
        return "none".to_string();
    }
    style_value(el, "display").unwrap_or_else(|| ComputedStyle::default().display)
}

/// `visibility` inherits: the nearest declaration on the element or an ancestor wins.
fn computed_visibility(el: ElementRef) -> String {
    let declared = std::iter::once(el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .find_map(|e| style_value(e, "visibility"));

    match declared.as_deref() {
        Some("hidden") | Some("collapse") => "hidden".to_string(),
        _ => "visible".to_string(),
    }
}

fn is_zero_length(value: &str) -> bool {
    let number = value.trim().trim_end_matches("px").trim();
    number.parse::<f64>().is_ok_and(|n| n <= 0.0)
}

fn has_zero_size(el: ElementRef) -> bool {
    let explicit_zero = ["width", "height"].iter().any(|dim| {
        el.value().attr(dim).is_some_and(is_zero_length)
            || style_value(el, dim).is_some_and(|v| is_zero_length(&v))
    });
    if explicit_zero {
        return true;
    }

    let tag = el.value().name();
    let has_text = el.text().any(|t| !t.trim().is_empty());
    let has_child_elements = el.children().any(|c| c.value().is_element());

    !SELF_SIZED.contains(&tag) && !has_text && !has_child_elements
}

/// `//*[@id="…"]` for elements with an id, otherwise an absolute positional path.
pub fn xpath_for(el: ElementRef) -> String {
    if let Some(id) = el.value().attr("id").filter(|id| !id.is_empty()) {
        return format!("//*[@id=\"{}\"]", id);
    }

    let mut segments = Vec::new();
    for current in std::iter::once(el).chain(el.ancestors().filter_map(ElementRef::wrap)) {
        let tag = current.value().name();
        let index = current
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| sibling.value().name() == tag)
            .count();

        if index == 0 {
            segments.push(format!("/{}", tag));
        } else {
            segments.push(format!("/{}[{}]", tag, index + 1));
        }
    }

    segments.reverse();
    let path = segments.concat();
    if path.is_empty() { "/".to_string() } else { path }
}
