use tracing::debug;

use crate::snapshot::snapshot_model::{
    Attributes, ElementDescriptor, PageSnapshot, Purpose, RawElement, RawPage,
};
use crate::text::collapse_whitespace;

// ============================================================================
// Element pools
// ============================================================================

pub const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "select", "textarea"];

pub const INTERACTIVE_ROLES: [&str; 4] = ["button", "link", "checkbox", "menuitem"];

pub const DATA_TAGS: [&str; 13] = [
    "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th", "dd", "dt", "li",
];

/// Attributes captured besides every `data-*` attribute.
pub const ALLOWED_ATTRIBUTES: [&str; 14] = [
    "id",
    "class",
    "name",
    "type",
    "value",
    "href",
    "src",
    "alt",
    "title",
    "aria-label",
    "data-testid",
    "role",
    "placeholder",
    "for",
];

fn tag_of(el: &RawElement) -> String {
    el.tag.to_ascii_lowercase()
}

pub fn in_interactive_pool(el: &RawElement) -> bool {
    let tag = tag_of(el);
    INTERACTIVE_TAGS.contains(&tag.as_str())
        || el
            .attributes
            .get("role")
            .is_some_and(|role| INTERACTIVE_ROLES.contains(&role))
}

pub fn in_data_pool(el: &RawElement) -> bool {
    DATA_TAGS.contains(&tag_of(el).as_str())
}

/// Visible iff displayed, not hidden, and rendered with a non-empty box.
pub fn is_visible(el: &RawElement) -> bool {
    !el.style.display.eq_ignore_ascii_case("none")
        && !el.style.visibility.eq_ignore_ascii_case("hidden")
        && el.rect.width > 0.0
        && el.rect.height > 0.0
}

/// Interactive by tag, by accessibility role, or by an attached click handler.
pub fn is_interactive(el: &RawElement) -> bool {
    in_interactive_pool(el) || el.has_click_handler
}

/// Keep the allow-listed attributes plus every `data-*` attribute, in source order.
pub fn filter_attributes(attrs: &Attributes) -> Attributes {
    attrs
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .filter(|(name, _)| name.starts_with("data-") || ALLOWED_ATTRIBUTES.contains(&name.as_str()))
        .collect()
}

/// Build the descriptor for an element that already passed the pool filters.
pub fn describe(el: &RawElement, purpose: Purpose) -> ElementDescriptor {
    let attributes = filter_attributes(&el.attributes);
    let non_empty = |name: &str| attributes.get_non_empty(name).map(str::to_string);

    ElementDescriptor {
        tag_name: tag_of(el),
        id: non_empty("id"),
        name: non_empty("name"),
        element_type: non_empty("type"),
        classes: attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        text_content: el.text.trim().to_string(),
        is_interactive: is_interactive(el),
        is_visible: true,
        purpose,
        xpath: el.xpath.clone(),
        attributes,
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Interactive pool first, then data pool; document order within each.
///
/// An element matching both pools (e.g. `<span role="button">`) is reported
/// once per pool.
pub fn extract_elements(raw: &[RawElement]) -> Vec<ElementDescriptor> {
    let interactive = raw
        .iter()
        .filter(|el| in_interactive_pool(el) && is_visible(el))
        .map(|el| describe(el, Purpose::Interaction));

    let data = raw
        .iter()
        .filter(|el| in_data_pool(el) && is_visible(el) && !el.text.trim().is_empty())
        .map(|el| describe(el, Purpose::Data));

    let elements: Vec<ElementDescriptor> = interactive.chain(data).collect();

    debug!(
        scanned = raw.len(),
        retained = elements.len(),
        "extracted element descriptors"
    );

    elements
}

/// The title is normalised like `document.title`: whitespace runs collapse.
pub fn build_snapshot(page: &RawPage) -> PageSnapshot {
    PageSnapshot {
        url: page.url.clone(),
        title: collapse_whitespace(&page.title),
        elements: extract_elements(&page.elements),
    }
}
