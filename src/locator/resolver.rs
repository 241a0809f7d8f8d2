use tracing::trace;

use crate::locator::locator_model::{LocatorCandidates, RecommendedLocator, TestIdCandidate};
use crate::snapshot::snapshot_model::ElementDescriptor;
use crate::text::{char_len, truncate_text};

/// Test-automation attributes, in preference order.
pub const TEST_ID_ATTRIBUTES: [&str; 3] = ["data-testid", "data-test", "data-automation"];

/// Anchor text must be shorter than this to be used as a link-text locator.
pub const LINK_TEXT_LIMIT: usize = 50;

/// Attributes never appended to the CSS fallback.
const CSS_EXCLUDED: [&str; 4] = ["id", "class", "type", "name"];

// ============================================================================
// Candidate collection
// ============================================================================

pub fn collect_candidates(el: &ElementDescriptor) -> LocatorCandidates {
    let test_id = TEST_ID_ATTRIBUTES.iter().find_map(|attr| {
        el.attribute(attr).map(|value| TestIdCandidate {
            attribute: attr.to_string(),
            value: value.to_string(),
        })
    });

    let link_text = (el.tag_name == "a" && !el.text_content.is_empty())
        .then(|| el.text_content.clone());

    LocatorCandidates {
        id: el.id.clone().filter(|v| !v.is_empty()),
        test_id,
        name: el.name.clone().filter(|v| !v.is_empty()),
        link_text,
        class_names: el.classes.clone(),
        css_selector: build_css_selector(el),
        xpath: el.xpath.clone(),
    }
}

// ============================================================================
// Recommendation: first match wins
// ============================================================================

/// id → test id → name → short anchor text → CSS selector.
pub fn recommend(candidates: &LocatorCandidates, el: &ElementDescriptor) -> RecommendedLocator {
    if let Some(id) = &candidates.id {
        return RecommendedLocator::Id { value: id.clone() };
    }

    if let Some(test_id) = &candidates.test_id {
        return RecommendedLocator::TestId {
            attribute: test_id.attribute.clone(),
            value: test_id.value.clone(),
        };
    }

    if let Some(name) = &candidates.name {
        return RecommendedLocator::Name {
            value: name.clone(),
        };
    }

    if el.tag_name == "a" {
        if let Some(text) = &candidates.link_text {
            if char_len(text) < LINK_TEXT_LIMIT {
                return RecommendedLocator::LinkText {
                    value: truncate_text(text, LINK_TEXT_LIMIT),
                };
            }
        }
    }

    RecommendedLocator::CssSelector {
        value: candidates.css_selector.clone(),
    }
}

pub fn resolve_locator(el: &ElementDescriptor) -> RecommendedLocator {
    let candidates = collect_candidates(el);
    let locator = recommend(&candidates, el);
    trace!(tag = %el.tag_name, locator = %locator, "resolved locator");
    locator
}

// ============================================================================
// CSS fallback selector
// ============================================================================

/// `tag[type='…'].firstClass[data-x='…']` using only the first class and the
/// first remaining `data-*` attribute in attribute order.
pub fn build_css_selector(el: &ElementDescriptor) -> String {
    let mut selector = el.tag_name.clone();

    if let Some(t) = el.element_type.as_deref().filter(|t| !t.is_empty()) {
        selector.push_str(&format!("[type='{}']", css_string(t)));
    }

    if let Some(first_class) = el.classes.first() {
        selector.push('.');
        selector.push_str(&css_identifier(first_class));
    }

    let extra = el
        .attributes
        .iter()
        .find(|(name, _)| !CSS_EXCLUDED.contains(name) && name.starts_with("data-"));
    if let Some((name, value)) = extra {
        selector.push_str(&format!("[{}='{}']", name, css_string(value)));
    }

    selector
}

/// Escape a value for use inside a single-quoted CSS string.
pub fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape characters that would end a CSS identifier (class names like `md:flex`).
pub fn css_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, c) in ident.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            out.push_str(&format!("\\3{} ", c));
            continue;
        }
        let plain = c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii();
        if !plain {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Whether `#ident` is a valid selector for this id without escaping.
pub fn is_plain_css_identifier(ident: &str) -> bool {
    let body = ident.strip_prefix('-').unwrap_or(ident);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
