use std::collections::HashSet;

use tracing::debug;

use crate::snapshot::snapshot_model::{ElementDescriptor, ElementRole};
use crate::text::char_len;

/// Text content must be shorter than this to become a name.
pub const NAME_TEXT_LIMIT: usize = 30;

// ============================================================================
// Name formatting
// ============================================================================

/// PascalCase an arbitrary string: anything but ASCII letters, digits and
/// spaces becomes a separator; each token is capitalized, the rest lowercased.
pub fn format_element_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == ' ' { c } else { ' ' })
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(capitalize_word)
        .collect()
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = first.to_ascii_uppercase().to_string();
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Prefix used for positional names of interactive controls.
pub fn type_prefix(el: &ElementDescriptor) -> Option<&'static str> {
    match el.role() {
        ElementRole::TextInput => Some("Input"),
        ElementRole::Checkbox => Some("Checkbox"),
        ElementRole::Radio => Some("Radio"),
        ElementRole::SubmitInput | ElementRole::Button => Some("Button"),
        ElementRole::Link => Some("Link"),
        ElementRole::Dropdown => Some("Dropdown"),
        ElementRole::OtherInput | ElementRole::Data | ElementRole::Other => None,
    }
}

fn fallback_prefix(el: &ElementDescriptor) -> String {
    format_element_name(type_prefix(el).unwrap_or(el.tag_name.as_str()))
}

// ============================================================================
// Naming rules
// ============================================================================

/// `Input3` style: PascalCased tag plus position.
pub fn positional_name(el: &ElementDescriptor, index: usize) -> String {
    format!("{}{}", format_element_name(&el.tag_name), index)
}

/// Name from element semantics: id → name → data-testid → aria-label →
/// short text → type prefix plus position.
pub fn smart_name(el: &ElementDescriptor, index: usize) -> String {
    let short_text = Some(el.text_content.as_str()).filter(|t| char_len(t) < NAME_TEXT_LIMIT);

    let candidates = [
        el.id.as_deref(),
        el.name.as_deref(),
        el.attribute("data-testid"),
        el.attribute("aria-label"),
        short_text,
    ];

    let chosen = candidates
        .into_iter()
        .flatten()
        .map(format_element_name)
        .find(|name| !name.is_empty());

    match chosen {
        Some(name) if name.starts_with(|c: char| c.is_ascii_digit()) => {
            format!("{}{}", fallback_prefix(el), name)
        }
        Some(name) => name,
        None => format!("{}{}", fallback_prefix(el), index),
    }
}

pub fn element_name(el: &ElementDescriptor, index: usize, smart_naming: bool) -> String {
    if smart_naming {
        smart_name(el, index)
    } else {
        positional_name(el, index)
    }
}

// ============================================================================
// NameResolver: per-run naming with optional collision handling
// ============================================================================

/// Assigns names for one generation run.
///
/// With de-duplication on, a name that is already taken (or whose derived
/// members are) gets the element's position appended, then `_2`, `_3`, …
/// until it is free.
#[derive(Debug)]
pub struct NameResolver {
    smart_naming: bool,
    deduplicate: bool,
    taken: HashSet<String>,
}

impl NameResolver {
    pub fn new(smart_naming: bool, deduplicate: bool) -> Self {
        Self {
            smart_naming,
            deduplicate,
            taken: HashSet::new(),
        }
    }

    /// Mark a member name of the generated class as unavailable.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    pub fn resolve(&mut self, el: &ElementDescriptor, index: usize) -> String {
        self.resolve_with(el, index, |_| Vec::new())
    }

    /// Like `resolve`, but a name only counts as free when every member
    /// derived from it (`members(name)`) is free too. All of them are taken
    /// once the name is chosen.
    pub fn resolve_with<F>(&mut self, el: &ElementDescriptor, index: usize, members: F) -> String
    where
        F: Fn(&str) -> Vec<String>,
    {
        let base = element_name(el, index, self.smart_naming);

        if !self.deduplicate {
            self.taken.insert(base.clone());
            return base;
        }

        let is_free = |taken: &HashSet<String>, name: &str| {
            !taken.contains(name) && members(name).iter().all(|m| !taken.contains(m))
        };

        let mut name = base.clone();
        if !is_free(&self.taken, &name) {
            name = format!("{}{}", base, index);
            let mut n = 2;
            while !is_free(&self.taken, &name) {
                name = format!("{}{}_{}", base, index, n);
                n += 1;
            }
            debug!(base = %base, renamed = %name, "element name collision");
        }

        self.taken.extend(members(&name));
        self.taken.insert(name.clone());
        name
    }
}
