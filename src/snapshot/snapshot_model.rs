use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Attributes: ordered name/value pairs
// ============================================================================

/// Attribute map that keeps insertion order.
///
/// The CSS fallback selector picks the *first* qualifying `data-*` attribute,
/// so iteration order is part of the observable behavior and must survive a
/// JSON round trip. Serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace. A replaced attribute keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, but treats an empty value as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct AttributesVisitor;

impl<'de> Visitor<'de> for AttributesVisitor {
    type Value = Attributes;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of attribute names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
        let mut attrs = Attributes::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            attrs.insert(name, value);
        }
        Ok(attrs)
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributesVisitor)
    }
}

// ============================================================================
// Raw oracle output: what a DOM probe reports before filtering
// ============================================================================

/// Computed style values relevant to visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: "visible".to_string(),
        }
    }
}

/// Rendered box size. Missing values deserialize as zero (not rendered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// One DOM element as reported by a snapshot source, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: Attributes,
    /// Untrimmed `textContent`.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default)]
    pub rect: BoundingBox,
    #[serde(default)]
    pub xpath: Option<String>,
    #[serde(default)]
    pub has_click_handler: bool,
}

impl RawElement {
    /// A rendered element with the given tag and no attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Attributes::new(),
            text: String::new(),
            style: ComputedStyle::default(),
            rect: BoundingBox {
                width: 100.0,
                height: 20.0,
            },
            xpath: None,
            has_click_handler: false,
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

/// Everything a probe reports about one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

// ============================================================================
// Snapshot data model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Interaction,
    Data,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purpose::Interaction => f.write_str("interaction"),
            Purpose::Data => f.write_str("data"),
        }
    }
}

/// Immutable snapshot of one retained DOM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub attributes: Attributes,
    pub is_interactive: bool,
    pub is_visible: bool,
    pub purpose: Purpose,
    #[serde(default)]
    pub xpath: Option<String>,
}

/// What kind of control an element is, for naming prefixes and method generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    TextInput,
    Checkbox,
    Radio,
    SubmitInput,
    OtherInput,
    Button,
    Link,
    Dropdown,
    Data,
    Other,
}

impl ElementDescriptor {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get_non_empty(name)
    }

    /// The `type` an input actually behaves as; a missing type means `text`.
    pub fn effective_type(&self) -> Option<String> {
        match &self.element_type {
            Some(t) if !t.is_empty() => Some(t.to_ascii_lowercase()),
            _ if self.tag_name == "input" => Some("text".to_string()),
            _ => None,
        }
    }

    pub fn role(&self) -> ElementRole {
        if self.purpose == Purpose::Data {
            return ElementRole::Data;
        }

        match self.tag_name.as_str() {
            "input" => match self.effective_type().as_deref() {
                Some("text") | Some("email") | Some("password") => ElementRole::TextInput,
                Some("checkbox") => ElementRole::Checkbox,
                Some("radio") => ElementRole::Radio,
                Some("submit") => ElementRole::SubmitInput,
                _ => ElementRole::OtherInput,
            },
            "button" => ElementRole::Button,
            "a" => ElementRole::Link,
            "select" => ElementRole::Dropdown,
            _ => ElementRole::Other,
        }
    }
}

/// One analysis of one document. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub elements: Vec<ElementDescriptor>,
}

impl PageSnapshot {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// SHA-1 over the canonical JSON form; identifies a snapshot in traces.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let json = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
