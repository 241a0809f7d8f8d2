use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocatorKind {
    Id,
    TestId,
    Name,
    LinkText,
    CssSelector,
    #[serde(rename = "xpath")]
    XPath,
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocatorKind::Id => "id",
            LocatorKind::TestId => "testId",
            LocatorKind::Name => "name",
            LocatorKind::LinkText => "linkText",
            LocatorKind::CssSelector => "cssSelector",
            LocatorKind::XPath => "xpath",
        };
        f.write_str(s)
    }
}

/// A test-automation attribute and its value, e.g. `data-testid="login"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestIdCandidate {
    pub attribute: String,
    pub value: String,
}

/// Every strategy available for one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorCandidates {
    pub id: Option<String>,
    pub test_id: Option<TestIdCandidate>,
    pub name: Option<String>,
    pub link_text: Option<String>,
    pub class_names: Vec<String>,
    /// Always producible.
    pub css_selector: String,
    pub xpath: Option<String>,
}

/// The single strategy chosen for an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecommendedLocator {
    Id { value: String },
    TestId { attribute: String, value: String },
    Name { value: String },
    LinkText { value: String },
    CssSelector { value: String },
    #[serde(rename = "xpath")]
    XPath { value: String },
}

impl RecommendedLocator {
    pub fn kind(&self) -> LocatorKind {
        match self {
            RecommendedLocator::Id { .. } => LocatorKind::Id,
            RecommendedLocator::TestId { .. } => LocatorKind::TestId,
            RecommendedLocator::Name { .. } => LocatorKind::Name,
            RecommendedLocator::LinkText { .. } => LocatorKind::LinkText,
            RecommendedLocator::CssSelector { .. } => LocatorKind::CssSelector,
            RecommendedLocator::XPath { .. } => LocatorKind::XPath,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            RecommendedLocator::Id { value }
            | RecommendedLocator::TestId { value, .. }
            | RecommendedLocator::Name { value }
            | RecommendedLocator::LinkText { value }
            | RecommendedLocator::CssSelector { value }
            | RecommendedLocator::XPath { value } => value,
        }
    }
}

impl fmt::Display for RecommendedLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendedLocator::TestId { attribute, value } => {
                write!(f, "testId({}={})", attribute, value)
            }
            other => write!(f, "{}({})", other.kind(), other.value()),
        }
    }
}
