#![allow(dead_code)]

use pom_generator::snapshot::extractor::{build_snapshot, describe};
use pom_generator::snapshot::snapshot_model::{
    ElementDescriptor, PageSnapshot, Purpose, RawElement, RawPage,
};

// ============================================================================
// Helper builders
// ============================================================================

pub fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn raw_page(title: &str, elements: Vec<RawElement>) -> RawPage {
    RawPage {
        url: "https://example.com/login".into(),
        title: title.into(),
        elements,
    }
}

/// `<input id="user" type="text">` and `<button id="submit" type="submit">Sign in</button>`.
pub fn login_page() -> RawPage {
    raw_page(
        "Login",
        vec![
            RawElement::new("input").attr("id", "user").attr("type", "text"),
            RawElement::new("button")
                .attr("id", "submit")
                .attr("type", "submit")
                .text("Sign in"),
        ],
    )
}

pub fn login_snapshot() -> PageSnapshot {
    build_snapshot(&login_page())
}

/// A richer page touching every element role.
pub fn checkout_snapshot() -> PageSnapshot {
    build_snapshot(&raw_page(
        "Checkout - Shop",
        vec![
            RawElement::new("h1").text("Your order"),
            RawElement::new("input")
                .attr("name", "email")
                .attr("type", "email"),
            RawElement::new("input")
                .attr("id", "terms")
                .attr("type", "checkbox"),
            RawElement::new("select").attr("id", "country"),
            RawElement::new("a").attr("href", "/help").text("Need help?"),
            RawElement::new("input")
                .attr("type", "submit")
                .attr("value", "Pay")
                .attr("data-testid", "pay-button"),
            RawElement::new("span")
                .attr("class", "total amount")
                .text("$42.00"),
        ],
    ))
}

pub fn interactive(el: RawElement) -> ElementDescriptor {
    describe(&el, Purpose::Interaction)
}

pub fn data(el: RawElement) -> ElementDescriptor {
    describe(&el, Purpose::Data)
}

pub fn snapshot_of(elements: Vec<ElementDescriptor>) -> PageSnapshot {
    PageSnapshot {
        url: "https://example.com/".into(),
        title: "Example".into(),
        elements,
    }
}
