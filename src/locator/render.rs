use crate::codegen::options::Framework;
use crate::locator::locator_model::RecommendedLocator;
use crate::locator::resolver::{css_string, is_plain_css_identifier};

/// Quote and escape a value as a C# regular string literal.
pub fn csharp_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Selenium `By` expression, e.g. `By.Id("user")`.
pub fn selenium_locator(locator: &RecommendedLocator) -> String {
    match locator {
        RecommendedLocator::Id { value } => format!("By.Id({})", csharp_literal(value)),
        RecommendedLocator::TestId { attribute, value } => format!(
            "By.CssSelector({})",
            csharp_literal(&format!("[{}='{}']", attribute, css_string(value)))
        ),
        RecommendedLocator::Name { value } => format!("By.Name({})", csharp_literal(value)),
        RecommendedLocator::LinkText { value } => {
            format!("By.LinkText({})", csharp_literal(value))
        }
        RecommendedLocator::CssSelector { value } => {
            format!("By.CssSelector({})", csharp_literal(value))
        }
        RecommendedLocator::XPath { value } => format!("By.XPath({})", csharp_literal(value)),
    }
}

/// Playwright selector string literal, e.g. `"#user"` or `"text=Sign in"`.
pub fn playwright_selector(locator: &RecommendedLocator) -> String {
    let selector = match locator {
        RecommendedLocator::Id { value } if is_plain_css_identifier(value) => format!("#{}", value),
        RecommendedLocator::Id { value } => format!("[id='{}']", css_string(value)),
        RecommendedLocator::TestId { attribute, value } => {
            format!("[{}='{}']", attribute, css_string(value))
        }
        RecommendedLocator::Name { value } => format!("[name='{}']", css_string(value)),
        RecommendedLocator::LinkText { value } => format!("text={}", value),
        RecommendedLocator::CssSelector { value } | RecommendedLocator::XPath { value } => {
            value.clone()
        }
    };
    csharp_literal(&selector)
}

pub fn render_locator(locator: &RecommendedLocator, framework: Framework) -> String {
    match framework {
        Framework::Selenium => selenium_locator(locator),
        Framework::Playwright => playwright_selector(locator),
    }
}
