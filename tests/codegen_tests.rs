mod common;

use pom_generator::codegen::emitter::{
    class_name, element_comment, emit_local, enter_method_stem, resolve_elements, GeneratedPom,
};
use pom_generator::codegen::options::{Framework, GenerationOptions};
use pom_generator::snapshot::extractor::build_snapshot;
use pom_generator::snapshot::html_source::HtmlSnapshotSource;
use pom_generator::snapshot::probe::JsonSnapshotSource;
use pom_generator::snapshot::snapshot_model::RawElement;
use pom_generator::snapshot::source::SnapshotSource;

use common::{checkout_snapshot, data, interactive, login_snapshot, raw_page, snapshot_of};

fn selenium() -> GenerationOptions {
    GenerationOptions::default()
}

fn playwright() -> GenerationOptions {
    GenerationOptions {
        framework: Framework::Playwright,
        ..GenerationOptions::default()
    }
}

// ============================================================================
// Golden output
// ============================================================================

#[test]
fn selenium_login_page_matches_golden() {
    let pom = emit_local(&login_snapshot(), &selenium());
    assert_eq!(pom.source, include_str!("fixtures/LoginPage.selenium.cs"));
    assert_eq!(pom.class_name, "LoginPage");
    assert_eq!(pom.file_name(), "LoginPage.cs");
}

#[test]
fn playwright_login_page_matches_golden() {
    let pom = emit_local(&login_snapshot(), &playwright());
    assert_eq!(pom.source, include_str!("fixtures/LoginPage.playwright.cs"));
    assert_eq!(pom.framework, Framework::Playwright);
}

#[test]
fn login_scenario_declarations() {
    let source = emit_local(&login_snapshot(), &selenium()).source;

    assert!(source.contains("public class LoginPage"));
    assert!(source.contains(r#"private By UserLocator => By.Id("user");"#));
    assert!(source.contains("public IWebElement User => _driver.FindElement(UserLocator);"));
    assert!(source.contains("public LoginPage EnterUser(string text)"));
    assert!(source.contains(r#"private By SubmitLocator => By.Id("submit");"#));
    assert!(source.contains("public void ClickSubmit()"));
}

// ============================================================================
// Per-role methods
// ============================================================================

#[test]
fn selenium_methods_cover_every_role() {
    let source = emit_local(&checkout_snapshot(), &selenium()).source;

    assert!(source.contains("public class CheckoutShopPage"));
    assert!(source.contains(r#"private By EmailLocator => By.Name("email");"#));
    assert!(source.contains("public CheckoutShopPage EnterEmail(string text)"));
    assert!(source.contains("public CheckoutShopPage ClickTerms()"));
    assert!(source.contains("public bool IsTermsSelected()"));
    assert!(source.contains("return Terms.Selected;"));
    assert!(source.contains("public CheckoutShopPage SelectCountryByText(string text)"));
    assert!(source.contains("new SelectElement(Country).SelectByValue(value);"));
    assert!(source.contains(r#"private By NeedHelpLocator => By.LinkText("Need help?");"#));
    assert!(source.contains("public void ClickNeedHelp()"));
    assert!(source.contains(
        r#"private By PayButtonLocator => By.CssSelector("[data-testid='pay-button']");"#
    ));
    assert!(source.contains("public void ClickPayButton()"));
    assert!(source.contains(r#"private By YourOrderLocator => By.CssSelector("h1");"#));
    assert!(source.contains("public string GetYourOrderText()"));
    assert!(source.contains(r#"private By Span4200Locator => By.CssSelector("span.total");"#));
    assert!(source.contains("return Span4200.Text;"));
}

#[test]
fn playwright_methods_cover_every_role() {
    let source = emit_local(&checkout_snapshot(), &playwright()).source;

    assert!(source.contains(r#"private string EmailSelector => "[name='email']";"#));
    assert!(source.contains("public async Task<CheckoutShopPage> EnterEmailAsync(string text)"));
    assert!(source.contains("public async Task<CheckoutShopPage> CheckTermsAsync(bool check = true)"));
    assert!(source.contains("await _page.UncheckAsync(TermsSelector);"));
    assert!(source.contains("public async Task<bool> IsTermsCheckedAsync()"));
    assert!(source.contains("public async Task<CheckoutShopPage> SelectCountryByTextAsync(string text)"));
    assert!(source.contains(
        "public async Task<CheckoutShopPage> SelectCountryByValueAsync(string value)"
    ));
    assert!(source.contains(
        "await _page.SelectOptionAsync(CountrySelector, new SelectOptionValue { Label = text });"
    ));
    assert!(source.contains(
        "await _page.SelectOptionAsync(CountrySelector, new SelectOptionValue { Value = value });"
    ));
    assert!(source.contains(r#"private string NeedHelpSelector => "text=Need help?";"#));
    assert!(source.contains("public async Task ClickPayButtonAsync()"));
    assert!(source.contains("public async Task<string> GetYourOrderTextAsync()"));
    assert!(source.contains("return await _page.TextContentAsync(YourOrderSelector) ?? string.Empty;"));
}

#[test]
fn methods_follow_their_element_declarations() {
    let source = emit_local(&checkout_snapshot(), &selenium()).source;

    let email_decl = source.find("EmailLocator =>").unwrap();
    let enter_email = source.find("EnterEmail(").unwrap();
    let terms_decl = source.find("TermsLocator =>").unwrap();
    assert!(email_decl < enter_email);
    assert!(enter_email < terms_decl);
}

#[test]
fn text_inputs_drop_the_input_word_from_enter_methods() {
    assert_eq!(enter_method_stem("UsernameInput"), "Username");
    assert_eq!(enter_method_stem("Input3"), "3");
    assert_eq!(enter_method_stem("Input"), "Input");

    let snapshot = snapshot_of(vec![interactive(
        RawElement::new("input").attr("id", "username-input"),
    )]);
    let source = emit_local(&snapshot, &selenium()).source;
    assert!(source.contains("public ExamplePage EnterUsername(string text)"));
    assert!(source.contains("UsernameInput.SendKeys(text);"));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn methods_can_be_switched_off() {
    let options = GenerationOptions {
        generate_methods: false,
        ..selenium()
    };
    let source = emit_local(&login_snapshot(), &options).source;

    assert!(source.contains("UserLocator"));
    assert!(!source.contains("EnterUser"));
    assert!(!source.contains("ClickSubmit"));
    assert!(source.contains("public LoginPage NavigateTo()"));
    assert!(source.contains("public LoginPage WaitForPageToLoad()"));
}

#[test]
fn comments_can_be_switched_off() {
    let options = GenerationOptions {
        include_comments: false,
        ..selenium()
    };
    let source = emit_local(&login_snapshot(), &options).source;
    assert!(!source.contains("// Interactive element"));
}

#[test]
fn simple_naming_uses_tag_and_position() {
    let options = GenerationOptions {
        smart_naming: false,
        ..selenium()
    };
    let source = emit_local(&login_snapshot(), &options).source;

    assert!(source.contains(r#"private By Input0Locator => By.Id("user");"#));
    assert!(source.contains(r#"private By Button1Locator => By.Id("submit");"#));
    assert!(source.contains("public LoginPage Enter0(string text)"));
}

#[test]
fn simple_naming_numbers_inputs_by_retained_position() {
    let snapshot = build_snapshot(&raw_page(
        "Form",
        vec![
            RawElement::new("p").text("intro"),
            RawElement::new("button").text("Go"),
            RawElement::new("input").attr("name", "a"),
            RawElement::new("input").attr("name", "b"),
        ],
    ));
    let options = GenerationOptions {
        smart_naming: false,
        ..selenium()
    };
    let names: Vec<String> = resolve_elements(&snapshot, "FormPage", &options)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Button0", "Input1", "Input2", "P3"]);
}

#[test]
fn custom_namespace_is_used() {
    let options = GenerationOptions {
        namespace: "Acme.Tests.Pages".into(),
        ..playwright()
    };
    let source = emit_local(&login_snapshot(), &options).source;
    assert!(source.contains("namespace Acme.Tests.Pages\n{"));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn empty_snapshot_emits_minimal_class() {
    let snapshot = build_snapshot(&raw_page("Blank", vec![]));

    let selenium_source = emit_local(&snapshot, &selenium()).source;
    assert!(selenium_source.contains("public class BlankPage"));
    assert!(selenium_source.contains("public BlankPage NavigateTo()"));
    assert!(selenium_source.contains("public BlankPage WaitForPageToLoad()"));
    assert!(!selenium_source.contains("IWebElement "));

    let playwright_source = emit_local(&snapshot, &playwright()).source;
    assert!(playwright_source.contains("public async Task NavigateAsync()"));
    assert!(playwright_source.contains("public async Task<BlankPage> WaitForPageToLoadAsync()"));
    assert!(!playwright_source.contains("Selector =>"));
}

#[test]
fn generation_is_deterministic() {
    let snapshot = checkout_snapshot();
    for options in [selenium(), playwright()] {
        let a = emit_local(&snapshot, &options);
        let b = emit_local(&snapshot, &options);
        assert_eq!(a, b);
    }
}

#[test]
fn identifiers_are_unique_and_valid() {
    let snapshot = build_snapshot(&raw_page(
        "Dupes",
        vec![
            RawElement::new("button").text("Save"),
            RawElement::new("button").text("Save"),
            RawElement::new("a").text("Navigate to"),
            RawElement::new("input").attr("id", "9lives"),
            RawElement::new("span").text("Dupes page"),
        ],
    ));

    let resolved = resolve_elements(&snapshot, &class_name(&snapshot.title), &selenium());
    let mut names: Vec<&str> = resolved.iter().map(|e| e.name.as_str()).collect();

    for name in &names {
        let mut chars = name.chars();
        assert!(chars.next().unwrap().is_ascii_alphabetic(), "{}", name);
        assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'), "{}", name);
    }

    assert_eq!(names, vec!["Save", "Save1", "NavigateTo2", "Input9lives", "DupesPage4"]);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 5);
}

#[test]
fn class_name_strips_punctuation_and_guards_digits() {
    assert_eq!(class_name("Login"), "LoginPage");
    assert_eq!(class_name("Sign up | Acme, Inc."), "SignupAcmeIncPage");
    assert_eq!(class_name("404 Not Found"), "Page404NotFoundPage");
    assert_eq!(class_name(""), "Page");
}

#[test]
fn comments_truncate_and_collapse_text() {
    let long = "word ".repeat(20);
    let el = data(RawElement::new("p").text(&long));
    let comment = element_comment(&el);
    let quoted = comment.split('"').nth(1).unwrap();
    assert_eq!(quoted.chars().count(), 53);
    assert!(quoted.ends_with("..."));

    let el = interactive(RawElement::new("button").text("  Sign \n  in "));
    assert_eq!(element_comment(&el), r#"Interactive element: button with text "Sign in""#);
}

#[test]
fn string_literals_are_escaped() {
    let snapshot = build_snapshot(&raw_page(
        "Quotes",
        vec![RawElement::new("a").attr("href", "#").text(r#"Say "hello""#)],
    ));
    let source = emit_local(&snapshot, &selenium()).source;
    assert!(source.contains(r#"By.LinkText("Say \"hello\"")"#));
}

#[test]
fn doc_comments_escape_xml() {
    let snapshot = build_snapshot(&raw_page("Q&A <beta>", vec![]));
    let source = emit_local(&snapshot, &selenium()).source;
    assert!(source.contains("/// Page Object Model for Q&amp;A &lt;beta&gt;"));
    assert!(source.contains("public class QAbetaPage"));
}

#[test]
fn generated_pom_serializes_for_download() {
    let pom: GeneratedPom = emit_local(&login_snapshot(), &selenium());
    let json = serde_json::to_value(&pom).unwrap();
    assert_eq!(json["class_name"], "LoginPage");
    assert_eq!(json["framework"], "selenium");
}

#[test]
fn playwright_fluent_methods_return_the_page() {
    let snapshot = snapshot_of(vec![
        interactive(RawElement::new("input").attr("id", "user").attr("type", "text")),
        interactive(RawElement::new("input").attr("id", "remember").attr("type", "checkbox")),
        interactive(RawElement::new("select").attr("id", "country")),
    ]);
    let source = emit_local(&snapshot, &playwright()).source;

    for signature in [
        "public async Task<ExamplePage> EnterUserAsync(string text)",
        "public async Task<ExamplePage> CheckRememberAsync(bool check = true)",
        "public async Task<ExamplePage> SelectCountryByTextAsync(string text)",
        "public async Task<ExamplePage> SelectCountryByValueAsync(string value)",
        "public async Task<ExamplePage> WaitForPageToLoadAsync()",
    ] {
        let start = source.find(signature).unwrap_or_else(|| panic!("missing {}", signature));
        let body = &source[start..];
        let end = body.find("\n        }\n").unwrap();
        assert!(body[..end].ends_with("return this;"), "{}", signature);
    }
}

/// Member declarations (`name(` or `name =>`) of a generated class body.
fn declared_members(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("public ") || line.starts_with("private "))
        .filter(|line| !line.starts_with("public class "))
        .filter_map(|line| {
            let head = line.split(['(', '=']).next()?.trim();
            head.split_whitespace().last().map(str::to_string)
        })
        .collect()
}

#[test]
fn derived_members_never_collide() {
    let snapshot = snapshot_of(vec![
        interactive(RawElement::new("input").attr("name", "search").attr("type", "text")),
        interactive(RawElement::new("input").attr("id", "search-input").attr("type", "text")),
        interactive(RawElement::new("input").attr("id", "user-locator").attr("type", "text")),
        interactive(RawElement::new("input").attr("id", "user").attr("type", "text")),
        interactive(RawElement::new("button").attr("id", "user-selector")),
        interactive(RawElement::new("button").attr("id", "user")),
    ]);

    for options in [selenium(), playwright()] {
        let source = emit_local(&snapshot, &options).source;
        let mut members = declared_members(&source);
        let total = members.len();
        members.sort();
        members.dedup();
        assert_eq!(members.len(), total, "duplicate member in:\n{}", source);
    }

    let names: Vec<String> = resolve_elements(&snapshot, "ExamplePage", &selenium())
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names[0], "Search");
    assert_eq!(names[1], "SearchInput1");
    assert_eq!(names[2], "UserLocator");
    assert_eq!(names[3], "User3");

    let source = emit_local(&snapshot, &selenium()).source;
    assert_eq!(source.matches("EnterSearch(").count(), 1);
    assert!(source.contains("public ExamplePage EnterSearch1(string text)"));
}

#[test]
fn positional_names_of_custom_elements_are_identifiers() {
    let snapshot = snapshot_of(vec![interactive(
        RawElement::new("md-button").attr("role", "button"),
    )]);
    let options = GenerationOptions {
        smart_naming: false,
        ..selenium()
    };
    let source = emit_local(&snapshot, &options).source;
    assert!(source.contains(r#"private By MdButton0Locator => By.CssSelector("md-button");"#));
    assert!(!source.contains("Md-button"));
}

#[test]
fn multi_line_titles_stay_inside_the_doc_comment() {
    let html = "<html><head><title>\n  Acme\n  Login\n</title></head><body><button id=\"go\">Go</button></body></html>";
    let from_html = HtmlSnapshotSource::new(html, "https://acme.test/login")
        .produce()
        .unwrap();
    assert_eq!(from_html.title, "Acme Login");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.json");
    let raw = raw_page("\n  Acme\n  Login\n", vec![RawElement::new("button").attr("id", "go").text("Go")]);
    std::fs::write(&path, serde_json::to_string(&raw).unwrap()).unwrap();
    let from_json = JsonSnapshotSource::new(&path)
        .produce()
        .unwrap();
    assert_eq!(from_json.title, "Acme Login");

    for snapshot in [from_html, from_json] {
        for options in [selenium(), playwright()] {
            let source = emit_local(&snapshot, &options).source;
            assert!(source.contains("    /// Page Object Model for Acme Login\n"));
            assert!(source.contains("public class AcmeLoginPage"));
        }
    }

    let mut raw_title = checkout_snapshot();
    raw_title.title = "Acme\n  Login".into();
    let source = emit_local(&raw_title, &selenium()).source;
    assert!(source.contains("/// Page Object Model for Acme Login\n"));
    for line in source.lines().take_while(|l| !l.contains("public class")) {
        let line = line.trim();
        assert!(
            line.is_empty() || line.starts_with("using") || line.starts_with("namespace")
                || line.starts_with('{') || line.starts_with("///"),
            "stray line: {:?}",
            line
        );
    }
}
