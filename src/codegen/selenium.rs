use crate::codegen::emitter::{element_comment, enter_method_stem, EmitContext, PomEmitter, ResolvedElement};
use crate::codegen::writer::CodeWriter;
use crate::locator::render::{csharp_literal, selenium_locator};
use crate::snapshot::snapshot_model::ElementRole;

/// Seconds the generated `WebDriverWait` waits before giving up.
pub const WAIT_TIMEOUT_SECONDS: u32 = 10;

/// Selenium WebDriver page object: `By` locators, `IWebElement` properties,
/// synchronous fluent methods.
pub struct SeleniumEmitter;

impl PomEmitter for SeleniumEmitter {
    fn member_names(&self, name: &str, role: ElementRole, generate_methods: bool) -> Vec<String> {
        let mut members = vec![format!("{}Locator", name)];
        if !generate_methods {
            return members;
        }
        match role {
            ElementRole::TextInput => members.push(format!("Enter{}", enter_method_stem(name))),
            ElementRole::Checkbox | ElementRole::Radio => {
                members.push(format!("Click{}", name));
                members.push(format!("Is{}Selected", name));
            }
            ElementRole::SubmitInput | ElementRole::Button | ElementRole::Link => {
                members.push(format!("Click{}", name))
            }
            ElementRole::Dropdown => {
                members.push(format!("Select{}ByText", name));
                members.push(format!("Select{}ByValue", name));
            }
            ElementRole::Data => members.push(format!("Get{}Text", name)),
            ElementRole::OtherInput | ElementRole::Other => {}
        }
        members
    }

    fn emit(&self, ctx: &EmitContext) -> String {
        let class = &ctx.class_name;
        let mut w = CodeWriter::new();

        w.line(0, "using OpenQA.Selenium;");
        w.line(0, "using OpenQA.Selenium.Support.UI;");
        w.line(0, "using System;");
        w.blank();
        w.line(0, &format!("namespace {}", ctx.options.namespace));
        w.line(0, "{");
        w.summary(
            1,
            &[
                &format!("Page Object Model for {}", ctx.snapshot.title),
                &format!("URL: {}", ctx.snapshot.url),
            ],
        );
        w.line(1, &format!("public class {}", class));
        w.line(1, "{");
        w.line(2, "private IWebDriver _driver;");
        w.line(2, "private WebDriverWait _wait;");
        w.blank();
        w.line(2, &format!("public {}(IWebDriver driver)", class));
        w.line(2, "{");
        w.line(3, "_driver = driver;");
        w.line(
            3,
            &format!(
                "_wait = new WebDriverWait(driver, TimeSpan.FromSeconds({}));",
                WAIT_TIMEOUT_SECONDS
            ),
        );
        w.line(2, "}");
        w.blank();

        for element in &ctx.elements {
            write_element(&mut w, element, ctx.options.include_comments);
            if ctx.options.generate_methods {
                write_methods(&mut w, element, class);
            }
        }

        w.method(
            2,
            "Navigate to the page",
            &format!("public {} NavigateTo()", class),
            &[
                format!(
                    "_driver.Navigate().GoToUrl({});",
                    csharp_literal(&ctx.snapshot.url)
                ),
                "return this;".to_string(),
            ],
        );
        w.summary(2, &["Wait for page to load completely"]);
        w.line(2, &format!("public {} WaitForPageToLoad()", class));
        w.line(2, "{");
        w.line(
            3,
            "_wait.Until(d => ((IJavaScriptExecutor)d).ExecuteScript(\"return document.readyState\").Equals(\"complete\"));",
        );
        w.line(3, "return this;");
        w.line(2, "}");

        w.line(1, "}");
        w.line(0, "}");
        w.finish()
    }
}

fn write_element(w: &mut CodeWriter, element: &ResolvedElement, include_comments: bool) {
    let name = &element.name;
    if include_comments {
        w.line(2, &format!("// {}", element_comment(element.descriptor)));
    }
    w.line(
        2,
        &format!(
            "private By {}Locator => {};",
            name,
            selenium_locator(&element.locator)
        ),
    );
    w.line(
        2,
        &format!(
            "public IWebElement {} => _driver.FindElement({}Locator);",
            name, name
        ),
    );
    w.blank();
}

fn write_methods(w: &mut CodeWriter, element: &ResolvedElement, class: &str) {
    let name = &element.name;
    match element.descriptor.role() {
        ElementRole::TextInput => w.method(
            2,
            &format!("Enter text in the {}", name),
            &format!(
                "public {} Enter{}(string text)",
                class,
                enter_method_stem(name)
            ),
            &[
                format!("{}.Clear();", name),
                format!("{}.SendKeys(text);", name),
                "return this;".to_string(),
            ],
        ),
        ElementRole::Checkbox | ElementRole::Radio => {
            w.method(
                2,
                &format!("Click the {}", name),
                &format!("public {} Click{}()", class, name),
                &[format!("{}.Click();", name), "return this;".to_string()],
            );
            w.method(
                2,
                &format!("Check if the {} is selected", name),
                &format!("public bool Is{}Selected()", name),
                &[format!("return {}.Selected;", name)],
            );
        }
        ElementRole::SubmitInput | ElementRole::Button | ElementRole::Link => w.method(
            2,
            &format!("Click the {}", name),
            &format!("public void Click{}()", name),
            &[format!("{}.Click();", name)],
        ),
        ElementRole::Dropdown => {
            w.method(
                2,
                &format!("Select option by visible text in the {}", name),
                &format!("public {} Select{}ByText(string text)", class, name),
                &[
                    format!("new SelectElement({}).SelectByText(text);", name),
                    "return this;".to_string(),
                ],
            );
            w.method(
                2,
                &format!("Select option by value in the {}", name),
                &format!("public {} Select{}ByValue(string value)", class, name),
                &[
                    format!("new SelectElement({}).SelectByValue(value);", name),
                    "return this;".to_string(),
                ],
            );
        }
        ElementRole::Data => w.method(
            2,
            &format!("Get text from the {}", name),
            &format!("public string Get{}Text()", name),
            &[format!("return {}.Text;", name)],
        ),
        ElementRole::OtherInput | ElementRole::Other => {}
    }
}
