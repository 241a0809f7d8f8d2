use crate::codegen::emitter::{element_comment, enter_method_stem, EmitContext, PomEmitter, ResolvedElement};
use crate::codegen::writer::CodeWriter;
use crate::locator::render::{csharp_literal, playwright_selector};
use crate::snapshot::snapshot_model::ElementRole;

/// Playwright for .NET page object: selector strings and async methods on `IPage`.
pub struct PlaywrightEmitter;

impl PomEmitter for PlaywrightEmitter {
    fn member_names(&self, name: &str, role: ElementRole, generate_methods: bool) -> Vec<String> {
        let mut members = vec![format!("{}Selector", name)];
        if !generate_methods {
            return members;
        }
        match role {
            ElementRole::TextInput => members.push(format!("Enter{}Async", enter_method_stem(name))),
            ElementRole::Checkbox | ElementRole::Radio => {
                members.push(format!("Check{}Async", name));
                members.push(format!("Is{}CheckedAsync", name));
            }
            ElementRole::SubmitInput | ElementRole::Button | ElementRole::Link => {
                members.push(format!("Click{}Async", name))
            }
            ElementRole::Dropdown => {
                members.push(format!("Select{}ByTextAsync", name));
                members.push(format!("Select{}ByValueAsync", name));
            }
            ElementRole::Data => members.push(format!("Get{}TextAsync", name)),
            ElementRole::OtherInput | ElementRole::Other => {}
        }
        members
    }

    fn emit(&self, ctx: &EmitContext) -> String {
        let class = &ctx.class_name;
        let mut w = CodeWriter::new();

        w.line(0, "using Microsoft.Playwright;");
        w.line(0, "using System.Threading.Tasks;");
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
        w.line(2, "private readonly IPage _page;");
        w.blank();
        w.line(2, &format!("public {}(IPage page)", class));
        w.line(2, "{");
        w.line(3, "_page = page;");
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
            "public async Task NavigateAsync()",
            &[format!(
                "await _page.GotoAsync({});",
                csharp_literal(&ctx.snapshot.url)
            )],
        );
        w.summary(2, &["Wait for page to load completely"]);
        w.line(2, &format!("public async Task<{}> WaitForPageToLoadAsync()", class));
        w.line(2, "{");
        w.line(3, "await _page.WaitForLoadStateAsync(LoadState.NetworkIdle);");
        w.line(3, "return this;");
        w.line(2, "}");

        w.line(1, "}");
        w.line(0, "}");
        w.finish()
    }
}

fn write_element(w: &mut CodeWriter, element: &ResolvedElement, include_comments: bool) {
    if include_comments {
        w.line(2, &format!("// {}", element_comment(element.descriptor)));
    }
    w.line(
        2,
        &format!(
            "private string {}Selector => {};",
            element.name,
            playwright_selector(&element.locator)
        ),
    );
    w.blank();
}

/// Text entry, checking and selection return the page for chaining.
fn write_methods(w: &mut CodeWriter, element: &ResolvedElement, class: &str) {
    let name = &element.name;
    let selector = format!("{}Selector", name);
    match element.descriptor.role() {
        ElementRole::TextInput => w.method(
            2,
            &format!("Enter text in the {}", name),
            &format!(
                "public async Task<{}> Enter{}Async(string text)",
                class,
                enter_method_stem(name)
            ),
            &[
                format!("await _page.FillAsync({}, text);", selector),
                "return this;".to_string(),
            ],
        ),
        ElementRole::Checkbox | ElementRole::Radio => {
            w.method(
                2,
                &format!("Check the {}", name),
                &format!(
                    "public async Task<{}> Check{}Async(bool check = true)",
                    class, name
                ),
                &[
                    "if (check)".to_string(),
                    format!("    await _page.CheckAsync({});", selector),
                    "else".to_string(),
                    format!("    await _page.UncheckAsync({});", selector),
                    "return this;".to_string(),
                ],
            );
            w.method(
                2,
                &format!("Check if the {} is checked", name),
                &format!("public async Task<bool> Is{}CheckedAsync()", name),
                &[format!("return await _page.IsCheckedAsync({});", selector)],
            );
        }
        ElementRole::SubmitInput | ElementRole::Button | ElementRole::Link => w.method(
            2,
            &format!("Click the {}", name),
            &format!("public async Task Click{}Async()", name),
            &[format!("await _page.ClickAsync({});", selector)],
        ),
        ElementRole::Dropdown => {
            w.method(
                2,
                &format!("Select option by visible text in the {}", name),
                &format!(
                    "public async Task<{}> Select{}ByTextAsync(string text)",
                    class, name
                ),
                &[
                    format!(
                        "await _page.SelectOptionAsync({}, new SelectOptionValue {{ Label = text }});",
                        selector
                    ),
                    "return this;".to_string(),
                ],
            );
            w.method(
                2,
                &format!("Select option by value in the {}", name),
                &format!(
                    "public async Task<{}> Select{}ByValueAsync(string value)",
                    class, name
                ),
                &[
                    format!(
                        "await _page.SelectOptionAsync({}, new SelectOptionValue {{ Value = value }});",
                        selector
                    ),
                    "return this;".to_string(),
                ],
            );
        }
        ElementRole::Data => w.method(
            2,
            &format!("Get text from the {}", name),
            &format!("public async Task<string> Get{}TextAsync()", name),
            &[format!(
                "return await _page.TextContentAsync({}) ?? string.Empty;",
                selector
            )],
        ),
        ElementRole::OtherInput | ElementRole::Other => {}
    }
}
