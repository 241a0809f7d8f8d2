use serde::Serialize;
use tracing::debug;

use crate::codegen::options::{Framework, GenerationOptions};
use crate::codegen::playwright::PlaywrightEmitter;
use crate::codegen::selenium::SeleniumEmitter;
use crate::locator::locator_model::RecommendedLocator;
use crate::locator::resolver::resolve_locator;
use crate::naming::name_resolver::NameResolver;
use crate::snapshot::snapshot_model::{ElementDescriptor, ElementRole, PageSnapshot, Purpose};
use crate::text::{collapse_whitespace, truncate_text};

/// Comment text longer than this is cut and marked with `...`.
pub const COMMENT_TEXT_LIMIT: usize = 50;

/// Members every generated class declares itself.
pub const RESERVED_MEMBERS: [&str; 4] = [
    "NavigateTo",
    "WaitForPageToLoad",
    "NavigateAsync",
    "WaitForPageToLoadAsync",
];

// ============================================================================
// Resolved elements
// ============================================================================

/// One element with its chosen locator and identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedElement<'a> {
    pub index: usize,
    pub descriptor: &'a ElementDescriptor,
    pub locator: RecommendedLocator,
    pub name: String,
}

/// Apply the locator and name resolvers to every element, in snapshot order.
pub fn resolve_elements<'a>(
    snapshot: &'a PageSnapshot,
    class_name: &str,
    options: &GenerationOptions,
) -> Vec<ResolvedElement<'a>> {
    let emitter = emitter_for(options.framework);
    let mut names = NameResolver::new(options.smart_naming, options.deduplicate_names);
    if options.deduplicate_names {
        names.reserve(class_name);
        for member in RESERVED_MEMBERS {
            names.reserve(member);
        }
    }

    snapshot
        .elements
        .iter()
        .enumerate()
        .map(|(index, descriptor)| ResolvedElement {
            index,
            descriptor,
            locator: resolve_locator(descriptor),
            name: names.resolve_with(descriptor, index, |name| {
                emitter.member_names(name, descriptor.role(), options.generate_methods)
            }),
        })
        .collect()
}

/// Class identifier: title without non-alphanumerics, plus `Page`.
pub fn class_name(title: &str) -> String {
    let stem: String = title.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Page{}Page", stem)
    } else {
        format!("{}Page", stem)
    }
}

/// `Interactive element: input with text "Sign in"`.
pub fn element_comment(el: &ElementDescriptor) -> String {
    let kind = match el.purpose {
        Purpose::Interaction => "Interactive element",
        Purpose::Data => "Data element",
    };

    if el.text_content.is_empty() {
        format!("{}: {}", kind, el.tag_name)
    } else {
        let text = truncate_text(&collapse_whitespace(&el.text_content), COMMENT_TEXT_LIMIT);
        format!("{}: {} with text \"{}\"", kind, el.tag_name, text)
    }
}

/// Stem of the text-entry method: the name without its first `Input`.
pub fn enter_method_stem(name: &str) -> String {
    let stem = name.replacen("Input", "", 1);
    if stem.is_empty() {
        name.to_string()
    } else {
        stem
    }
}

// ============================================================================
// Emitters
// ============================================================================

/// Everything an emitter needs for one class.
pub struct EmitContext<'a> {
    pub snapshot: &'a PageSnapshot,
    pub class_name: String,
    pub elements: Vec<ResolvedElement<'a>>,
    pub options: &'a GenerationOptions,
}

impl<'a> EmitContext<'a> {
    pub fn new(snapshot: &'a PageSnapshot, options: &'a GenerationOptions) -> Self {
        let class_name = class_name(&snapshot.title);
        let elements = resolve_elements(snapshot, &class_name, options);
        Self {
            snapshot,
            class_name,
            elements,
            options,
        }
    }
}

/// Renders a complete class in one framework idiom.
pub trait PomEmitter {
    /// Members an element called `name` adds to the class besides `name`
    /// itself. Naming keeps these unique across the whole class.
    fn member_names(&self, name: &str, role: ElementRole, generate_methods: bool) -> Vec<String>;
    fn emit(&self, ctx: &EmitContext) -> String;
}

pub fn emitter_for(framework: Framework) -> Box<dyn PomEmitter> {
    match framework {
        Framework::Selenium => Box::new(SeleniumEmitter),
        Framework::Playwright => Box::new(PlaywrightEmitter),
    }
}

/// Generated source plus what a download collaborator needs to save it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPom {
    pub class_name: String,
    pub framework: Framework,
    pub source: String,
}

impl GeneratedPom {
    /// `<ClassName>.cs`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.class_name, self.framework.file_extension())
    }
}

/// Local, deterministic generation.
pub fn emit_local(snapshot: &PageSnapshot, options: &GenerationOptions) -> GeneratedPom {
    let ctx = EmitContext::new(snapshot, options);
    let source = emitter_for(options.framework).emit(&ctx);

    debug!(
        class = %ctx.class_name,
        framework = %options.framework,
        elements = ctx.elements.len(),
        "emitted page object"
    );

    GeneratedPom {
        class_name: ctx.class_name,
        framework: options.framework,
        source,
    }
}
