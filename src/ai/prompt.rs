use crate::codegen::options::GenerationOptions;
use crate::snapshot::snapshot_model::PageSnapshot;
use crate::text::{collapse_whitespace, truncate_text};

/// Element text longer than this is cut before it goes into the prompt.
pub const PROMPT_TEXT_LIMIT: usize = 50;

pub const SYSTEM_PROMPT: &str = "You are an expert test automation engineer specializing in creating Page Object Models. Generate only the code without any explanation or markdown formatting.";

/// Natural-language generation request for one snapshot.
pub fn build_prompt(snapshot: &PageSnapshot, options: &GenerationOptions) -> String {
    let framework = options.framework;
    let mut prompt = format!(
        "Generate a C# Page Object Model for {} using the following page structure:\n\n",
        framework
    );
    prompt.push_str(&format!("URL: {}\n", snapshot.url));
    prompt.push_str(&format!("Title: {}\n\n", snapshot.title));
    prompt.push_str("Elements on the page:\n");

    for (index, el) in snapshot.elements.iter().enumerate() {
        prompt.push_str(&format!("Element {}: {}", index + 1, el.tag_name));
        if let Some(id) = &el.id {
            prompt.push_str(&format!(", id=\"{}\"", id));
        }
        if let Some(name) = &el.name {
            prompt.push_str(&format!(", name=\"{}\"", name));
        }
        if let Some(ty) = &el.element_type {
            prompt.push_str(&format!(", type=\"{}\"", ty));
        }
        if !el.text_content.is_empty() {
            let text = truncate_text(&collapse_whitespace(&el.text_content), PROMPT_TEXT_LIMIT);
            prompt.push_str(&format!(", text=\"{}\"", text));
        }
        prompt.push_str(&format!(", purpose=\"{}\"\n", el.purpose));
    }

    prompt.push_str("\nRequirements:\n");
    prompt.push_str(&format!(
        "- Follow best practices for {} C# Page Object Models\n",
        framework
    ));
    prompt.push_str(if options.generate_methods {
        "- Include interaction methods for elements\n"
    } else {
        "- Only include element locators\n"
    });
    prompt.push_str(if options.include_comments {
        "- Add comments explaining each element\n"
    } else {
        "- Keep comments minimal\n"
    });
    prompt.push_str(if options.smart_naming {
        "- Use intelligent, descriptive names for elements\n"
    } else {
        "- Use simple naming for elements\n"
    });
    prompt.push_str(&format!("- Use the namespace {}\n", options.namespace));
    prompt.push_str("- Ensure proper C# syntax and formatting\n");
    prompt.push_str("- Only return the code, no explanations\n");
    prompt
}
