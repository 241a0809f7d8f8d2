use crate::text::collapse_whitespace;

/// Line-oriented builder for generated C# with four-space indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..depth {
                self.buf.push_str("    ");
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// `/// <summary>` block. Each entry stays on one comment line: whitespace
    /// is collapsed, then XML-escaped.
    pub fn summary(&mut self, depth: usize, lines: &[&str]) {
        self.line(depth, "/// <summary>");
        for text in lines {
            self.line(depth, &format!("/// {}", xml_escape(&collapse_whitespace(text))));
        }
        self.line(depth, "/// </summary>");
    }

    /// A documented member: summary, signature, braced body, trailing blank line.
    pub fn method(&mut self, depth: usize, summary: &str, signature: &str, body: &[String]) {
        self.summary(depth, &[summary]);
        self.line(depth, signature);
        self.line(depth, "{");
        for statement in body {
            self.line(depth + 1, statement);
        }
        self.line(depth, "}");
        self.blank();
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

pub fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
