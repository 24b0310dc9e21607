//! Markdown-to-terminal rendering for chapter notes and tutor answers.
//!
//! Headings and emphasis map to ANSI styles; fenced code is indented;
//! LaTeX spans ($...$, $$...$$) are left verbatim for the reader.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Render markdown for stdout: styled when attached to a terminal, plain
/// when piped.
pub fn render(input: &str) -> String {
    if std::io::stdout().is_tty() {
        render_markdown(input)
    } else {
        render_plain(input)
    }
}

#[derive(Default)]
struct RenderState {
    heading: bool,
    strong: bool,
    emphasis: bool,
    code_block: bool,
    // One entry per open list; `Some` holds the next ordered-item number.
    lists: Vec<Option<u64>>,
}

impl RenderState {
    fn style(&self, text: &str) -> String {
        if self.code_block {
            return format!("    {}", text.dark_cyan());
        }
        if self.heading {
            return text.bold().underlined().to_string();
        }
        match (self.strong, self.emphasis) {
            (true, _) => text.bold().to_string(),
            (false, true) => text.italic().to_string(),
            (false, false) => text.to_string(),
        }
    }
}

/// Render markdown as styled terminal text.
pub fn render_markdown(input: &str) -> String {
    let mut out = String::new();
    let mut state = RenderState::default();

    for event in Parser::new(input) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                state.heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                state.heading = false;
                out.push_str("\n\n");
            }

            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => out.push_str("\n\n"),

            Event::Start(Tag::Strong) => state.strong = true,
            Event::End(TagEnd::Strong) => state.strong = false,
            Event::Start(Tag::Emphasis) => state.emphasis = true,
            Event::End(TagEnd::Emphasis) => state.emphasis = false,

            Event::Start(Tag::CodeBlock(_)) => {
                state.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                state.code_block = false;
                out.push('\n');
            }

            Event::Start(Tag::List(first)) => state.lists.push(first),
            Event::End(TagEnd::List(_)) => {
                state.lists.pop();
                out.push('\n');
            }
            Event::Start(Tag::Item) => {
                let indent = "  ".repeat(state.lists.len().saturating_sub(1));
                match state.lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{indent}{n}. "));
                        *n += 1;
                    }
                    _ => out.push_str(&format!("{indent}• ")),
                }
            }
            Event::End(TagEnd::Item) => out.push('\n'),

            Event::Text(text) => {
                if state.code_block {
                    for line in text.lines() {
                        out.push_str(&state.style(line));
                        out.push('\n');
                    }
                } else {
                    out.push_str(&state.style(&text));
                }
            }
            Event::Code(code) => out.push_str(&code.as_ref().dark_cyan().to_string()),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("────────────────────────────────\n\n"),

            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Strip-styled variant used where ANSI codes are unwanted (piped output).
pub fn render_plain(input: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(input) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak | Event::End(TagEnd::Paragraph) => out.push('\n'),
            Event::End(TagEnd::Heading(_)) => out.push('\n'),
            Event::End(TagEnd::Item) => out.push('\n'),
            _ => {}
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latex_spans_survive_rendering() {
        let md = "The error is $e = x - x^*$ and\n\n$$e_r = \\frac{x - x^*}{x}$$";
        let rendered = render_plain(md);
        assert!(rendered.contains("$e = x - x^*$"));
        assert!(rendered.contains("$$e_r = \\frac{x - x^*}{x}$$"));
    }

    #[test]
    fn ordered_lists_are_numbered() {
        let md = "1. first\n2. second\n";
        let rendered = render_markdown(md);
        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
    }

    #[test]
    fn bullets_use_dots() {
        let rendered = render_markdown("- alpha\n- beta\n");
        assert!(rendered.contains("• alpha"));
        assert!(rendered.contains("• beta"));
    }
}
