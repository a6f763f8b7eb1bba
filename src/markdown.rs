//! Markdown Rendering
//!
//! GitHub-flavored markdown for update content, deliverable descriptions
//! and research documents:
//! - Tables, strikethrough and task lists
//! - Syntax highlighting (syntect)
//! - Raw HTML in the source is shown as text, never injected

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

const THEME: &str = "InspiredGitHub";

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get(THEME)
}

/// Render markdown to an HTML string
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, gfm_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn gfm_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Link { dest_url, .. }) if is_external(&dest_url) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                        escape_html(&dest_url)
                    ))));
                }
                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }

    events
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let plain = || format!("<pre><code>{}</code></pre>", escape_html(code));

    let Some(theme) = get_theme() else {
        return plain();
    };
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    highlighted_html_for_string(code, ss, syntax, theme).unwrap_or_else(|_| plain())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_and_tasklists() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_external_links_open_in_new_tab() {
        let html = render_markdown("[site](https://example.com)");
        assert!(html.contains(r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#));

        let local = render_markdown("[page](/metrics)");
        assert!(local.contains(r#"<a href="/metrics">"#));
    }

    #[test]
    fn test_code_block_is_highlighted() {
        let html = render_markdown("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }
}
