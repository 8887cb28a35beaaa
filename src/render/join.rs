//! "Join us" page rendered from Markdown.

use maud::{html, Markup, PreEscaped};
use pulldown_cmark::{html as cmark_html, Options, Parser};

use super::page_shell;

const TITLE: &str = "Join Us";

/// What the join resource resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinContent<'a> {
    Markdown(&'a str),
    /// The file does not exist (404).
    Missing,
    /// The file could not be loaded.
    Unavailable,
}

pub fn render_join(content: JoinContent<'_>) -> Markup {
    match content {
        JoinContent::Markdown(source) => page_shell(
            TITLE,
            html! {
                div class="bg-white p-8 rounded-xl shadow-lg prose max-w-none" {
                    (PreEscaped(markdown_to_html(source)))
                }
            },
        ),
        JoinContent::Missing => page_shell(TITLE, html! { p { "No join content found." } }),
        JoinContent::Unavailable => page_shell(
            TITLE,
            html! { p class="text-red-600" { "Error loading content." } },
        ),
    }
}

/// Renders CommonMark (plus tables and strikethrough) to HTML.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut output = String::with_capacity(source.len() * 3 / 2);
    cmark_html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_body() {
        let html = render_join(JoinContent::Markdown(
            "# Openings\n\nWe are **hiring**.\n\n- PhD\n- Postdoc\n\n---\n",
        ))
        .into_string();

        assert!(html.contains("<h1>Openings</h1>"));
        assert!(html.contains("<strong>hiring</strong>"));
        assert!(html.contains("<li>Postdoc</li>"));
        assert!(html.contains("<hr />"));
        assert!(html.contains("Join Us"));
    }

    #[test]
    fn test_missing_and_unavailable() {
        let missing = render_join(JoinContent::Missing).into_string();
        assert!(missing.contains("No join content found."));

        let failed = render_join(JoinContent::Unavailable).into_string();
        assert!(failed.contains("Error loading content."));
        assert!(!failed.contains("No join content found."));
    }
}
