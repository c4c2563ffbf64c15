//! Markdown-to-HTML rendering for report emails.
//!
//! Email clients ignore external stylesheets, so every element carries its
//! presentation inline. The primary path walks pulldown-cmark events; if it
//! fails or produces nothing, a regex-based fallback produces a best-effort
//! approximation rather than failing the pipeline. Output is never validated
//! for well-formedness before embedding in the email body.

use lazy_static::lazy_static;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;
use tracing::warn;

const H1_STYLE: &str = "color:#1a1a2e;font-family:Arial,sans-serif;font-size:24px;margin:24px 0 12px;";
const H2_STYLE: &str = "color:#1a1a2e;font-family:Arial,sans-serif;font-size:20px;margin:20px 0 10px;";
const H3_STYLE: &str = "color:#1a1a2e;font-family:Arial,sans-serif;font-size:16px;margin:16px 0 8px;";
const P_STYLE: &str = "color:#333333;font-family:Arial,sans-serif;font-size:14px;line-height:1.6;margin:0 0 12px;";
const LIST_STYLE: &str = "margin:0 0 12px;padding-left:24px;";
const LI_STYLE: &str = "color:#333333;font-family:Arial,sans-serif;font-size:14px;line-height:1.6;";
const BLOCKQUOTE_STYLE: &str =
    "border-left:4px solid #4ade80;margin:0 0 12px;padding:4px 16px;color:#555555;";
const CODE_STYLE: &str =
    "background:#f4f4f4;font-family:monospace;font-size:13px;padding:2px 4px;border-radius:3px;";

/// Convert a markdown report to inline-styled HTML, never failing.
///
/// The event walk cannot error; "failure" is it producing no output, in
/// which case the regex fallback takes over.
pub fn render_report_html(markdown: &str) -> String {
    let html = primary_convert(markdown);
    if html.trim().is_empty() {
        warn!("Primary markdown conversion produced no output, using fallback");
        return fallback_convert(markdown);
    }
    html
}

fn heading_tag(level: HeadingLevel) -> (&'static str, &'static str) {
    match level {
        HeadingLevel::H1 => ("h1", H1_STYLE),
        HeadingLevel::H2 => ("h2", H2_STYLE),
        _ => ("h3", H3_STYLE),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// pulldown-cmark event walk emitting inline-styled elements.
fn primary_convert(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 2);

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading(level, ..) => {
                    let (name, style) = heading_tag(level);
                    html.push_str(&format!("<{} style=\"{}\">", name, style));
                }
                Tag::Paragraph => html.push_str(&format!("<p style=\"{}\">", P_STYLE)),
                Tag::List(Some(start)) => {
                    html.push_str(&format!("<ol start=\"{}\" style=\"{}\">", start, LIST_STYLE))
                }
                Tag::List(None) => html.push_str(&format!("<ul style=\"{}\">", LIST_STYLE)),
                Tag::Item => html.push_str(&format!("<li style=\"{}\">", LI_STYLE)),
                Tag::Emphasis => html.push_str("<em>"),
                Tag::Strong => html.push_str("<strong>"),
                Tag::BlockQuote => {
                    html.push_str(&format!("<blockquote style=\"{}\">", BLOCKQUOTE_STYLE))
                }
                Tag::CodeBlock(kind) => {
                    let _ = kind; // language hint unused in email output
                    html.push_str(&format!("<pre style=\"{}\"><code>", CODE_STYLE));
                }
                Tag::Link(_, url, _) => html.push_str(&format!("<a href=\"{}\">", url)),
                // Tables, images and footnotes do not occur in report
                // markdown; drop their wrappers, keep their text.
                _ => {}
            },
            Event::End(tag) => match tag {
                Tag::Heading(level, ..) => {
                    let (name, _) = heading_tag(level);
                    html.push_str(&format!("</{}>", name));
                }
                Tag::Paragraph => html.push_str("</p>"),
                Tag::List(Some(_)) => html.push_str("</ol>"),
                Tag::List(None) => html.push_str("</ul>"),
                Tag::Item => html.push_str("</li>"),
                Tag::Emphasis => html.push_str("</em>"),
                Tag::Strong => html.push_str("</strong>"),
                Tag::BlockQuote => html.push_str("</blockquote>"),
                Tag::CodeBlock(CodeBlockKind::Fenced(_)) | Tag::CodeBlock(CodeBlockKind::Indented) => {
                    html.push_str("</code></pre>")
                }
                Tag::Link(..) => html.push_str("</a>"),
                _ => {}
            },
            Event::Text(text) => html.push_str(&escape_html(&text)),
            Event::Code(code) => {
                html.push_str(&format!(
                    "<code style=\"{}\">{}</code>",
                    CODE_STYLE,
                    escape_html(&code)
                ));
            }
            Event::SoftBreak => html.push(' '),
            Event::HardBreak => html.push_str("<br/>"),
            Event::Rule => html.push_str("<hr/>"),
            Event::Html(raw) => html.push_str(&raw),
            _ => {}
        }
    }

    html
}

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid");
}

/// Hand-rolled line-by-line converter: headings, bold, bullets, paragraphs.
/// Best-effort approximation used only when the primary path fails.
pub fn fallback_convert(markdown: &str) -> String {
    let mut html = String::new();
    let mut in_list = false;

    let close_list = |html: &mut String, in_list: &mut bool| {
        if *in_list {
            html.push_str("</ul>");
            *in_list = false;
        }
    };

    for line in markdown.lines() {
        let line = line.trim_end();
        let bolded = BOLD_RE.replace_all(line, "<strong>$1</strong>");
        let bolded = bolded.trim();

        if let Some(rest) = bolded.strip_prefix("### ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h3 style=\"{}\">{}</h3>", H3_STYLE, rest));
        } else if let Some(rest) = bolded.strip_prefix("## ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h2 style=\"{}\">{}</h2>", H2_STYLE, rest));
        } else if let Some(rest) = bolded.strip_prefix("# ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h1 style=\"{}\">{}</h1>", H1_STYLE, rest));
        } else if let Some(rest) = bolded.strip_prefix("- ").or_else(|| bolded.strip_prefix("* ")) {
            if !in_list {
                html.push_str(&format!("<ul style=\"{}\">", LIST_STYLE));
                in_list = true;
            }
            html.push_str(&format!("<li style=\"{}\">{}</li>", LI_STYLE, rest));
        } else if bolded.is_empty() {
            close_list(&mut html, &mut in_list);
        } else {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<p style=\"{}\">{}</p>", P_STYLE, bolded));
        }
    }

    close_list(&mut html, &mut in_list);
    html
}
