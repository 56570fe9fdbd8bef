//! Markdown to styled terminal text.
//!
//! Parses with `pulldown-cmark` and walks the event stream, keeping a
//! stack of active styles. Headings, emphasis, code, quotes and lists are
//! drawn with terminal attributes instead of their Markdown punctuation.

use crossterm::style::{Attribute, Color, ContentStyle, Stylize};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy)]
enum Modifier {
    Attr(Attribute),
    Fg(Color),
}

use Modifier::{Attr, Fg};

const TITLE: &[Modifier] = &[Attr(Attribute::Bold), Attr(Attribute::Underlined), Fg(Color::Cyan)];
const SUBTITLE: &[Modifier] = &[Attr(Attribute::Bold), Fg(Color::Cyan)];
const HEADING: &[Modifier] = &[Attr(Attribute::Bold)];
const EMPHASIS: &[Modifier] = &[Attr(Attribute::Italic)];
const STRONG: &[Modifier] = &[Attr(Attribute::Bold)];
const STRIKETHROUGH: &[Modifier] = &[Attr(Attribute::CrossedOut)];
const CODE: &[Modifier] = &[Fg(Color::Yellow)];
const CODE_BLOCK: &[Modifier] = &[Fg(Color::Green)];
const QUOTE: &[Modifier] = &[Attr(Attribute::Italic)];
const LINK: &[Modifier] = &[Attr(Attribute::Underlined), Fg(Color::Blue)];

/// Renders `source` as styled lines, without a trailing newline.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::new();
    for event in Parser::new_ext(source, options) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Link {
    dest: String,
    text: String,
}

struct Renderer {
    out: String,
    styles: Vec<&'static [Modifier]>,
    /// Next number for ordered lists, `None` for bullets
    lists: Vec<Option<u64>>,
    links: Vec<Link>,
    quote_depth: usize,
    in_code_block: bool,
    at_line_start: bool,
    after_marker: bool,
}

impl Renderer {
    fn new() -> Self {
        Self {
            out: String::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            links: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            at_line_start: true,
            after_marker: false,
        }
    }

    fn finish(mut self) -> String {
        self.end_line();
        self.out.trim_end_matches('\n').to_string()
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => self.text(&text),
            Event::Code(code) => {
                self.styles.push(CODE);
                self.text(&code);
                self.styles.pop();
            }
            Event::SoftBreak | Event::HardBreak => self.break_line(),
            Event::Rule => {
                self.gap();
                self.open_line(self.lists.len());
                self.out.push_str(&"─".repeat(RULE_WIDTH).dim().to_string());
                self.end_line();
            }
            Event::TaskListMarker(checked) => {
                self.out.push_str(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.gap();
                } else if !self.after_marker {
                    self.end_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.gap();
                self.styles.push(match level {
                    HeadingLevel::H1 => TITLE,
                    HeadingLevel::H2 => SUBTITLE,
                    _ => HEADING,
                });
            }
            Tag::Emphasis => self.styles.push(EMPHASIS),
            Tag::Strong => self.styles.push(STRONG),
            Tag::Strikethrough => self.styles.push(STRIKETHROUGH),
            Tag::CodeBlock(_) => {
                self.gap();
                self.in_code_block = true;
                self.styles.push(CODE_BLOCK);
            }
            Tag::BlockQuote(_) => {
                self.gap();
                self.quote_depth += 1;
                self.styles.push(QUOTE);
            }
            Tag::Link { dest_url, .. } => {
                self.styles.push(LINK);
                self.links.push(Link {
                    dest: dest_url.to_string(),
                    text: String::new(),
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.gap();
                } else {
                    self.end_line();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.end_line();
                self.open_line(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.out.push_str(&marker);
                self.after_marker = true;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.end_line(),
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.end_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::CodeBlock => {
                self.styles.pop();
                self.in_code_block = false;
                self.end_line();
            }
            TagEnd::BlockQuote(_) => {
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.end_line();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(link) = self.links.pop() {
                    if !link.dest.is_empty() && link.dest != link.text {
                        self.out
                            .push_str(&format!(" ({})", link.dest).dim().to_string());
                    }
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.end_line();
            }
            TagEnd::Item => self.end_line(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        for link in &mut self.links {
            link.text.push_str(text);
        }
        for (idx, piece) in text.split('\n').enumerate() {
            if idx > 0 {
                self.break_line();
            }
            if piece.is_empty() {
                continue;
            }
            self.open_line(self.lists.len());
            let styled = self.styled(piece);
            self.out.push_str(&styled);
            self.after_marker = false;
        }
    }

    fn styled(&self, text: &str) -> String {
        if self.styles.is_empty() {
            return text.to_string();
        }
        let style = self
            .styles
            .iter()
            .flat_map(|layer| layer.iter())
            .fold(ContentStyle::new(), |style, modifier| match *modifier {
                Attr(attr) => style.attribute(attr),
                Fg(color) => style.with(color),
            });
        style.apply(text).to_string()
    }

    /// Writes the quote bars and indentation when a line begins.
    fn open_line(&mut self, depth: usize) {
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        for _ in 0..self.quote_depth {
            self.out.push_str(&"│ ".dim().to_string());
        }
        self.out.push_str(&"  ".repeat(depth));
        if self.in_code_block {
            self.out.push_str("    ");
        }
    }

    fn end_line(&mut self) {
        if !self.at_line_start {
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    /// Line break inside a block; code blocks keep their blank lines.
    fn break_line(&mut self) {
        if self.in_code_block {
            self.out.push('\n');
            self.at_line_start = true;
        } else {
            self.end_line();
        }
    }

    /// Separates top-level blocks with one blank line.
    fn gap(&mut self) {
        self.end_line();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}
