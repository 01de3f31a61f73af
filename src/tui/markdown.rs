//! Article body renderer: Markdown → ratatui `Text`.
//!
//! Walks `pulldown_cmark` events and emits styled lines. Covers what
//! long-form posts actually use: headings, emphasis, inline and fenced
//! code (syntect-highlighted when the language is known), lists, quotes,
//! links, images and rules. Raw HTML and tables are dropped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::view::{Render, RenderError};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const RULE_WIDTH: usize = 40;
const TAB: &str = "    ";

/// The renderer handed to the reducer for opening articles.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    pub base_fg: Color,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            base_fg: Color::Reset,
        }
    }
}

impl Render for MarkdownRenderer {
    fn render(&self, content: &str) -> Result<Text<'static>, RenderError> {
        let text = to_text(content, self.base_fg);
        let visible = text
            .lines
            .iter()
            .any(|line| line.spans.iter().any(|s| !s.content.trim().is_empty()));
        if !visible && !content.trim().is_empty() {
            return Err(RenderError::NothingRendered);
        }
        Ok(text)
    }
}

/// Parse Markdown into owned styled text.
pub fn to_text(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

/// Code block state: highlighted, plain, or not in one.
enum Code {
    Off,
    Plain,
    Highlighted(Box<HighlightLines<'static>>),
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Nested inline styles; each entry is already patched onto its parent.
    styles: Vec<Style>,
    /// Prepended to every new line (quote bars, code gutter).
    gutters: Vec<Span<'static>>,
    /// One entry per open list: `None` bullets, `Some(n)` numbers.
    lists: Vec<Option<u64>>,
    code: Code,
    /// Destination of the open link or image, shown after its text.
    pending_url: Option<String>,
    /// A block just ended; the next block starts after a blank line.
    gap: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: Vec::new(),
            gutters: Vec::new(),
            lists: Vec::new(),
            code: Code::Off,
            pending_url: None,
            gap: false,
        }
    }

    fn current_style(&self) -> Style {
        match self.styles.last() {
            Some(style) => *style,
            None => Style::default().fg(self.base_fg),
        }
    }

    fn enter_style(&mut self, overlay: Style) {
        let style = self.current_style().patch(overlay);
        self.styles.push(style);
    }

    fn leave_style(&mut self) {
        self.styles.pop();
    }

    fn new_line(&mut self, line: Line<'static>) {
        let mut spans = self.gutters.clone();
        spans.extend(line.spans);
        self.text.lines.push(Line::from(spans));
    }

    fn append(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.new_line(Line::from(span)),
        }
    }

    fn start_block(&mut self) {
        if self.gap {
            self.new_line(Line::default());
            self.gap = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.append(Span::styled(
                c.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(Line::default()),
            Event::Rule => {
                self.start_block();
                self.new_line(Line::from(Span::styled("─".repeat(RULE_WIDTH), muted())));
                self.gap = true;
            }
            Event::TaskListMarker(done) => {
                self.append(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.start_block();
                self.new_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = heading_style(self.base_fg, level);
                let hashes = "#".repeat(level as usize);
                self.new_line(Line::from(Span::styled(format!("{hashes} "), style)));
                self.enter_style(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.gutters.push(Span::styled("│ ", muted()));
                self.enter_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => self.open_code(kind),
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line(Line::default());
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    Some(None) => format!("{indent}- "),
                    None => return,
                };
                self.append(Span::styled(marker, muted()));
            }
            Tag::Emphasis => self.enter_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.enter_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.enter_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.pending_url = Some(dest_url.to_string());
                self.enter_style(link_style());
            }
            Tag::Image { dest_url, .. } => {
                self.pending_url = Some(dest_url.to_string());
                self.append(Span::styled("[image: ", muted()));
                self.enter_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            _ => {}
        }
    }

    fn open_code(&mut self, kind: CodeBlockKind<'_>) {
        if !self.text.lines.is_empty() {
            self.new_line(Line::default());
        }
        self.gap = false;
        let lang = match &kind {
            CodeBlockKind::Fenced(lang) => lang.split_whitespace().next().unwrap_or(""),
            CodeBlockKind::Indented => "",
        };

        let header = if lang.is_empty() {
            Line::from(Span::styled("╭──", muted()))
        } else {
            Line::from(vec![
                Span::styled("╭── ", muted()),
                Span::styled(lang.to_owned(), muted().add_modifier(Modifier::BOLD)),
                Span::styled(" ──", muted()),
            ])
        };
        self.new_line(header);
        self.gutters.push(Span::styled("│ ", muted()));

        let syntax = (!lang.is_empty())
            .then(|| SYNTAX_SET.find_syntax_by_token(lang))
            .flatten();
        self.code = match (syntax, THEME_SET.themes.get(CODE_THEME)) {
            (Some(syntax), Some(theme)) => {
                Code::Highlighted(Box::new(HighlightLines::new(syntax, theme)))
            }
            _ => Code::Plain,
        };
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) => {
                self.leave_style();
                self.gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutters.pop();
                self.leave_style();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = Code::Off;
                self.gutters.pop();
                self.new_line(Line::from(Span::styled("╰──", muted())));
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.leave_style(),
            TagEnd::Link => {
                self.leave_style();
                self.flush_url();
            }
            TagEnd::Image => {
                self.leave_style();
                self.append(Span::styled("]", muted()));
                self.flush_url();
            }
            _ => {}
        }
    }

    fn flush_url(&mut self) {
        if let Some(url) = self.pending_url.take() {
            self.append(Span::raw(" ("));
            self.append(Span::styled(url, link_style()));
            self.append(Span::raw(")"));
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui draws '\t' with zero width
        let text = cow.replace('\t', TAB);

        match &mut self.code {
            Code::Highlighted(highlighter) => {
                let mut lines = Vec::new();
                for source in LinesWithEndings::from(&text) {
                    let Ok(ranges) = highlighter.highlight_line(source, &SYNTAX_SET) else {
                        continue;
                    };
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(style, fragment)| {
                            let fragment = fragment.trim_end_matches('\n');
                            (!fragment.is_empty()).then(|| {
                                let fg = style.foreground;
                                Span::styled(
                                    fragment.to_owned(),
                                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                                )
                            })
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
                for line in lines {
                    self.new_line(line);
                }
            }
            Code::Plain => {
                for source in text.lines() {
                    self.new_line(Line::from(Span::styled(
                        source.to_owned(),
                        Style::default().fg(Color::White),
                    )));
                }
            }
            Code::Off => {
                let style = self.current_style();
                self.append(Span::styled(text, style));
            }
        }
    }
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    let style = Style::default().fg(base_fg).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.add_modifier(Modifier::ITALIC),
    }
}
