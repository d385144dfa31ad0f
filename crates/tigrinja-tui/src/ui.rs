use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::App;
use tigrinja_core::bindings::reply_option_element;
use tigrinja_core::{BindingTarget, ChatMessage, ChatRole, FormattedBlock, Inline, RichText, TranscriptNode};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spans for label text that may contain `<strong>` markup (the welcome message).
/// Any other tag is dropped.
fn parse_markup_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut bold = false;
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        if start > 0 {
            spans.push(styled_run(&rest[..start], bold));
        }
        match &rest[start + 1..start + len] {
            "strong" | "b" => bold = true,
            "/strong" | "/b" => bold = false,
            _ => {}
        }
        rest = &rest[start + len + 1..];
    }

    if !rest.is_empty() {
        spans.push(styled_run(rest, bold));
    }

    Line::from(spans)
}

fn styled_run(text: &str, bold: bool) -> Span<'static> {
    if bold {
        Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(text.to_string())
    }
}

fn rich_spans(text: &RichText) -> Vec<Span<'static>> {
    text.spans
        .iter()
        .map(|span| match span {
            Inline::Text(t) => Span::raw(t.clone()),
            Inline::Strong(t) => Span::styled(t.clone(), Style::default().add_modifier(Modifier::BOLD)),
        })
        .collect()
}

fn block_lines(block: &FormattedBlock) -> Vec<Line<'static>> {
    match block {
        FormattedBlock::Heading { title, body } => {
            let mut lines = vec![Line::from(Span::styled(
                title.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))];
            if let Some(body) = body {
                lines.push(Line::from(rich_spans(body)));
            }
            lines
        }
        FormattedBlock::Paragraph(text) => vec![Line::from(rich_spans(text))],
        FormattedBlock::List(items) => items
            .iter()
            .map(|item| {
                let mut spans = vec![Span::styled("  • ", Style::default().fg(Color::DarkGray))];
                spans.extend(rich_spans(item));
                Line::from(spans)
            })
            .collect(),
    }
}

fn message_lines(msg: &ChatMessage) -> Vec<Line<'static>> {
    match msg.role {
        // User text is shown verbatim, line by line
        ChatRole::User => msg
            .raw_text
            .lines()
            .map(|line| {
                Line::from(vec![
                    Span::styled("› ", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(line.to_string(), Style::default().fg(Color::Cyan)),
                ])
            })
            .collect(),
        ChatRole::Assistant => msg.blocks.iter().flat_map(block_lines).collect(),
    }
}

/// Estimated rows a line occupies once wrapped to `width`.
fn wrapped_rows(line: &Line, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let w = line.width();
    if w == 0 {
        1
    } else {
        w.div_ceil(width)
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, selectors, chat, input, footer
    let [header_area, selector_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_selectors(app, frame, selector_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.labels.text("main-title")),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(app.labels.text("subtitle").to_string(), Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_selectors(app: &App, frame: &mut Frame, area: Rect) {
    let reply = app.session.reply_language();
    let reply_label = app
        .labels
        .get(&reply_option_element(reply), BindingTarget::OptionLabel)
        .unwrap_or(reply.display_name());

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(app.labels.text("reply-in-label").to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(format!("[{}]", reply_label), Style::default().fg(Color::Yellow).bold()),
        Span::raw("  "),
        Span::styled("UI", Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", app.session.ui_language().native_name()),
            Style::default().fg(Color::Magenta).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            app.labels.text("auto-detect-info").to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    app.chat_area = Some(inner);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(welcome) = app.labels.get("welcome-message", BindingTarget::Markup) {
        lines.push(parse_markup_line(welcome));
        lines.push(Line::default());
    }

    // First line of each transcript node, for message-wise scrolling
    let mut node_starts = Vec::new();
    let transcript = &app.session.transcript;

    for node in transcript.nodes() {
        node_starts.push(lines.len());
        match node {
            TranscriptNode::Message(msg) => lines.extend(message_lines(msg)),
            TranscriptNode::Thinking { label } => {
                let frame_idx = app.animation_frame as usize % SPINNER.len();
                lines.push(Line::from(vec![
                    Span::styled(format!("{} ", SPINNER[frame_idx]), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        label.clone(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    ),
                ]));
            }
        }
        lines.push(Line::default());
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let rows_before = |line_idx: usize| -> usize {
        lines[..line_idx].iter().map(|l| wrapped_rows(l, width)).sum()
    };

    let scroll = if transcript.is_at_latest() {
        rows_before(lines.len()).saturating_sub(height)
    } else {
        node_starts
            .get(transcript.scroll_top())
            .map(|&start| rows_before(start))
            .unwrap_or(0)
    };

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let border_color = if app.is_busy() { Color::DarkGray } else { Color::Yellow };

    let title = app
        .labels
        .get("send-btn", BindingTarget::Title)
        .unwrap_or_default();
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;

    // Horizontal scroll keeps the cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.session.input.is_empty() {
        let placeholder = app
            .labels
            .get("message-input", BindingTarget::Placeholder)
            .unwrap_or_default();
        Paragraph::new(placeholder.to_string()).style(Style::default().fg(Color::DarkGray))
    } else {
        let visible_text: String = app
            .session
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    let cursor_x = (cursor_pos - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let translate_label = app
        .labels
        .get("translate-btn", BindingTarget::Title)
        .unwrap_or(app.labels.text("translate-btn"));

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(format!(" {} ", app.labels.text("send-btn")), label_style),
        Span::styled(" Ctrl+T ", key_style),
        Span::styled(format!(" {} ", translate_label), label_style),
        Span::styled(" F2 ", key_style),
        Span::styled(" UI ", label_style),
        Span::styled(" F3 ", key_style),
        Span::styled(format!(" {} ", app.labels.text("reply-in-label").trim_end_matches(':')), label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" ↕ ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" ✕ ", label_style),
    ];

    if let Some(status) = &app.status {
        hints.push(Span::raw(" "));
        hints.push(Span::styled(status.clone(), Style::default().fg(Color::Red)));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
