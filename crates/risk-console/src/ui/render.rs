use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, List, ListItem, Paragraph, Wrap};

use crate::app::{AppState, ViewMode};

use super::format::{
    format_elapsed, format_record_details, format_record_output, format_timestamp,
    record_summary,
};
use super::text::wrap_text_lines;
use super::theme::{Theme, ValueStyle};

const QUIT_HINT: &str = "press Q again to quit / Esc to cancel  ";

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    if app.view_mode == ViewMode::DetailFullscreen {
        draw_detail_fullscreen(frame, app);
        return;
    }

    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    frame.render_widget(header(&theme, app), chunks[0]);

    let list_title = format!("Borrowers ({})", app.risks.len());
    let list_block = theme.block(&list_title);
    let item_width = list_block.inner(body[0]).width.saturating_sub(3) as usize;
    let items = if app.risks.is_empty() {
        vec![ListItem::new(Line::styled(
            "no borrowers loaded",
            theme.value_style(ValueStyle::Dim),
        ))]
    } else {
        app.risks
            .iter()
            .enumerate()
            .map(|(index, risk)| ListItem::new(Line::from(record_summary(risk, index, item_width))))
            .collect::<Vec<_>>()
    };
    let list = List::new(items)
        .block(list_block)
        .style(theme.value_style(ValueStyle::Normal))
        .highlight_style(theme.highlight_style())
        .highlight_symbol(">> ");
    frame.render_stateful_widget(list, body[0], &mut app.list_state);

    let detail_block = theme.block("Details");
    let detail_inner = detail_block.inner(body[1]);
    let details = app
        .selected_risk()
        .map(|risk| format_record_details(&theme, risk, detail_inner.width))
        .unwrap_or_else(|| Text::from("no record selected"));
    let detail_widget = Paragraph::new(details)
        .block(detail_block)
        .style(theme.value_style(ValueStyle::Normal))
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, body[1]);
    frame.render_widget(detail_widget, body[1]);

    frame.render_widget(status_line(&theme, app), chunks[2]);

    let mut footer_spans = vec![Span::styled(
        "R=run risk job  I=init risk  ↑/↓=select  Enter=full  Q=quit  ",
        theme.help_style(),
    )];
    if app.confirm_quit {
        footer_spans.push(Span::styled(QUIT_HINT, theme.warn_style()));
    }
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.block("Controls"));
    frame.render_widget(footer, chunks[3]);
}

fn header<'a>(theme: &Theme, app: &'a AppState) -> Paragraph<'a> {
    let mut spans = vec![
        Span::styled("API: ", theme.key_style()),
        Span::styled(app.api_url.as_str(), theme.value_style(ValueStyle::Important)),
    ];
    match app.in_flight {
        Some((action, started)) if app.loading => {
            spans.push(Span::styled("  Status: ", theme.key_style()));
            spans.push(Span::styled(
                format!("{} … {}", action.label(), format_elapsed(started.elapsed())),
                theme.accent_style(),
            ));
        }
        _ => {
            spans.push(Span::styled("  Status: ", theme.key_style()));
            spans.push(Span::styled("idle", theme.value_style(ValueStyle::Dim)));
        }
    }
    if let Some(at) = app.last_completed {
        spans.push(Span::styled("  Last update: ", theme.key_style()));
        spans.push(Span::styled(
            format_timestamp(at),
            theme.value_style(ValueStyle::Normal),
        ));
    }
    Paragraph::new(Line::from(spans)).block(theme.block("Risk Job"))
}

fn status_line<'a>(theme: &Theme, app: &'a AppState) -> Paragraph<'a> {
    let line = if app.loading {
        Line::styled("Loading...", theme.accent_style())
    } else if let Some(error) = app.error.as_deref() {
        Line::styled(error, theme.error_style())
    } else if let Some(message) = app.message.as_deref() {
        Line::styled(message, theme.ok_style())
    } else {
        Line::styled(
            "press R to run the risk job",
            theme.value_style(ValueStyle::Dim),
        )
    };
    Paragraph::new(line)
        .block(theme.block("Status"))
        .wrap(Wrap { trim: true })
}

fn draw_detail_fullscreen(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.area());

    let detail_text = app
        .selected_risk()
        .map(format_record_output)
        .unwrap_or_else(|| "no record selected".to_string());

    let detail_block = theme.block("Record (fullscreen)");
    let inner = detail_block.inner(chunks[0]);
    let wrapped = wrap_text_lines(&detail_text, inner.width.max(1) as usize);
    app.set_detail_metrics(wrapped.len(), inner.height);
    let rendered = wrapped.join("\n");

    let detail_panel = Paragraph::new(rendered)
        .block(detail_block)
        .style(theme.value_style(ValueStyle::Normal))
        .scroll((app.detail_scroll as u16, 0));
    frame.render_widget(detail_panel, chunks[0]);

    let mut footer_spans = vec![Span::styled(
        "j/k=scroll  gg/G=top/bottom  PgUp/PgDn=page  Enter/Esc=back  Q=quit  ",
        theme.help_style(),
    )];
    if app.confirm_quit {
        footer_spans.push(Span::styled(QUIT_HINT, theme.warn_style()));
    }
    footer_spans.push(Span::styled(
        format!(
            "line {}/{}",
            app.detail_scroll.saturating_add(1),
            app.detail_total_lines
        ),
        theme.accent_style(),
    ));
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.block("Controls"));
    frame.render_widget(footer, chunks[1]);
}
