use ratatui::text::{Line, Span, Text};
use risk_protocol::{scalar_text, BorrowerRisk};
use serde_json::Value;
use std::time::{Duration, SystemTime};

use super::text::{display_width, sanitize_text_for_tui, truncate_with_ellipsis, wrap_text_lines};
use super::theme::{Theme, ValueStyle};

const SUMMARY_FIELDS: usize = 3;

/// One-line list entry: the record's label (or its position) followed by the
/// first few scalar fields.
pub(super) fn record_summary(risk: &BorrowerRisk, index: usize, width: usize) -> String {
    let label = risk.label().unwrap_or_else(|| format!("#{}", index + 1));
    let extras = risk
        .fields()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
        .filter(|(_, text)| *text != label)
        .take(SUMMARY_FIELDS)
        .map(|(key, text)| format!("{key}={text}"))
        .collect::<Vec<_>>();
    let line = if extras.is_empty() {
        label
    } else {
        format!("{label}  {}", extras.join("  "))
    };
    truncate_with_ellipsis(&sanitize_text_for_tui(&line).replace('\n', " "), width)
}

pub(super) fn format_record_details(theme: &Theme, risk: &BorrowerRisk, width: u16) -> Text<'static> {
    if risk.is_empty() {
        return Text::from("record has no fields");
    }
    let label = risk.label();
    let mut lines = Vec::new();
    for (key, value) in risk.fields() {
        let level = match value {
            Value::Null => ValueStyle::Dim,
            Value::Array(_) | Value::Object(_) => ValueStyle::Normal,
            _ if label.is_some() && label == scalar_text(value) => ValueStyle::Important,
            _ => ValueStyle::Normal,
        };
        lines.extend(kv_lines(theme, key, field_text(value), level, width));
    }
    Text::from(lines)
}

pub(super) fn format_record_output(risk: &BorrowerRisk) -> String {
    serde_json::to_string_pretty(risk).unwrap_or_else(|err| format!("unprintable record: {err}"))
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        _ => scalar_text(value).unwrap_or_default(),
    }
}

fn kv_lines(
    theme: &Theme,
    key: &str,
    value: String,
    level: ValueStyle,
    width: u16,
) -> Vec<Line<'static>> {
    let value = sanitize_text_for_tui(&value);
    let key_label = format!("{key}: ");
    let key_width = display_width(&key_label);
    let width = width.max(1) as usize;
    let value_width = width.saturating_sub(key_width).max(1);
    let wrapped = wrap_text_lines(&value, value_width);
    let mut lines = Vec::with_capacity(wrapped.len().max(1));
    let indent = " ".repeat(key_width);
    for (idx, segment) in wrapped.into_iter().enumerate() {
        let lead = if idx == 0 {
            key_label.clone()
        } else {
            indent.clone()
        };
        lines.push(Line::from(vec![
            Span::styled(lead, theme.key_style()),
            Span::styled(segment, theme.value_style(level)),
        ]));
    }
    lines
}

pub(super) fn format_elapsed(elapsed: Duration) -> String {
    humantime::format_duration(Duration::from_secs(elapsed.as_secs())).to_string()
}

pub(super) fn format_timestamp(at: SystemTime) -> String {
    humantime::format_rfc3339_seconds(at).to_string()
}
