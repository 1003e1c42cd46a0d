use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::Print;

use crate::app::{ReportConfig, Style};

use super::bars::{draw_bar, draw_colored_bar};
use super::layout::{frame_for, Divider};
use super::table::{fit_left, fit_value, normalize_label};
use super::width::{display_width, pad_to_width};

/// Right-hand side of a report row.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Utilization percentage, drawn as a bar at render time.
    Bar(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: FieldValue,
}

impl Field {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn bar(label: impl Into<String>, percent: f64) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Bar(percent),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
}

/// Widest display width among `values`, kept within `[min_width, max_width]`.
pub(crate) fn resolve_width<'a>(
    values: impl IntoIterator<Item = &'a str>,
    min_width: usize,
    max_width: usize,
) -> usize {
    let widest = values.into_iter().map(display_width).max().unwrap_or(0);
    widest.min(max_width).max(min_width)
}

impl Report {
    fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| !section.fields.is_empty())
    }

    fn text_values(&self) -> impl Iterator<Item = &str> {
        let fields = self.sections().flat_map(|section| section.fields.iter());
        std::iter::once(self.title.as_str())
            .chain(self.subtitle.as_deref())
            .chain(fields.filter_map(|field| match &field.value {
                FieldValue::Text(text) => Some(text.as_str()),
                FieldValue::Bar(_) => None,
            }))
    }

    /// Shared data-column width for every row of this report.
    pub(crate) fn layout_width(&self, config: &ReportConfig) -> usize {
        resolve_width(self.text_values(), config.min_data_len, config.max_data_len)
    }

    pub(crate) fn render(&self, config: &ReportConfig) -> Vec<String> {
        let width = self.layout_width(config);
        tracing::debug!(width, style = ?config.style, "resolved layout width");
        match config.style {
            Style::Boxed => self.render_boxed(config, width),
            Style::Plain => self.render_plain(config, width),
        }
    }

    fn render_boxed(&self, config: &ReportConfig, width: usize) -> Vec<String> {
        let frame = frame_for(config.max_label_len, width);
        let graph_width = graph_width(config, width);
        let mut lines = Vec::new();

        lines.extend(frame.header());
        lines.push(frame.title_row(&self.title));
        if let Some(subtitle) = &self.subtitle {
            lines.push(frame.title_row(subtitle));
        }
        lines.push(frame.divider(Divider::Top));

        for (idx, section) in self.sections().enumerate() {
            if idx > 0 {
                lines.push(frame.divider(Divider::Middle));
            }
            tracing::trace!(section = section.name, rows = section.fields.len(), "rendering section");
            for field in &section.fields {
                let label = normalize_label(&field.label, config.max_label_len);
                let value = match &field.value {
                    FieldValue::Text(text) => fit_left(text, width, config.max_data_len),
                    FieldValue::Bar(percent) => {
                        pad_to_width(&bar_glyphs(config, *percent, graph_width), width)
                    }
                };
                lines.push(frame.row(&label, &value));
            }
        }

        lines.push(frame.divider(Divider::Bottom));
        lines
    }

    fn render_plain(&self, config: &ReportConfig, width: usize) -> Vec<String> {
        let graph_width = graph_width(config, width);
        let label_width = config.max_label_len + 1;
        let mut lines = vec![self.title.clone()];
        if let Some(subtitle) = &self.subtitle {
            lines.push(subtitle.clone());
        }

        for section in self.sections() {
            lines.push(String::new());
            for field in &section.fields {
                let tag = if field.label.is_empty() {
                    String::new()
                } else {
                    format!("{}:", field.label)
                };
                let label = normalize_label(&tag, label_width);
                let value = match &field.value {
                    FieldValue::Text(text) => fit_value(text, config.max_data_len),
                    FieldValue::Bar(percent) => bar_glyphs(config, *percent, graph_width),
                };
                lines.push(format!("{label} {value}").trim_end().to_string());
            }
        }
        lines
    }
}

/// Bars leave room for decoration next to them on wide layouts.
fn graph_width(config: &ReportConfig, width: usize) -> usize {
    width.min(config.max_data_len.saturating_sub(3))
}

fn bar_glyphs(config: &ReportConfig, percent: f64, width: usize) -> String {
    if config.color {
        draw_colored_bar(percent, width)
    } else {
        draw_bar(percent, width)
    }
}

pub(crate) fn write_report<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        queue!(out, Print(line), Print('\n'))?;
    }
    out.flush()
}
