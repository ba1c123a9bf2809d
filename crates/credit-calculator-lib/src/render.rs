//! Report documents.
//!
//! A [`ReportSnapshot`] is first turned into a display-independent
//! [`Document`] of blocks, which a [`Renderer`] then writes out as HTML or
//! plain text. Rendering is pure: the same snapshot always produces the same
//! bytes.

use crate::format::{capitalize, format_cost, format_number, format_plain};
use crate::report::ReportSnapshot;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCell {
    pub label: String,
    pub value: String,
}

/// An itemized line of the report, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub name: String,
    pub total: String,
    pub volume: String,
    pub frequency: String,
    pub multiplier: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Summary {
        heading: String,
        cells: Vec<SummaryCell>,
    },
    Items {
        heading: String,
        records: Vec<ItemRecord>,
        empty_note: String,
    },
    Footer(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub generated: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn from_snapshot(snapshot: &ReportSnapshot) -> Self {
        let unit_label = snapshot.unit_label();
        let unit_title = capitalize(unit_label);
        let totals = snapshot.totals();
        let generated_at = snapshot.generated_at();

        let cells = vec![
            SummaryCell {
                label: format!("Annual {}", unit_title),
                value: format_number(totals.total_annual_units()),
            },
            SummaryCell {
                label: format!("Monthly {}", unit_title),
                value: format_number(totals.total_monthly_units()),
            },
            SummaryCell {
                label: format!("Daily {}", unit_title),
                value: format_number(totals.total_daily_units()),
            },
            SummaryCell {
                label: "Estimated Annual Cost".to_string(),
                value: format_cost(totals.estimated_cost(), snapshot.currency_symbol()),
            },
        ];

        let records = snapshot
            .lines()
            .iter()
            .map(|line| ItemRecord {
                name: line.name().to_string(),
                total: format!("{} {}", format_number(line.total_units()), unit_label),
                volume: format!("{} {}", format_number(line.volume()), line.unit()),
                frequency: line.frequency().key().to_string(),
                multiplier: format_plain(line.multiplier()),
            })
            .collect();

        Self {
            title: snapshot.title().to_string(),
            generated: format!(
                "Generated on {} at {} UTC",
                generated_at.format("%-m/%-d/%Y"),
                generated_at.format("%-I:%M:%S %p")
            ),
            blocks: vec![
                Block::Summary {
                    heading: format!("{} Usage Summary", capitalize(singular(unit_label))),
                    cells,
                },
                Block::Items {
                    heading: "Service Details".to_string(),
                    records,
                    empty_note: "No usage entered.".to_string(),
                },
                Block::Footer(snapshot.footer().to_vec()),
            ],
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.blocks.iter().flat_map(|block| match block {
            Block::Items { records, .. } => records.as_slice(),
            _ => &[][..],
        })
    }
}

fn singular(label: &str) -> &str {
    label.strip_suffix('s').unwrap_or(label)
}

pub trait Renderer {
    fn render(&self, document: &Document) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", document.title);
        let _ = writeln!(out, "{}", "=".repeat(document.title.chars().count()));
        let _ = writeln!(out, "{}", document.generated);

        for block in &document.blocks {
            out.push('\n');
            match block {
                Block::Summary { heading, cells } => {
                    write_heading(&mut out, heading);
                    let width = cells
                        .iter()
                        .map(|cell| cell.label.chars().count())
                        .max()
                        .unwrap_or(0);
                    for cell in cells {
                        let _ = writeln!(
                            out,
                            "{:<width$}  {}",
                            format!("{}:", cell.label),
                            cell.value,
                            width = width + 1
                        );
                    }
                }
                Block::Items {
                    heading,
                    records,
                    empty_note,
                } => {
                    write_heading(&mut out, heading);
                    if records.is_empty() {
                        let _ = writeln!(out, "{}", empty_note);
                    }
                    for record in records {
                        let _ = writeln!(out, "- {}: {}", record.name, record.total);
                        let _ = writeln!(
                            out,
                            "    Volume: {} | Frequency: {} | Multiplier: {}",
                            record.volume, record.frequency, record.multiplier
                        );
                    }
                }
                Block::Footer(lines) => {
                    for line in lines {
                        let _ = writeln!(out, "{}", line);
                    }
                }
            }
        }

        out
    }
}

fn write_heading(out: &mut String, heading: &str) {
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", "-".repeat(heading.chars().count()));
}

const REPORT_STYLE: &str = r#"    @media print {
      @page { margin: 1in; }
      .summary-grid { grid-template-columns: 1fr; }
      .service-details { grid-template-columns: 1fr; }
    }
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }
    .header { text-align: center; border-bottom: 2px solid #0176d3; padding-bottom: 20px; margin-bottom: 30px; }
    .header h1 { color: #0176d3; margin: 0; font-size: 24px; }
    .header p { margin: 5px 0; color: #666; }
    .summary { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
    .summary h2, .services h2 { color: #0176d3; margin-top: 0; }
    .summary-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin-top: 15px; }
    .summary-item { text-align: center; padding: 15px; background: white; border-radius: 6px; border: 1px solid #ddd; }
    .summary-item .label { font-size: 12px; color: #666; text-transform: uppercase; margin-bottom: 5px; }
    .summary-item .value { font-size: 18px; font-weight: bold; color: #0176d3; }
    .service-item { border: 1px solid #ddd; border-radius: 6px; padding: 15px; margin-bottom: 15px; }
    .service-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px; }
    .service-name, .service-credits { font-weight: bold; font-size: 16px; }
    .service-credits { color: #0176d3; }
    .service-details { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 10px; font-size: 14px; color: #666; }
    .footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; font-size: 12px; }
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        let title = escape_html(&document.title);

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("  <meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "  <title>{}</title>", title);
        let _ = write!(out, "  <style>\n{}  </style>\n", REPORT_STYLE);
        out.push_str("</head>\n<body>\n");

        out.push_str("  <div class=\"header\">\n");
        let _ = writeln!(out, "    <h1>{}</h1>", title);
        let _ = writeln!(out, "    <p>{}</p>", escape_html(&document.generated));
        out.push_str("  </div>\n");

        for block in &document.blocks {
            match block {
                Block::Summary { heading, cells } => {
                    out.push_str("  <div class=\"summary\">\n");
                    let _ = writeln!(out, "    <h2>{}</h2>", escape_html(heading));
                    out.push_str("    <div class=\"summary-grid\">\n");
                    for cell in cells {
                        out.push_str("      <div class=\"summary-item\">\n");
                        let _ = writeln!(out, "        <div class=\"label\">{}</div>", escape_html(&cell.label));
                        let _ = writeln!(out, "        <div class=\"value\">{}</div>", escape_html(&cell.value));
                        out.push_str("      </div>\n");
                    }
                    out.push_str("    </div>\n  </div>\n");
                }
                Block::Items {
                    heading,
                    records,
                    empty_note,
                } => {
                    out.push_str("  <div class=\"services\">\n");
                    let _ = writeln!(out, "    <h2>{}</h2>", escape_html(heading));
                    if records.is_empty() {
                        let _ = writeln!(out, "    <p>{}</p>", escape_html(empty_note));
                    }
                    for record in records {
                        out.push_str("    <div class=\"service-item\">\n");
                        out.push_str("      <div class=\"service-header\">\n");
                        let _ = writeln!(out, "        <div class=\"service-name\">{}</div>", escape_html(&record.name));
                        let _ = writeln!(out, "        <div class=\"service-credits\">{}</div>", escape_html(&record.total));
                        out.push_str("      </div>\n");
                        out.push_str("      <div class=\"service-details\">\n");
                        let _ = writeln!(out, "        <div><strong>Volume:</strong> {}</div>", escape_html(&record.volume));
                        let _ = writeln!(out, "        <div><strong>Frequency:</strong> {}</div>", escape_html(&record.frequency));
                        let _ = writeln!(out, "        <div><strong>Multiplier:</strong> {}</div>", escape_html(&record.multiplier));
                        out.push_str("      </div>\n    </div>\n");
                    }
                    out.push_str("  </div>\n");
                }
                Block::Footer(lines) => {
                    out.push_str("  <div class=\"footer\">\n");
                    for line in lines {
                        let _ = writeln!(out, "    <p>{}</p>", escape_html(line));
                    }
                    out.push_str("  </div>\n");
                }
            }
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected html, text or json)", other)),
        }
    }
}

/// Renders a snapshot in the requested format.
pub fn render_document(snapshot: &ReportSnapshot, format: ReportFormat) -> String {
    match format {
        ReportFormat::Html => HtmlRenderer.render(&Document::from_snapshot(snapshot)),
        ReportFormat::Text => TextRenderer.render(&Document::from_snapshot(snapshot)),
        ReportFormat::Json => match serde_json::to_string_pretty(snapshot) {
            Ok(json) => json + "\n",
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize report snapshot");
                "{}\n".to_string()
            }
        },
    }
}
