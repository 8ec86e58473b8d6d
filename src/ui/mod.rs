//! Terminal rendering for the ranking dashboard.
//!
//! Renderers return strings so callers decide where output goes; `colored`
//! switches ANSI styling on or off (off for pipes and tests).

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;

use crate::aggregate::FieldFilter;
use crate::dashboard::{ChartBar, ChartPage, FieldSelection, InstitutionDetail, PageLink, Pagination};
use crate::models::{ContributionReport, ContributionRow};
use crate::utils::{
    display_width, format_contribution, format_percent, ranking_table_columns, render_bar,
    truncate_at_word, truncate_with_ellipsis,
};

/// Shown wherever a ranking has no rows
pub const EMPTY_STATE: &str = "No data to display";

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Print a styled status message.
#[macro_export]
macro_rules! print_status {
    ($status:expr, $msg:expr) => {{
        use owo_colors::OwoColorize;
        use $crate::ui::{status_icon, Status};
        let icon = status_icon($status);
        match $status {
            Status::Success => println!("{} {}", icon.green().bold(), $msg),
            Status::Error => eprintln!("{} {}", icon.red().bold(), $msg),
            Status::Warning => eprintln!("{} {}", icon.yellow().bold(), $msg),
            Status::Info => println!("{} {}", icon.cyan().bold(), $msg),
        }
    }};
}

/// Section header line.
pub fn section(title: &str, colored: bool) -> String {
    let line = format!("━━━ {} ━━━", title);
    if colored {
        line.bold().cyan().to_string()
    } else {
        line
    }
}

/// Print a section header.
pub fn print_section(title: &str, colored: bool) {
    println!();
    println!("{}", section(title, colored));
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One-line description of a report and the filter that produced it
pub fn summary(report: &ContributionReport, filter: &FieldFilter) -> String {
    let scope = match filter {
        FieldFilter::All => "all papers".to_string(),
        FieldFilter::Only(fields) => format!("{} selected fields", fields.len()),
    };
    format!(
        "{} institutions from {} papers ({} excluded, {})",
        format_number(report.ranking.len()),
        format_number(report.included_papers),
        format_number(report.excluded_papers),
        scope
    )
}

/// Number of fields and institutions named in the sample lines
pub const SAMPLE_SIZE: usize = 6;

/// Sample lines listing the first fields and the leading institutions
pub fn samples(fields: &[String], report: &ContributionReport) -> String {
    let shown = &fields[..fields.len().min(SAMPLE_SIZE)];
    let mut field_line = format!("Fields: {}", shown.join(", "));
    if fields.len() > shown.len() {
        field_line.push_str(" ...");
    }

    let institutions: Vec<&str> = report
        .ranking
        .iter()
        .take(SAMPLE_SIZE)
        .map(|r| r.institution.as_str())
        .collect();
    let institution_line = if institutions.is_empty() {
        "Institutions: (none)".to_string()
    } else {
        format!("Institutions: {}", institutions.join(" | "))
    };

    format!("{}\n{}", field_line, institution_line)
}

/// Page link strip, e.g. `<< 1 ... 9 [10] 11 ... 20 >>`
pub fn page_links(pagination: &Pagination, visible: usize) -> String {
    let mut parts = vec![if pagination.has_previous() { "<<" } else { "  " }.to_string()];
    for link in pagination.page_links(visible) {
        parts.push(match link {
            PageLink::Page { index, current: true } => format!("[{}]", index + 1),
            PageLink::Page { index, .. } => (index + 1).to_string(),
            PageLink::Ellipsis => "...".to_string(),
        });
    }
    parts.push(if pagination.has_next() { ">>" } else { "  " }.to_string());
    parts.join(" ").trim().to_string()
}

/// Ranking table for one page of rows.
///
/// `first_rank` is the 1-based rank of the first row.
pub fn ranking_table(rows: &[ContributionRow], first_rank: usize, width: usize) -> String {
    if rows.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let (_, institution_width, _, _, _) = ranking_table_columns(width);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Rank"),
        Cell::new("Institution"),
        Cell::new("Total contribution").set_alignment(CellAlignment::Right),
        Cell::new("Papers").set_alignment(CellAlignment::Right),
        Cell::new("Authors").set_alignment(CellAlignment::Right),
    ]);

    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(first_rank + i),
            Cell::new(truncate_at_word(&row.institution, institution_width))
                .add_attribute(Attribute::Bold),
            Cell::new(format_contribution(row.total_contribution))
                .set_alignment(CellAlignment::Right),
            Cell::new(row.paper_count).set_alignment(CellAlignment::Right),
            Cell::new(row.author_count).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

/// Ranking rows as tab-separated lines
pub fn ranking_plain(rows: &[ContributionRow], first_rank: usize) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                first_rank + i,
                row.institution,
                format_contribution(row.total_contribution),
                row.paper_count,
                row.author_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn chart_bar_line(bar: &ChartBar, bar_width: usize, colored: bool) -> String {
    let value = format_contribution(bar.contribution);
    let filled = ((bar.fill_fraction() * bar_width as f64).round() as usize).clamp(1, bar_width.max(1));

    if bar.label_inside && filled >= display_width(&value) + 2 {
        let label = format!(" {} ", value);
        let rest = "█".repeat(filled - display_width(&label));
        let track = "░".repeat(bar_width.saturating_sub(filled));
        if colored {
            format!(
                "{}{}{}",
                label.black().on_cyan().bold(),
                rest.cyan(),
                track.dimmed()
            )
        } else {
            format!("{}{}{}", label, rest, track)
        }
    } else {
        let bar_text = render_bar(filled as f64 / bar_width.max(1) as f64, bar_width);
        if colored {
            format!("{} {}", bar_text.cyan(), value.bold())
        } else {
            format!("{} {}", bar_text, value)
        }
    }
}

/// Ranked bar chart for one chart page.
pub fn chart(page: &ChartPage, bar_width: usize, label_width: usize, colored: bool) -> String {
    let title = format!("Contribution chart, page {}/{}", page.page + 1, page.total_pages);
    let mut lines = vec![section(&title, colored)];

    if page.is_empty() {
        lines.push(EMPTY_STATE.to_string());
        return lines.join("\n");
    }

    for bar in &page.bars {
        let name = truncate_with_ellipsis(&bar.institution, label_width);
        let papers = format!("{} papers", bar.paper_count);
        lines.push(format!(
            "{:>4}  {}  {}",
            bar.rank,
            if colored {
                name.bold().to_string()
            } else {
                name
            },
            if colored {
                papers.dimmed().to_string()
            } else {
                papers
            }
        ));
        lines.push(format!("      {}", chart_bar_line(bar, bar_width, colored)));
    }

    lines.join("\n")
}

/// Detail view: summary, top fields, author table and field table.
pub fn detail(detail: &InstitutionDetail, top_fields: usize, colored: bool) -> String {
    let mut out = vec![section(&format!("Institution: {}", detail.institution), colored)];

    match &detail.row {
        Some(row) => out.push(format!(
            "Rank {} · total {} · {} papers · {} authors",
            detail.rank.unwrap_or_default(),
            format_contribution(row.total_contribution),
            row.paper_count,
            row.author_count
        )),
        None => out.push(EMPTY_STATE.to_string()),
    }

    out.push(String::new());
    out.push("Top fields".to_string());
    if detail.has_fields() {
        for (i, share) in detail.top_fields(top_fields).iter().enumerate() {
            out.push(format!(
                "  {}. {}: {}",
                i + 1,
                share.field,
                format_percent(share.percent)
            ));
        }
    } else {
        out.push("  No field data".to_string());
    }

    if !detail.authors.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Author"),
            Cell::new("Contribution").set_alignment(CellAlignment::Right),
            Cell::new("%").set_alignment(CellAlignment::Right),
        ]);
        for (i, author) in detail.authors.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&author.author),
                Cell::new(format_contribution(author.contribution))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_percent(author.percent)).set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new(""),
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(format_contribution(detail.author_total))
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
        out.push(String::new());
        out.push(table.to_string());
    }

    if detail.has_fields() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Field"),
            Cell::new("Contribution").set_alignment(CellAlignment::Right),
            Cell::new("%").set_alignment(CellAlignment::Right),
        ]);
        for share in &detail.fields {
            table.add_row(vec![
                Cell::new(&share.field),
                Cell::new(format_contribution(share.contribution))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_percent(share.percent)).set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(format_contribution(detail.field_total))
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
        out.push(String::new());
        out.push(table.to_string());
    }

    out.join("\n")
}

/// Field list with selection marks and paper counts
pub fn fields_table(selection: &FieldSelection, counts: &BTreeMap<String, usize>) -> String {
    if selection.available().is_empty() {
        return "No fields in dataset".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Field"),
        Cell::new("Papers").set_alignment(CellAlignment::Right),
    ]);
    for field in selection.available() {
        let mark = if selection.is_selected(field) { "[x]" } else { "[ ]" };
        table.add_row(vec![
            Cell::new(mark),
            Cell::new(field),
            Cell::new(counts.get(field).copied().unwrap_or_default())
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}
