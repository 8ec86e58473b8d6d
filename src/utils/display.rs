//! Terminal display utilities for ranking tables, bars and detail views.
//!
//! Handles different screen sizes and Unicode institution names.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| {
        let width = terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Terminal {
            width,
            is_tty: io::stdout().is_terminal(),
        }
    })
}

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Display width of a string, counting wide characters twice.
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// Appends an ellipsis if truncation occurred.
///
/// # Examples
///
/// ```
/// use research_rank::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Truncate text at word boundaries to fit within the specified width.
///
/// Prefers to cut at the last complete word before the limit, falling back to
/// [`truncate_with_ellipsis`] when no boundary fits.
///
/// ```
/// use research_rank::utils::truncate_at_word;
///
/// assert_eq!(truncate_at_word("Hanoi Medical University", 20), "Hanoi Medical...");
/// ```
pub fn truncate_at_word(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut last_space = None;

    for (i, c) in text.char_indices() {
        if c == ' ' {
            last_space = Some(i);
        }
        let w = UnicodeWidthChar::width(c).unwrap_or(1);
        if width + w > budget {
            break;
        }
        width += w;
    }

    match last_space {
        Some(i) if !text[..i].trim_end().is_empty() => format!("{}...", text[..i].trim_end()),
        _ => truncate_with_ellipsis(text, max_width),
    }
}

/// Column width configuration for table display.
#[derive(Debug, Clone, Copy)]
pub struct ColumnConfig {
    pub min_width: usize,
    pub max_width: usize,
    pub weight: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            min_width: 1,
            max_width: usize::MAX,
            weight: 1,
        }
    }
}

impl ColumnConfig {
    /// Create a new column config with minimum width.
    pub fn new(min_width: usize) -> Self {
        ColumnConfig {
            min_width,
            max_width: usize::MAX,
            weight: 1,
        }
    }

    /// Set the maximum width.
    pub fn max(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the weight for space distribution.
    pub fn weight(mut self, weight: usize) -> Self {
        self.weight = weight;
        self
    }
}

/// Calculate column widths from a list of column configurations.
///
/// Every column gets its minimum; leftover space is shared by weight without
/// exceeding any column's maximum.
pub fn calculate_column_widths(terminal_width: usize, configs: &[ColumnConfig]) -> Vec<usize> {
    let n = configs.len();
    if n == 0 {
        return vec![];
    }

    // Separators between columns
    let available_width = terminal_width.saturating_sub(n.saturating_sub(1));
    let mut widths: Vec<usize> = configs.iter().map(|c| c.min_width).collect();

    let min_sum: usize = widths.iter().sum();
    if min_sum >= available_width {
        return widths;
    }

    let mut remaining = available_width - min_sum;

    // Repeat while some weighted column can still grow
    loop {
        let growable: Vec<usize> = (0..n)
            .filter(|&i| configs[i].weight > 0 && widths[i] < configs[i].max_width)
            .collect();
        let total_weight: usize = growable.iter().map(|&i| configs[i].weight).sum();
        if remaining == 0 || total_weight == 0 {
            break;
        }

        let mut given = 0;
        for &i in &growable {
            let share = ((remaining * configs[i].weight) / total_weight).max(1);
            let room = configs[i].max_width - widths[i];
            let take = share.min(room).min(remaining - given);
            widths[i] += take;
            given += take;
        }
        if given == 0 {
            break;
        }
        remaining -= given;
    }

    widths
}

/// Column widths for the ranking table.
///
/// Returns (rank, institution, contribution, papers, authors).
pub fn ranking_table_columns(terminal_width: usize) -> (usize, usize, usize, usize, usize) {
    let configs = [
        ColumnConfig::new(4).max(6).weight(0),
        ColumnConfig::new(24).max(90).weight(1),
        ColumnConfig::new(12).max(14).weight(0),
        ColumnConfig::new(6).max(8).weight(0),
        ColumnConfig::new(7).max(9).weight(0),
    ];

    let widths = calculate_column_widths(terminal_width, &configs);
    (widths[0], widths[1], widths[2], widths[3], widths[4])
}

/// Contribution value with four decimals
pub fn format_contribution(value: f64) -> String {
    format!("{:.4}", value)
}

/// Percentage value (0..=100) with one decimal and a percent sign
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Fixed-width horizontal bar for a fraction in `0.0..=1.0`
///
/// ```
/// use research_rank::utils::render_bar;
///
/// assert_eq!(render_bar(0.5, 4), "██░░");
/// ```
pub fn render_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
