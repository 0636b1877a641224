//! Plain-text output for the console.

use std::fmt;

use bingodash_core::contracts::prelude::FieldAccess;
use bingodash_core::{ColumnSpec, PageState, SortDirection, SortState};

/// Widest a table cell gets before it is truncated.
pub const MAX_CELL_CHARS: usize = 40;
const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_chars` characters, ellipsis included.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// mid-character. Prefers to cut at a space when one sits in the back half.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(idx, _)| idx);
    let head = &text[..cut];

    if let Some(space) = head.rfind(' ')
        && head[..space].chars().count() > keep / 2
    {
        return format!("{}{ELLIPSIS}", &head[..space]);
    }
    format!("{head}{ELLIPSIS}")
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// One column per header, the active sort column marked with its
    /// direction.
    pub fn from_items<T: FieldAccess>(
        columns: &[ColumnSpec],
        sort: &SortState,
        items: &[T],
    ) -> Self {
        let headers = columns.iter().map(|spec| {
            match (sort.column(), sort.direction()) {
                (Some(column), Some(direction)) if column == spec.key => {
                    let marker = match direction {
                        SortDirection::Ascending => "^",
                        SortDirection::Descending => "v",
                    };
                    format!("{} {marker}", spec.label)
                }
                _ => spec.label.clone(),
            }
        });
        let mut table = Table::new(headers);
        for item in items {
            table.push_row(
                columns
                    .iter()
                    .map(|spec| item.field(&spec.key).render().into_owned())
                    .collect(),
            );
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> =
            self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                let len = cell.chars().count().min(MAX_CELL_CHARS);
                match widths.get_mut(idx) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    cells: &[String],
    widths: &[usize],
) -> fmt::Result {
    let line = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            let cell = cells.get(idx).map_or("", String::as_str);
            let cell = truncate_text(cell, MAX_CELL_CHARS);
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &rule, &widths)?;
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

/// Footer line under a paged list.
pub fn page_footer(page: &PageState) -> String {
    let mut footer = format!(
        "page {} of {}, {} total",
        page.current_page(),
        page.total_pages().max(1),
        page.total()
    );
    if page.has_next() {
        footer.push_str(&format!(" (next: --page {})", page.current_page() + 1));
    }
    footer
}

/// Aligned `key: value` block for single records.
pub fn key_values(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| format!("{key:<width$}  {value}\n"))
        .collect()
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingodash_core::contracts::prelude::FieldValue;

    struct Row {
        name: &'static str,
        score: u32,
    }

    impl FieldAccess for Row {
        fn field(&self, column: &str) -> FieldValue<'_> {
            match column {
                "name" => self.name.into(),
                "score" => self.score.into(),
                _ => FieldValue::Null,
            }
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let out = truncate_text("Hello 世界! and more", 8);
        assert_eq!(out.chars().count(), 8);
        assert!(out.ends_with("..."));

        let emoji = truncate_text("Emoji test 😀🎉🚀", 12);
        assert!(emoji.chars().count() <= 12);
    }

    #[test]
    fn truncation_prefers_a_late_space() {
        assert_eq!(
            truncate_text("weekly step challenge for the office", 20),
            "weekly step..."
        );
        assert_eq!(truncate_text("short", 20), "short");
    }

    #[test]
    fn table_marks_sorted_column_and_aligns() {
        let rows = [
            Row { name: "Zoe", score: 7 },
            Row { name: "Al", score: 12 },
        ];
        let columns = vec![
            ColumnSpec::sortable("name", "Name"),
            ColumnSpec::sortable("score", "Score"),
            ColumnSpec::fixed("actions", "Actions"),
        ];
        let text = Table::from_items(
            &columns,
            &SortState::descending("score"),
            &rows,
        )
        .to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Name  Score v  Actions");
        assert_eq!(lines[1], "----  -------  -------");
        assert_eq!(lines[2], "Zoe   7");
        assert_eq!(lines[3], "Al    12");
    }

    #[test]
    fn footer_points_at_next_page() {
        let mut page = PageState::new(10);
        page.set_total(25);
        assert_eq!(page_footer(&page), "page 1 of 3, 25 total (next: --page 2)");
        page.set_page(3);
        assert_eq!(page_footer(&page), "page 3 of 3, 25 total");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(1234.5), "$1234.50");
    }
}
