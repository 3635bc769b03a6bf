//! Rendering surfaces for the report.
//!
//! The session never draws anything itself. It tells a [`ReportView`] which
//! rows to show or hide and in which order to re-append them.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::store::RecordStore;

/// Receives visibility and order updates from a report session.
pub trait ReportView {
    /// Shows or hides the row of a container without moving it.
    fn set_visible(&mut self, id: &str, visible: bool);

    /// Moves the row of a container to the end of the list.
    ///
    /// Appending every id in turn re-renders the list in that order.
    fn append(&mut self, id: &str);
}

/// View that ignores every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullView;

impl ReportView for NullView {
    fn set_visible(&mut self, _id: &str, _visible: bool) {}

    fn append(&mut self, _id: &str) {}
}

/// Formatting options for [`TableView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// Decimal places for the utilization column.
    pub decimals: usize,
    /// Lists hidden rows as well, marked as hidden.
    pub show_hidden: bool,
}

impl TableOptions {
    pub const DEFAULT_DECIMALS: usize = 2;
    pub const MAX_DECIMALS: usize = 6;
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decimals: Self::DEFAULT_DECIMALS,
            show_hidden: false,
        }
    }
}

/// Plain-text table of tote summaries.
#[derive(Clone, Debug, Default)]
pub struct TableView {
    options: TableOptions,
    rows: Vec<String>,
    hidden: HashSet<String>,
}

const HEADERS: [&str; 3] = ["Tote ID", "Items Packed", "Final Utilization (%)"];
const MISSING: &str = "n/a";

impl TableView {
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Row ids in rendered order, hidden rows included.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    /// Renders the table, looking up row contents in `store`.
    pub fn render(&self, store: &RecordStore) -> String {
        let mut lines: Vec<[String; 3]> = Vec::with_capacity(self.rows.len());
        let mut hidden_flags = Vec::with_capacity(self.rows.len());

        for id in &self.rows {
            let hidden = self.is_hidden(id);
            if hidden && !self.options.show_hidden {
                continue;
            }
            let Some(record) = store.get(id) else {
                continue;
            };
            lines.push([
                record.id().to_owned(),
                record
                    .item_count()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
                record
                    .volume_utilization()
                    .map(|u| format!("{:.*}", self.options.decimals, u))
                    .unwrap_or_else(|| MISSING.to_string()),
            ]);
            hidden_flags.push(hidden);
        }

        let mut widths = HEADERS.map(str::len);
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<w0$} | {:>w1$} | {:>w2$}",
            HEADERS[0],
            HEADERS[1],
            HEADERS[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
        let _ = writeln!(
            out,
            "{}-+-{}-+-{}",
            "-".repeat(widths[0]),
            "-".repeat(widths[1]),
            "-".repeat(widths[2])
        );
        for (line, hidden) in lines.iter().zip(hidden_flags) {
            let _ = write!(
                out,
                "{:<w0$} | {:>w1$} | {:>w2$}",
                line[0],
                line[1],
                line[2],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2]
            );
            if hidden {
                out.push_str("  (hidden)");
            }
            out.push('\n');
        }
        let shown = self.rows.iter().filter(|id| !self.is_hidden(id)).count();
        let _ = writeln!(out, "{} of {} totes shown", shown, self.rows.len());
        out
    }
}

impl ReportView for TableView {
    fn set_visible(&mut self, id: &str, visible: bool) {
        if visible {
            self.hidden.remove(id);
        } else {
            self.hidden.insert(id.to_owned());
        }
    }

    fn append(&mut self, id: &str) {
        if let Some(pos) = self.rows.iter().position(|row| row == id) {
            let row = self.rows.remove(pos);
            self.rows.push(row);
        } else {
            self.rows.push(id.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContainerRecord;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            ContainerRecord::new("Tote_1", Some(5), Some(80.0), vec!["X".into()]),
            ContainerRecord::new("Tote_2", None, Some(95.456), vec![]),
            ContainerRecord::new("Tote_10", Some(8), None, vec![]),
        ])
    }

    fn table(options: TableOptions) -> TableView {
        let mut view = TableView::new(options);
        for id in ["Tote_1", "Tote_2", "Tote_10"] {
            view.append(id);
        }
        view
    }

    #[test]
    fn append_moves_existing_rows_to_the_end() {
        let mut view = table(TableOptions::default());
        view.append("Tote_1");
        assert_eq!(view.rows(), ["Tote_2", "Tote_10", "Tote_1"]);
    }

    #[test]
    fn renders_rows_in_order() {
        let view = table(TableOptions::default());
        let rendered = view.render(&store());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Tote ID | Items Packed | Final Utilization (%)");
        assert!(lines[2].starts_with("Tote_1 "));
        assert!(lines[2].ends_with("80.00"));
        assert!(lines[3].contains("n/a"));
        assert!(lines[3].ends_with("95.46"));
        assert!(lines[4].ends_with("n/a"));
        assert_eq!(lines[5], "3 of 3 totes shown");
    }

    #[test]
    fn hidden_rows_are_omitted_by_default() {
        let mut view = table(TableOptions::default());
        view.set_visible("Tote_2", false);
        let rendered = view.render(&store());

        assert!(!rendered.contains("Tote_2"));
        assert!(rendered.ends_with("2 of 3 totes shown\n"));
    }

    #[test]
    fn hidden_rows_are_marked_when_requested() {
        let mut view = table(TableOptions {
            decimals: 1,
            show_hidden: true,
        });
        view.set_visible("Tote_2", false);
        let rendered = view.render(&store());
        let row = rendered
            .lines()
            .find(|line| line.starts_with("Tote_2"))
            .unwrap();

        assert!(row.ends_with("95.5  (hidden)"));
        assert!(view.is_hidden("Tote_2"));

        view.set_visible("Tote_2", true);
        assert!(!view.is_hidden("Tote_2"));
    }
}
