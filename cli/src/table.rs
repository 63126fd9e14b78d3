// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// Plain text table with a bold header row
#[derive(Debug)]
pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn column_widths(&self, rows: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.name().width()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();
        let widths = self.column_widths(&rows);

        let header = self.columns.iter().map(|col| col.name().to_string()).collect();
        self.write_row(f, &widths, header, None)?;
        for (row, item) in rows.into_iter().zip(self.data) {
            self.write_row(f, &widths, row, Some(item))?;
        }
        Ok(())
    }
}

impl<T, C: Column<T>> Table<'_, T, C> {
    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: Vec<String>,
        item: Option<&T>,
    ) -> fmt::Result {
        let last = self.columns.len().saturating_sub(1);
        for (i, ((col, cell), width)) in self.columns.iter().zip(cells).zip(widths).enumerate() {
            // no trailing spaces after the last column
            let padding = if i == last {
                0
            } else {
                width.saturating_sub(cell.width())
            };
            let padded = format!("{cell}{}", " ".repeat(padding));
            match item {
                None => write!(f, "{}", padded.bold())?,
                Some(item) => match col.color(item) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                },
            }
            if i != last {
                write!(f, "{}", self.separator)?;
            }
        }
        writeln!(f)
    }
}

pub trait Column<T> {
    fn name(&self) -> &'static str;
    fn format(&self, data: &T) -> String;
    fn color(&self, data: &T) -> Option<Color>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Len;

    impl Column<&'static str> for Len {
        fn name(&self) -> &'static str {
            "LEN"
        }

        fn format(&self, data: &&'static str) -> String {
            data.len().to_string()
        }

        fn color(&self, _: &&'static str) -> Option<Color> {
            None
        }
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        colored::control::set_override(false);
        let data = ["a", "abcdefghijklm"];
        let columns = [Len, Len];
        let table = Table::new(&columns, &data).to_string();
        assert_eq!(table, "LEN  LEN\n1    1\n13   13\n");
    }
}
