// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// Plain-text table, one row per item, columns padded to their widest cell.
pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
    padding: bool,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: " ",
            padding: true,
        }
    }

    fn max_widths(&self, table: &[Vec<String>]) -> Vec<usize> {
        let mut max_width = vec![0; self.columns.len()];
        for row in table {
            for (i, cell) in row.iter().enumerate() {
                max_width[i] = max_width[i].max(cell.width());
            }
        }
        max_width
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();
        let widths = self.max_widths(&table);
        let last = self.columns.len().saturating_sub(1);

        for (cells, item) in table.into_iter().zip(self.data) {
            for (j, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                // the last column is not padded when left-aligned
                let direction = col.padding_direction();
                let pad = self.padding && !(j == last && direction == PaddingDirection::Left);
                let cell = match (pad, direction) {
                    (true, PaddingDirection::Left) => pad_end(cell, widths[j]),
                    (true, PaddingDirection::Right) => pad_start(cell, widths[j]),
                    (false, _) => cell,
                };
                let cell = match col.color(item) {
                    Some(color) => cell.color(color).to_string(),
                    None => cell,
                };

                f.write_str(&cell)?;
                f.write_str(if j < last { self.separator } else { "\n" })?;
            }
        }
        Ok(())
    }
}

pub trait Column<T> {
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

// `format!` width counts chars, not terminal cells
fn pad_end(cell: String, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    cell + &" ".repeat(fill)
}

fn pad_start(cell: String, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    " ".repeat(fill) + &cell
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Column<(i64, &str)> for Upper {
        fn format(&self, data: &(i64, &str)) -> String {
            data.1.to_uppercase()
        }
    }

    struct Number;

    impl Column<(i64, &str)> for Number {
        fn format(&self, data: &(i64, &str)) -> String {
            data.0.to_string()
        }

        fn padding_direction(&self) -> PaddingDirection {
            PaddingDirection::Right
        }
    }

    enum Col {
        Number(Number),
        Upper(Upper),
    }

    impl Column<(i64, &str)> for Col {
        fn format(&self, data: &(i64, &str)) -> String {
            match self {
                Col::Number(a) => a.format(data),
                Col::Upper(a) => a.format(data),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Col::Number(a) => a.padding_direction(),
                Col::Upper(a) => a.padding_direction(),
            }
        }
    }

    #[test]
    fn test_table_pads_columns() {
        let columns = [Col::Number(Number), Col::Upper(Upper)];
        let data = [(7, "stretch"), (12, "read")];

        let out = Table::new(&columns, &data).to_string();

        assert_eq!(out, " 7 STRETCH\n12 READ\n");
    }

    #[test]
    fn test_table_measures_wide_chars() {
        let columns = [Col::Upper(Upper), Col::Number(Number)];
        let data = [(1, "晨跑"), (2, "abcde")];

        let out = Table::new(&columns, &data).to_string();

        assert_eq!(out, "晨跑  1\nABCDE 2\n");
    }

    #[test]
    fn test_table_empty() {
        let columns = [Col::Upper(Upper)];
        let data: [(i64, &str); 0] = [];
        assert_eq!(Table::new(&columns, &data).to_string(), "");
    }
}
