//! Plain-text tables for terminal output.
//!
//! Cells may contain ANSI styling; widths are computed on the visible text so
//! colored cells still line up.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";

const COLUMN_GAP: &str = "  ";

fn paint(code: &str, s: &str, ansi: bool) -> String {
    if ansi {
        format!("{code}{s}{RESET}")
    } else {
        s.to_string()
    }
}

pub fn bold(s: &str, ansi: bool) -> String {
    paint(BOLD, s, ansi)
}

pub fn dim(s: &str, ansi: bool) -> String {
    paint(DIM, s, ansi)
}

pub fn green(s: &str, ansi: bool) -> String {
    paint(GREEN, s, ansi)
}

pub fn visible_len(s: &str) -> usize {
    // strip ANSI CSI sequences: \x1b[ ... m
    let mut n = 0usize;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for x in chars.by_ref() {
                if x == 'm' {
                    break;
                }
            }
            continue;
        }
        n += 1;
    }
    n
}

pub fn pad_cell(s: &str, width: usize) -> String {
    let vis = visible_len(s);
    if vis >= width {
        s.to_string()
    } else {
        let mut out = String::with_capacity(s.len() + (width - vis));
        out.push_str(s);
        out.extend(std::iter::repeat_n(' ', width - vis));
        out
    }
}

/// One header line followed by one line per row, columns aligned.
///
/// Rows shorter than `headers` are padded with empty cells.
pub fn horizontal(headers: &[&str], rows: &[Vec<String>], ansi: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| visible_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(visible_len(cell));
        }
    }

    let header: Vec<String> = headers.iter().map(|h| dim(h, ansi)).collect();
    let mut lines = vec![render_row(&header, &widths)];
    for row in rows {
        lines.push(render_row(row, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let last = widths.len().saturating_sub(1);
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i == last {
                cell.to_string()
            } else {
                pad_cell(cell, *width)
            }
        })
        .collect();
    line.join(COLUMN_GAP).trim_end().to_string()
}

/// A bold title line followed by aligned `LABEL  value` lines.
pub fn vertical(title: &str, fields: &[(&str, String)], ansi: bool) -> String {
    let width = fields
        .iter()
        .map(|(label, _)| visible_len(label))
        .max()
        .unwrap_or(0);
    let mut lines = vec![bold(title, ansi)];
    for (label, value) in fields {
        lines.push(format!(
            "  {}{}{}",
            pad_cell(&dim(label, ansi), width),
            COLUMN_GAP,
            value
        ));
    }
    lines.join("\n")
}

/// Truncate a string to max length, adding "..." if truncated
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}
