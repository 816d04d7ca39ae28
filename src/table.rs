//! Plain-text table rendering for display rows.
//!
//! One table per collection, in row order. Column widths are sized to
//! content; absent cells render empty rather than as a placeholder.

use crate::query::DisplayRow;

/// Render rows as one simple table per collection.
///
/// Rows are grouped by consecutive runs of the same collection (the
/// query engine already emits them grouped). Collections where no row
/// carries a compiler get that column dropped entirely, so e.g. a
/// Python listing shows only version, package and dependency.
pub fn render_tables(rows: &[DisplayRow]) -> String {
    let mut output = String::new();

    let mut start = 0;
    while start < rows.len() {
        let collection = &rows[start].collection;
        let mut end = start;
        while end < rows.len() && rows[end].collection == *collection {
            end += 1;
        }

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&render_group(collection, &rows[start..end]));

        start = end;
    }

    output
}

/// Render a single collection's rows in the tabulate "simple" style:
/// header line, dash rule, then data rows, two-space gutters.
fn render_group(collection: &str, rows: &[DisplayRow]) -> String {
    let with_compiler = rows.iter().any(|r| r.compiler.is_some());

    let packages_header = format!("{} Packages", collection);
    let mut headers: Vec<&str> = vec!["Version"];
    if with_compiler {
        headers.push("Compiler");
    }
    headers.push(&packages_header);
    headers.push("Dependency");

    let cells: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| {
            let mut cell_row: Vec<&str> = vec![&row.version];
            if with_compiler {
                cell_row.push(row.compiler.as_deref().unwrap_or(""));
            }
            cell_row.push(row.package.as_deref().unwrap_or(""));
            cell_row.push(row.dependency.as_deref().unwrap_or(""));
            cell_row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    push_line(&mut output, &headers, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_refs: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut output, &rule_refs, &widths);

    for row in &cells {
        push_line(&mut output, row, &widths);
    }

    output
}

fn push_line(output: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        // Pad every column but the last so trailing whitespace never
        // leaks into the output.
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
