//! Plain-text tables for entity rows
//!
//! Column widths use display width so Arabic and CJK names line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use fieldbook_core::{Client, Entity, Product, Report};

/// Widest a single cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 32;

/// An entity that can be printed as a table row
pub trait Tabular: Entity {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn status_cell(is_active: Option<bool>) -> String {
    match is_active {
        Some(false) => "inactive".to_string(),
        _ => "active".to_string(),
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl Tabular for Product {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "STORE", "CLIENT", "IMAGES"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.taxed_price_store),
            format!("{:.2}", self.taxed_price_client),
            self.image_count.to_string(),
        ]
    }
}

impl Tabular for Client {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "REGION", "SALESMAN", "PHONE", "STATUS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.region),
            opt(&self.salesman_name),
            opt(&self.phone),
            status_cell(self.is_active),
        ]
    }
}

impl Tabular for Report {
    fn headers() -> &'static [&'static str] {
        &["ID", "DATE", "CLIENT", "BY", "PRODUCTS", "STATUS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.visit_date.to_string(),
            opt(&self.client_name),
            opt(&self.username),
            self.products.len().to_string(),
            status_cell(self.is_active),
        ]
    }
}

/// Cut a cell to `max` display columns, marking the cut with an ellipsis
fn truncate(cell: &str, max: usize) -> String {
    if cell.width() <= max {
        return cell.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in cell.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

/// Render rows under their headers
pub fn table<T: Tabular>(items: &[T]) -> String {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            item.cells()
                .iter()
                .map(|c| truncate(c, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.iter().map(|h| h.to_string()).collect())];
    out.extend(rows.into_iter().map(line));
    out.join("\n")
}
