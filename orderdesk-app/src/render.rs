//! Plain-text rendering for the terminal.

use orderdesk_core::{render_rows, Order};

/// Renders orders as a fixed-width table. Orders with more than one
/// packaging entry get continuation lines under the packaging column.
pub fn format_table(orders: &[Order]) -> String {
    let rows = render_rows(orders);

    let mut id_width = "Id".len();
    let mut items_width = "Items".len();
    let mut created_width = "Created".len();
    for row in &rows {
        id_width = id_width.max(row.id.to_string().len());
        items_width = items_width.max(row.item_count.to_string().len());
        created_width = created_width.max(row.created_at_display.len());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>id$}  {:>items$}  {:<created$}  {}\n",
        "Id",
        "Items",
        "Created",
        "Packaging",
        id = id_width,
        items = items_width,
        created = created_width,
    ));
    for row in &rows {
        let mut packaging = row.packaging_summary.iter();
        let first = packaging.next().map(String::as_str).unwrap_or("-");
        out.push_str(&format!(
            "{:>id$}  {:>items$}  {:<created$}  {}\n",
            row.id,
            row.item_count,
            row.created_at_display,
            first,
            id = id_width,
            items = items_width,
            created = created_width,
        ));
        for extra in packaging {
            out.push_str(&format!(
                "{:>id$}  {:>items$}  {:<created$}  {}\n",
                "",
                "",
                "",
                extra,
                id = id_width,
                items = items_width,
                created = created_width,
            ));
        }
    }
    out
}

/// Renders a single order as a multi-line block.
pub fn format_detail(order: &Order) -> String {
    let row = match render_rows(std::slice::from_ref(order)).into_iter().next() {
        Some(row) => row,
        None => return String::new(),
    };

    let mut out = String::new();
    out.push_str(&format!("Order #{}\n", row.id));
    out.push_str(&format!("  Items:   {}\n", row.item_count));
    out.push_str(&format!("  Created: {}\n", row.created_at_display));
    out.push_str("  Packaging:\n");
    for line in &row.packaging_summary {
        out.push_str(&format!("    {}\n", line));
    }
    out
}
