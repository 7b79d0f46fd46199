//! Removal summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use crate::prune::{EntryKind, PrunePlan};

/// Render the planned removals as a table
pub fn render_plan(plan: &PrunePlan) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec![Cell::new("KIND"), Cell::new("NAME"), Cell::new("REASON")]);

    for removal in plan.removals() {
        table.add_row(vec![
            Cell::new(removal.kind.to_string()),
            Cell::new(&removal.name),
            Cell::new(removal.reason.to_string()),
        ]);
    }

    table.to_string()
}

/// One-line count of removals, e.g. "1 context, 2 clusters, 0 users"
pub fn summarize(plan: &PrunePlan) -> String {
    [EntryKind::Context, EntryKind::Cluster, EntryKind::User]
        .iter()
        .map(|kind| {
            let n = plan.count(*kind);
            let suffix = if n == 1 { "" } else { "s" };
            format!("{} {}{}", n, kind, suffix)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
