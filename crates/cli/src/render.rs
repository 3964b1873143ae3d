//! Plain-text rendering of intent outcomes and inventory views.

use std::io::{self, Write};

use novalib::{IntentOutcome, InventoryStats, InventoryView};

pub fn outcome(out: &mut impl Write, outcome: &IntentOutcome) -> io::Result<()> {
    match outcome {
        IntentOutcome::Added(id) => writeln!(out, "Added book {id}"),
        IntentOutcome::Rejected => {
            writeln!(out, "Book not added: title and author are both required")
        }
        IntentOutcome::Toggled { id, status } => writeln!(out, "Book {id} is now {status}"),
        IntentOutcome::Removed(record) => {
            writeln!(out, "Removed \"{}\" by {}", record.title, record.author)
        }
        IntentOutcome::NotFound(id) => writeln!(out, "No record with id {id}"),
        IntentOutcome::SearchUpdated => Ok(()),
    }
}

pub fn stats(out: &mut impl Write, stats: &InventoryStats) -> io::Result<()> {
    for (label, value) in stats.entries() {
        writeln!(out, "{label}: {value}")?;
    }
    Ok(())
}

pub fn view(out: &mut impl Write, view: &InventoryView<'_>) -> io::Result<()> {
    let summary: Vec<String> = view
        .stats
        .entries()
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    writeln!(out, "{}", summary.join(" | "))?;

    if view.records.is_empty() {
        return writeln!(out, "No records found.");
    }

    let header = ["ID", "TITLE", "AUTHOR", "STATUS"];
    let rows: Vec<[String; 4]> = view
        .records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.title.clone(),
                r.author.clone(),
                r.status.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &header, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<S: AsRef<str>>(out: &mut impl Write, cells: &[S], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}
