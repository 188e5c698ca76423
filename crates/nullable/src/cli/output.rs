//! Output formatting for CLI commands.

use crate::cli::convert::{CoerceReport, ProjectReport, ShapeInfo};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use nullable_db::{DbValue, Slot};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", text);
    Ok(())
}

/// Human-readable form of a coerced slot.
pub fn describe_slot(slot: &Slot) -> String {
    match slot {
        Slot::Int(v) => v.to_string(),
        Slot::Uint(v) => v.to_string(),
        Slot::Float(v) => v.to_string(),
        Slot::Bool(v) => v.to_string(),
        Slot::Bytes(Some(v)) => format!("0x{}", hex::encode(v)),
        Slot::Bytes(None) | Slot::Pointer(None) => "NULL".to_string(),
        Slot::Text(v) => format!("{:?}", v),
        Slot::Timestamp(v) => v.to_rfc3339(),
        Slot::Opaque(v) => describe_value(v),
        Slot::Pointer(Some(inner)) => format!("*{}", describe_slot(inner)),
    }
}

/// Human-readable form of a wire payload.
pub fn describe_value(value: &DbValue) -> String {
    match value {
        DbValue::Null => "NULL".to_string(),
        DbValue::Integer(v) => v.to_string(),
        DbValue::Real(v) => v.to_string(),
        DbValue::Boolean(v) => v.to_string(),
        DbValue::Blob(v) => format!("0x{}", hex::encode(v)),
        DbValue::Text(v) => format!("{:?}", v),
        DbValue::Timestamp(v) => v.to_rfc3339(),
        DbValue::Opaque(v) => format!("opaque({})", v.type_name()),
    }
}

pub fn print_coerce(report: &CoerceReport) {
    println!("shape:   {}", report.shape);
    println!("source:  {}", report.source);
    match &report.slot {
        Some(slot) => println!("value:   {}", describe_slot(slot)),
        None => println!("value:   (absent)"),
    }
}

pub fn print_project(report: &ProjectReport) {
    println!("shape:   {}", report.shape);
    println!("source:  {}", report.source);
    if report.present {
        println!("payload: {} {}", report.payload.kind(), describe_value(&report.payload));
    } else {
        println!("payload: null (absent)");
    }
}

pub fn print_shapes(shapes: &[ShapeInfo]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = ["SHAPE", "KIND", "ALIASES"]
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for info in shapes {
        table.add_row(vec![
            info.name.to_string(),
            info.kind.clone(),
            info.aliases.join(", "),
        ]);
    }

    println!("{}", table);
    println!("Prefix any shape with '*' (or wrap in option<...>) for a nullable slot.");
}
