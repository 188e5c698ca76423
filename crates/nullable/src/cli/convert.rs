//! `coerce`, `project` and `shapes` commands.

use crate::cli::config::SHAPE_ALIASES;
use crate::cli::literal::Literal;
use crate::cli::output;
use anyhow::{Context, Result};
use nullable_db::coerce::convert;
use nullable_db::{
    CoercionError, DbTimestamp, DbValue, FromDbValue, Shape, Slot, SourceValue, ToDbValue,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct CoerceReport {
    pub shape: String,
    pub source: String,
    /// `false` when a null source cleared the container.
    pub present: bool,
    pub slot: Option<Slot>,
}

#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub shape: String,
    pub source: String,
    pub present: bool,
    pub payload: DbValue,
}

#[derive(Debug, Serialize)]
pub struct ShapeInfo {
    pub name: &'static str,
    pub kind: String,
    pub aliases: &'static [&'static str],
}

pub fn parse_args(shape: &str, source: &str) -> Result<(Shape, Literal)> {
    let parsed_shape: Shape = shape
        .parse()
        .with_context(|| format!("Invalid shape '{}'", shape))?;
    let literal: Literal = source
        .parse()
        .with_context(|| format!("Invalid source literal '{}'", source))?;
    Ok((parsed_shape, literal))
}

/// Read `src` the way a nullable column of `shape` is read.
///
/// `None` means a null source cleared the container.
pub fn read(shape: &Shape, src: SourceValue<'_>) -> Result<Option<Slot>, CoercionError> {
    if src.is_null() {
        return Ok(None);
    }
    read_slot(shape, src).map(Some)
}

/// Timestamps go through their own scan so RFC3339 text is accepted.
/// `src` is never null here.
fn read_slot(shape: &Shape, src: SourceValue<'_>) -> Result<Slot, CoercionError> {
    match shape {
        Shape::Timestamp => DbTimestamp::scan(src).map(Slot::Timestamp),
        Shape::Pointer(inner) => {
            read_slot(inner, src).map(|slot| Slot::Pointer(Some(Box::new(slot))))
        }
        _ => convert(shape, src),
    }
}

pub fn coerce_report(shape_arg: &str, source_arg: &str) -> Result<CoerceReport> {
    let (shape, literal) = parse_args(shape_arg, source_arg)?;
    let src = literal.as_source();
    debug!(shape = %shape, source = %literal, "coercing");

    let slot = read(&shape, src)
        .with_context(|| format!("Failed to coerce {} into {}", literal, shape))?;
    Ok(CoerceReport {
        shape: shape.to_string(),
        source: src.kind().to_string(),
        present: slot.is_some(),
        slot,
    })
}

pub fn project_report(shape_arg: &str, source_arg: &str) -> Result<ProjectReport> {
    let report = coerce_report(shape_arg, source_arg)?;
    let payload = match &report.slot {
        Some(slot) => slot
            .to_db_value()
            .with_context(|| format!("Failed to project {} value", report.shape))?,
        None => DbValue::Null,
    };
    debug!(shape = %report.shape, payload = %payload.kind(), "projected");

    Ok(ProjectReport {
        shape: report.shape,
        source: report.source,
        present: report.present,
        payload,
    })
}

pub fn shape_infos() -> Result<Vec<ShapeInfo>> {
    SHAPE_ALIASES
        .iter()
        .map(|&(name, aliases)| {
            let shape: Shape = name
                .parse()
                .with_context(|| format!("Invalid built-in shape '{}'", name))?;
            Ok(ShapeInfo {
                name,
                kind: shape.kind().to_string(),
                aliases,
            })
        })
        .collect()
}

pub fn run_coerce(shape: &str, source: &str, json: bool) -> Result<()> {
    let report = coerce_report(shape, source)?;
    if json {
        output::print_json(&report)
    } else {
        output::print_coerce(&report);
        Ok(())
    }
}

pub fn run_project(shape: &str, source: &str, json: bool) -> Result<()> {
    let report = project_report(shape, source)?;
    if json {
        output::print_json(&report)
    } else {
        output::print_project(&report);
        Ok(())
    }
}

pub fn run_shapes(json: bool) -> Result<()> {
    let shapes = shape_infos()?;
    if json {
        output::print_json(&shapes)
    } else {
        output::print_shapes(&shapes);
        Ok(())
    }
}
