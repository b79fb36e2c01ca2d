// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text preview of a diagram.
//!
//! One column per map, highest address on top. Each region is a box with its end
//! address next to the top border and its origin next to the bottom border. Voids are
//! a single `≈` row. Links are listed under the columns.

use std::fmt;

use super::text::truncate_with_ellipsis;
use super::{Canvas, CanvasError};
use crate::layout::{DiagramLayout, LayoutGroup, MapLayout, RegionLayout, INDENT_STEP};
use crate::model::address::format_address;

const BOX_WIDTH: usize = 28;
const MAX_SHIFT: usize = 8;
const COLUMN_GAP: usize = 3;
const HEADER_ROWS: usize = 3;
const VOID_CHAR: char = '≈';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnicodeRenderError {
    Canvas(CanvasError),
}

impl fmt::Display for UnicodeRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "text preview: {err}"),
        }
    }
}

impl std::error::Error for UnicodeRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
        }
    }
}

impl From<CanvasError> for UnicodeRenderError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas(err)
    }
}

enum Row<'a> {
    Region(&'a RegionLayout),
    Void(u64),
}

impl Row<'_> {
    fn height(&self) -> usize {
        match self {
            Self::Region(_) => 3,
            Self::Void(_) => 1,
        }
    }
}

/// Rows from the top of the column down.
fn column_rows(map: &MapLayout) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for group in map.groups().iter().rev() {
        match group {
            LayoutGroup::Regions(names) => rows.extend(
                names
                    .iter()
                    .rev()
                    .filter_map(|name| map.region(name.as_str()))
                    .map(Row::Region),
            ),
            LayoutGroup::Void(void) => rows.push(Row::Void(void.bytes())),
        }
    }
    rows
}

fn shift_for(indent: u32) -> usize {
    let steps = usize::try_from(indent / INDENT_STEP).unwrap_or(usize::MAX);
    steps.saturating_mul(2).min(MAX_SHIFT)
}

pub fn render_unicode(layout: &DiagramLayout) -> Result<String, UnicodeRenderError> {
    let label_width = layout
        .maps()
        .iter()
        .flat_map(|map| map.regions())
        .flat_map(|region| [region.origin(), region.end()])
        .map(|address| format_address(address).len())
        .max()
        .unwrap_or(0)
        + 1;
    let column_width = label_width + MAX_SHIFT + BOX_WIDTH;

    let columns: Vec<_> = layout.maps().iter().map(column_rows).collect();
    let body_height = columns
        .iter()
        .map(|rows| rows.iter().map(Row::height).sum::<usize>())
        .max()
        .unwrap_or(0);

    let map_count = layout.maps().len();
    let width = map_count * column_width + map_count.saturating_sub(1) * COLUMN_GAP;
    let mut canvas = Canvas::new(width.max(1), HEADER_ROWS + body_height)?;

    for (index, (map, rows)) in layout.maps().iter().zip(&columns).enumerate() {
        let x0 = index * (column_width + COLUMN_GAP);
        let bounds = map.bounds();

        canvas.write_str(x0, 0, &truncate_with_ellipsis(map.name().as_str(), column_width))?;
        let mut scale = format!(
            "max {}{} 1:{}",
            format_address(bounds.computed_max_address()),
            if bounds.max_address_was_calculated() { "*" } else { "" },
            bounds.draw_scale()
        );
        if bounds.rescaled() {
            scale.push_str(" rescaled");
        }
        canvas.write_str(x0, 1, &truncate_with_ellipsis(&scale, column_width))?;

        let mut y = HEADER_ROWS;
        for row in rows {
            match row {
                Row::Region(region) => draw_region(&mut canvas, x0, y, label_width, region)?,
                Row::Void(bytes) => {
                    let x_start = x0 + label_width;
                    let x_end = x0 + column_width - 1;
                    canvas.fill_span(x_start, x_end, y, VOID_CHAR)?;
                    let label = format!(" {} free ", format_address(*bytes));
                    let label = truncate_with_ellipsis(&label, x_end - x_start + 1);
                    let offset = (x_end - x_start + 1).saturating_sub(label.chars().count()) / 2;
                    canvas.write_str(x_start + offset, y, &label)?;
                }
            }
            y += row.height();
        }
    }

    let mut out = canvas.to_trimmed_string();
    if !layout.links().is_empty() {
        out.push_str("\n\nlinks:");
        for link in layout.links() {
            out.push_str(&format!(
                "\n  {}:{} -> {}:{}",
                link.source_map(),
                link.source_region(),
                link.target_map(),
                link.target_region()
            ));
        }
    }
    out.push('\n');
    Ok(out)
}

fn draw_region(
    canvas: &mut Canvas,
    x0: usize,
    y: usize,
    label_width: usize,
    region: &RegionLayout,
) -> Result<(), CanvasError> {
    let left = x0 + label_width + shift_for(region.indent());
    let right = left + BOX_WIDTH - 1;
    canvas.draw_box(left, y, right, y + 2)?;

    let marker = if region.is_colliding() { " !" } else { "" };
    let label = format!("{}{marker}", region.name());
    canvas.write_str(left + 2, y + 1, &truncate_with_ellipsis(&label, BOX_WIDTH - 4))?;

    canvas.write_str(x0, y, &format_address(region.end()))?;
    canvas.write_str(x0, y + 2, &format_address(region.origin()))?;
    Ok(())
}
