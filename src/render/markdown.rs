// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Markdown report: one region table per map, then warnings and links.

use super::text::pad_right;
use crate::layout::{DiagramLayout, MapLayout, RegionLayout};
use crate::model::address::{format_address, format_signed};

const REGION_HEADER: [&str; 6] = ["Name", "Origin", "Size", "End", "Free Space", "Collisions"];
const LINK_HEADER: [&str; 3] = ["Source", "Target", "Direction"];

/// `image` is the PNG path as it should appear in the image reference.
pub fn render_markdown(layout: &DiagramLayout, image: &str) -> String {
    let mut out = format!("# {name}\n\n![{name}]({image})\n", name = layout.name());

    for map in layout.maps() {
        out.push('\n');
        write_map(&mut out, map);
    }

    if !layout.links().is_empty() {
        let rows: Vec<Vec<String>> = layout
            .links()
            .iter()
            .map(|link| {
                vec![
                    format!("{}:{}", link.source_map(), link.source_region()),
                    format!("{}:{}", link.target_map(), link.target_region()),
                    link.direction().as_str().to_owned(),
                ]
            })
            .collect();
        out.push_str("\n## Links\n\n");
        write_table(&mut out, &LINK_HEADER, &rows);
    }

    out
}

fn write_map(out: &mut String, map: &MapLayout) {
    let bounds = map.bounds();
    let source = if bounds.max_address_was_calculated() {
        "calculated"
    } else {
        "user supplied"
    };

    out.push_str(&format!("## {}\n\n", map.name()));
    out.push_str(&format!(
        "Max address {} ({source}), draw scale 1:{}{}\n\n",
        format_address(bounds.computed_max_address()),
        bounds.draw_scale(),
        if bounds.rescaled() { " (rescaled)" } else { "" }
    ));

    let rows: Vec<Vec<String>> = map.regions().iter().map(region_row).collect();
    write_table(out, &REGION_HEADER, &rows);

    if !map.warnings().is_empty() {
        out.push_str("\nWarnings:\n\n");
        for warning in map.warnings() {
            out.push_str(&format!("- {warning}\n"));
        }
    }
}

fn region_row(region: &RegionLayout) -> Vec<String> {
    let collisions = if region.collisions().is_empty() {
        "-".to_owned()
    } else {
        region
            .collisions()
            .iter()
            .map(|(name, boundary)| format!("{name} @ {}", format_address(*boundary)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        region.name().to_string(),
        format_address(region.origin()),
        format_address(region.size()),
        format_address(region.end()),
        format_signed(region.freespace()),
        collisions,
    ]
}

fn write_table(out: &mut String, header: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(column, title)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .fold(title.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_right(cell, *width))
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    out.push_str(&line(header.iter().map(|title| (*title).to_owned()).collect()));
    out.push_str(&line(widths.iter().map(|width| "-".repeat(*width)).collect()));
    for row in rows {
        out.push_str(&line(row.clone()));
    }
}
