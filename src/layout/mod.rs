// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout pipeline for memory map diagrams.
//!
//! Every map goes through the same stages, each consuming the previous stage's type:
//! [`bounds::compute_bounds`] -> [`spacing::resolve_spacing`] -> [`bounds::finalize_scale`]
//! -> [`MapGeometry`] -> [`voids::plan_voids`] + [`indent::plan_indents`].
//! Maps are independent of each other and are laid out in parallel.

pub mod bounds;
pub mod compose;
pub mod geometry;
pub mod indent;
pub mod links;
pub mod spacing;
pub mod voids;
pub mod warnings;

use std::collections::BTreeMap;

use rayon::prelude::*;

pub use bounds::{compute_bounds, finalize_scale, MapBounds, ScaledBounds, SCALE_PADDING_BYTES};
pub use compose::{compose_diagram, Composition};
pub use geometry::MapGeometry;
pub use indent::{plan_indents, INDENT_STEP};
pub use links::{resolve_links, LinkDirection, ResolvedLink};
pub use spacing::{resolve_spacing, MapSpacing, RegionSpacing};
pub use voids::{plan_voids, GroupSequence, GroupSequenceBuilder, LayoutGroup, VoidMarker};
pub use warnings::LayoutWarning;

use crate::model::diagram::{Diagram, IndentScheme};
use crate::model::ids::{MapName, RegionName};
use crate::model::memory_map::MemoryMap;

/// Final placement data for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLayout {
    name: RegionName,
    origin: u64,
    size: u64,
    freespace: i64,
    collisions: BTreeMap<RegionName, u64>,
    indent: u32,
}

impl RegionLayout {
    pub fn name(&self) -> &RegionName {
        &self.name
    }

    pub fn origin(&self) -> u64 {
        self.origin
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn end(&self) -> u64 {
        self.origin + self.size
    }

    pub fn freespace(&self) -> i64 {
        self.freespace
    }

    pub fn collisions(&self) -> &BTreeMap<RegionName, u64> {
        &self.collisions
    }

    pub fn is_colliding(&self) -> bool {
        !self.collisions.is_empty()
    }

    pub fn indent(&self) -> u32 {
        self.indent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayout {
    name: MapName,
    bounds: ScaledBounds,
    regions: Vec<RegionLayout>,
    groups: GroupSequence,
    warnings: Vec<LayoutWarning>,
}

impl MapLayout {
    pub fn name(&self) -> &MapName {
        &self.name
    }

    pub fn bounds(&self) -> &ScaledBounds {
        &self.bounds
    }

    /// Regions ordered by `(origin, name)`.
    pub fn regions(&self) -> &[RegionLayout] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&RegionLayout> {
        self.regions.iter().find(|region| region.name.as_str() == name)
    }

    pub fn groups(&self) -> &GroupSequence {
        &self.groups
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }
}

/// Immutable layout of a whole diagram, maps in drawing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLayout {
    name: String,
    pixel_width: u32,
    pixel_height: u32,
    void_threshold: u64,
    indent_scheme: IndentScheme,
    maps: Vec<MapLayout>,
    links: Vec<ResolvedLink>,
}

impl DiagramLayout {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn void_threshold(&self) -> u64 {
        self.void_threshold
    }

    pub fn indent_scheme(&self) -> IndentScheme {
        self.indent_scheme
    }

    pub fn maps(&self) -> &[MapLayout] {
        &self.maps
    }

    pub fn map(&self, name: &str) -> Option<&MapLayout> {
        self.maps.iter().find(|map| map.name.as_str() == name)
    }

    pub fn links(&self) -> &[ResolvedLink] {
        &self.links
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LayoutWarning> {
        self.maps.iter().flat_map(|map| map.warnings.iter())
    }
}

/// Lays out every map of `diagram`. Pure: the same diagram always yields the same layout.
pub fn layout_diagram(diagram: &Diagram) -> DiagramLayout {
    let maps: Vec<MapLayout> = diagram
        .maps()
        .par_iter()
        .map(|map| {
            layout_map(
                map,
                diagram.pixel_height(),
                diagram.void_threshold(),
                diagram.indent_scheme(),
            )
        })
        .collect();

    tracing::debug!(
        diagram = diagram.name(),
        maps = maps.len(),
        links = diagram.links().len(),
        "diagram laid out"
    );

    DiagramLayout {
        name: diagram.name().to_owned(),
        pixel_width: diagram.pixel_width(),
        pixel_height: diagram.pixel_height(),
        void_threshold: diagram.void_threshold(),
        indent_scheme: diagram.indent_scheme(),
        maps,
        links: diagram.links().to_vec(),
    }
}

pub fn layout_map(
    map: &MemoryMap,
    pixel_height: u32,
    void_threshold: u64,
    indent_scheme: IndentScheme,
) -> MapLayout {
    let mut warnings = Vec::new();

    let (bounds, warning) = compute_bounds(map, pixel_height);
    warnings.extend(warning);

    let spacing = resolve_spacing(map, bounds.top_address());
    warnings.extend(spacing::negative_space_warnings(map, &spacing));

    let (scaled, warning) = finalize_scale(map, bounds, &spacing);
    warnings.extend(warning);

    tracing::debug!(
        map = %map.name(),
        max_address = scaled.computed_max_address(),
        calculated = scaled.max_address_was_calculated(),
        draw_scale = scaled.draw_scale(),
        rescaled = scaled.rescaled(),
        "map bounds settled"
    );

    let geometry = MapGeometry::new(map, scaled, &spacing);
    let groups = plan_voids(&geometry, void_threshold);
    let indents = plan_indents(&geometry, indent_scheme);

    tracing::debug!(
        map = %map.name(),
        groups = groups.len(),
        voids = groups.void_count(),
        "voids planned"
    );

    for warning in &warnings {
        tracing::warn!(map = %warning.map(), "{warning}");
    }

    let regions = geometry
        .regions()
        .iter()
        .map(|extent| RegionLayout {
            name: extent.name().clone(),
            origin: extent.origin(),
            size: extent.size(),
            freespace: extent.freespace(),
            collisions: extent.spacing().collisions().clone(),
            indent: indents.get(extent.name()).copied().unwrap_or(0),
        })
        .collect();

    MapLayout {
        name: map.name().clone(),
        bounds: *geometry.bounds(),
        regions,
        groups,
        warnings,
    }
}
