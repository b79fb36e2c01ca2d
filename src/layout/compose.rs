// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pixel placement for a laid out diagram.
//!
//! Maps become columns from left to right. Inside a column address 0 sits at the
//! bottom; region runs are drawn at the map's draw scale and every void takes a fixed
//! band. Coordinates use the raster convention: `y` grows downwards.

use super::links::{LinkDirection, ResolvedLink};
use super::voids::LayoutGroup;
use super::{DiagramLayout, MapLayout};
use crate::model::ids::{MapName, RegionName};

pub const MARGIN: u32 = 20;
pub const GUTTER: u32 = 100;
pub const VOID_BAND: u32 = 30;
/// Pixels per indent unit.
pub const INDENT_PIXELS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> u32 {
        self.y + self.height / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRegion {
    pub name: RegionName,
    pub rect: Rect,
    pub colliding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedVoid {
    pub after_region: RegionName,
    pub bytes: u64,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedMap {
    pub name: MapName,
    pub column: Rect,
    pub regions: Vec<PlacedRegion>,
    pub voids: Vec<PlacedVoid>,
}

impl PlacedMap {
    pub fn region(&self, name: &str) -> Option<&PlacedRegion> {
        self.regions.iter().find(|region| region.name.as_str() == name)
    }
}

/// Straight line between the facing edges of two linked regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub link: ResolvedLink,
    pub from: (u32, u32),
    pub to: (u32, u32),
}

impl Connector {
    pub fn direction(&self) -> LinkDirection {
        self.link.direction()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub width: u32,
    pub height: u32,
    pub maps: Vec<PlacedMap>,
    pub connectors: Vec<Connector>,
}

impl Composition {
    pub fn map(&self, name: &str) -> Option<&PlacedMap> {
        self.maps.iter().find(|map| map.name.as_str() == name)
    }
}

/// Region position measured upwards from the bottom of the content area.
struct Stacked {
    name: RegionName,
    bottom: u64,
    height: u64,
    indent: u32,
    colliding: bool,
}

struct StackedVoid {
    after_region: RegionName,
    bytes: u64,
    bottom: u64,
}

struct StackedMap {
    regions: Vec<Stacked>,
    voids: Vec<StackedVoid>,
    content_height: u64,
}

pub fn compose_diagram(layout: &DiagramLayout) -> Composition {
    let column_width = layout.pixel_width();
    let stacked: Vec<StackedMap> = layout.maps().iter().map(stack_map).collect();

    let content_height = stacked
        .iter()
        .map(|map| map.content_height)
        .fold(u64::from(layout.pixel_height()), u64::max);
    let content_height = to_u32(content_height);
    let height = content_height.saturating_add(2 * MARGIN);

    let columns = u32::try_from(layout.maps().len()).unwrap_or(u32::MAX);
    let width = (2 * MARGIN)
        .saturating_add(columns.saturating_mul(column_width))
        .saturating_add(columns.saturating_sub(1).saturating_mul(GUTTER));

    // Converts a bottom-up span to a top-down y.
    let baseline = u64::from(MARGIN) + u64::from(content_height);
    let flip = |bottom: u64, span: u64| to_u32(baseline.saturating_sub(bottom.saturating_add(span)));

    let maps: Vec<PlacedMap> = layout
        .maps()
        .iter()
        .zip(stacked)
        .enumerate()
        .map(|(index, (map, stacked))| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            let column_x = MARGIN.saturating_add(index.saturating_mul(column_width.saturating_add(GUTTER)));
            let column = Rect {
                x: column_x,
                y: MARGIN,
                width: column_width,
                height: content_height,
            };

            let regions = stacked
                .regions
                .into_iter()
                .map(|region| {
                    let shift = region
                        .indent
                        .saturating_mul(INDENT_PIXELS)
                        .min(column_width.saturating_sub(1));
                    PlacedRegion {
                        name: region.name,
                        rect: Rect {
                            x: column_x + shift,
                            y: flip(region.bottom, region.height),
                            width: column_width - shift,
                            height: to_u32(region.height),
                        },
                        colliding: region.colliding,
                    }
                })
                .collect();

            let voids = stacked
                .voids
                .into_iter()
                .map(|void| PlacedVoid {
                    after_region: void.after_region,
                    bytes: void.bytes,
                    rect: Rect {
                        x: column_x,
                        y: flip(void.bottom, u64::from(VOID_BAND)),
                        width: column_width,
                        height: VOID_BAND,
                    },
                })
                .collect();

            PlacedMap {
                name: map.name().clone(),
                column,
                regions,
                voids,
            }
        })
        .collect();

    let connectors = layout
        .links()
        .iter()
        .filter_map(|link| connect(&maps, link))
        .collect();

    Composition {
        width,
        height,
        maps,
        connectors,
    }
}

fn stack_map(map: &MapLayout) -> StackedMap {
    let bounds = map.bounds();
    let mut regions = Vec::new();
    let mut voids = Vec::new();
    let mut cursor = 0_u64;

    for (index, group) in map.groups().iter().enumerate() {
        match group {
            LayoutGroup::Regions(names) => {
                let members: Vec<_> = names.iter().filter_map(|name| map.region(name.as_str())).collect();
                let base = if index == 0 {
                    0
                } else {
                    members.first().map_or(0, |region| region.origin())
                };

                let mut group_top = cursor;
                for region in members {
                    let bottom = cursor + bounds.to_pixels(region.origin() - base);
                    let height = bounds.to_pixels(region.size()).max(1);
                    group_top = group_top.max(bottom + height);
                    regions.push(Stacked {
                        name: region.name().clone(),
                        bottom,
                        height,
                        indent: region.indent(),
                        colliding: region.is_colliding(),
                    });
                }
                cursor = group_top;
            }
            LayoutGroup::Void(void) => {
                voids.push(StackedVoid {
                    after_region: void.after_region().clone(),
                    bytes: void.bytes(),
                    bottom: cursor,
                });
                cursor += u64::from(VOID_BAND);
            }
        }
    }

    StackedMap {
        regions,
        voids,
        content_height: cursor,
    }
}

fn connect(maps: &[PlacedMap], link: &ResolvedLink) -> Option<Connector> {
    let source = maps.get(link.source_map_index())?.region(link.source_region().as_str())?;
    let target = maps.get(link.target_map_index())?.region(link.target_region().as_str())?;

    let (from_x, to_x) = match link.direction() {
        LinkDirection::Rightward => (source.rect.right(), target.rect.x),
        LinkDirection::Leftward => (source.rect.x, target.rect.right()),
    };

    Some(Connector {
        link: link.clone(),
        from: (from_x, source.rect.mid_y()),
        to: (to_x, target.rect.mid_y()),
    })
}

fn to_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
