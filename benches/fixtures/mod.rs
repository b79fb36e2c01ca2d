// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic synthetic diagrams for benchmarks (no RNG).

use mmdiagram::model::{Diagram, DiagramBuilder, IndentScheme, RegionInput};

const REGION_SIZE: u64 = 0x400;
const SMALL_GAP: u64 = 0x40;
/// Larger than the default void threshold, so every fourth gap becomes a void.
const LARGE_GAP: u64 = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub maps: usize,
    pub regions_per_map: usize,
    /// Every n-th region starts inside its predecessor; 0 disables overlaps.
    pub overlap_every: usize,
    /// Links region 0 of each map to region 0 of the next map.
    pub linked: bool,
}

impl Params {
    pub const fn new(maps: usize, regions_per_map: usize, overlap_every: usize, linked: bool) -> Self {
        Self {
            maps,
            regions_per_map,
            overlap_every,
            linked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumOverlapping,
    LargeLinked,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::MediumOverlapping, Case::LargeLinked];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumOverlapping => "medium_overlapping",
            Self::LargeLinked => "large_linked",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            // Stays within the 32-colour palette so the raster bench can run it.
            Self::Small => Params::new(2, 12, 0, true),
            Self::MediumOverlapping => Params::new(4, 120, 5, false),
            Self::LargeLinked => Params::new(8, 400, 7, true),
        }
    }
}

fn map_name(index: usize) -> String {
    format!("m{index:02}")
}

fn region_name(index: usize) -> String {
    format!("r{index:04}")
}

pub fn diagram(params: Params) -> Diagram {
    assert!(params.maps >= 1, "maps must be >= 1");
    assert!(params.regions_per_map >= 1, "regions_per_map must be >= 1");

    let mut builder = DiagramBuilder::new("bench").indent_scheme(IndentScheme::Alternate);
    for map in 0..params.maps {
        builder.add_map(&map_name(map), None).expect("add map");
    }

    for map in 0..params.maps {
        let name = map_name(map);
        let mut cursor = 0u64;
        for index in 0..params.regions_per_map {
            let overlaps = params.overlap_every > 0 && index > 0 && index % params.overlap_every == 0;
            let origin = if overlaps {
                cursor.saturating_sub(REGION_SIZE / 2)
            } else {
                cursor
            };

            let mut input = RegionInput::new(region_name(index), origin, REGION_SIZE);
            if params.linked && index == 0 && map + 1 < params.maps {
                input = input.with_link(map_name(map + 1), region_name(0));
            }
            builder.add_region(&name, input).expect("add region");

            let gap = if (index + 1) % 4 == 0 { LARGE_GAP } else { SMALL_GAP };
            cursor = origin + REGION_SIZE + gap;
        }
    }

    builder.build().expect("bench diagram")
}

pub fn fixture(case: Case) -> Diagram {
    diagram(case.params())
}
