// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::bounds::ScaledBounds;
use super::spacing::{MapSpacing, RegionSpacing};
use crate::model::ids::{MapName, RegionName};
use crate::model::memory_map::MemoryMap;

/// A region as the planners see it: extent plus resolved spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedExtent {
    name: RegionName,
    origin: u64,
    size: u64,
    spacing: RegionSpacing,
}

impl PlacedExtent {
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

    pub fn spacing(&self) -> &RegionSpacing {
        &self.spacing
    }

    pub fn freespace(&self) -> i64 {
        self.spacing.freespace()
    }

    pub fn is_colliding(&self) -> bool {
        self.spacing.is_colliding()
    }
}

/// Settled geometry of one map: final scale plus every region's spacing, ordered by
/// `(origin, name)`.
///
/// Requires a [`ScaledBounds`], so it can only exist once the draw scale is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGeometry {
    map: MapName,
    bounds: ScaledBounds,
    regions: Vec<PlacedExtent>,
}

impl MapGeometry {
    pub fn new(map: &MemoryMap, bounds: ScaledBounds, spacing: &MapSpacing) -> Self {
        let regions = map
            .regions_by_origin()
            .into_iter()
            .map(|region| PlacedExtent {
                name: region.name().clone(),
                origin: region.origin(),
                size: region.size(),
                spacing: spacing
                    .get(region.name().as_str())
                    .cloned()
                    .unwrap_or_else(|| RegionSpacing::unresolved(bounds.top_address(), region.end())),
            })
            .collect();

        Self {
            map: map.name().clone(),
            bounds,
            regions,
        }
    }

    pub fn map(&self) -> &MapName {
        &self.map
    }

    pub fn bounds(&self) -> &ScaledBounds {
        &self.bounds
    }

    pub fn regions(&self) -> &[PlacedExtent] {
        &self.regions
    }
}
