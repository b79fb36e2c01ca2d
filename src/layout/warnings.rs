// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::address::{format_address, format_signed};
use crate::model::ids::{MapName, RegionName};

/// A degraded-but-recoverable condition found while laying out a map.
///
/// Layout corrects these on its own; they are kept on the result so writers can
/// report them, and are also emitted through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutWarning {
    /// The user max address does not cover all regions; the computed end is used for scaling.
    MaxAddressBelowRegionData {
        map: MapName,
        user_max_address: u64,
        largest_region_end: u64,
    },
    /// A region runs into the region above it; `overlap` is the negative free space.
    RegionCollision {
        map: MapName,
        region: RegionName,
        collider: RegionName,
        overlap: u64,
    },
    /// A region ends past the top of its map.
    RegionOverrunsMaxAddress {
        map: MapName,
        region: RegionName,
        freespace: i64,
    },
    /// Free space larger than the pixel budget; the draw scale was recomputed from region data.
    ExcessFreeSpace {
        map: MapName,
        region: RegionName,
        freespace: i64,
        previous_scale: u64,
        draw_scale: u64,
    },
}

impl LayoutWarning {
    pub fn map(&self) -> &MapName {
        match self {
            Self::MaxAddressBelowRegionData { map, .. }
            | Self::RegionCollision { map, .. }
            | Self::RegionOverrunsMaxAddress { map, .. }
            | Self::ExcessFreeSpace { map, .. } => map,
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxAddressBelowRegionData { map, user_max_address, largest_region_end } => write!(
                f,
                "map '{map}': max address {} is smaller than the region data (ends at {}); \
                 using the calculated value",
                format_address(*user_max_address),
                format_address(*largest_region_end)
            ),
            Self::RegionCollision { map, region, collider, overlap } => write!(
                f,
                "region '{region}' in map '{map}' overlaps '{collider}' by {overlap:#x}"
            ),
            Self::RegionOverrunsMaxAddress { map, region, freespace } => write!(
                f,
                "region '{region}' in map '{map}' runs past the max address by {}",
                format_signed(freespace.saturating_neg())
            ),
            Self::ExcessFreeSpace { map, region, freespace, previous_scale, draw_scale } => write!(
                f,
                "map '{map}': free space after '{region}' ({}) exceeds the diagram height; \
                 draw scale changed from 1:{previous_scale} to 1:{draw_scale}",
                format_signed(*freespace)
            ),
        }
    }
}
