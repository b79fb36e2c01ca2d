// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::address::ParseAddressError;
use super::ids::{MapName, NameError, RegionName};

/// Reasons a diagram is refused at construction time.
///
/// Every variant names the map (and region, where there is one) so the offending
/// input can be located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidDimensions {
        width: u32,
        height: u32,
    },
    NoMaps,
    InvalidVoidThreshold {
        source: ParseAddressError,
    },
    InvalidMapName {
        value: String,
        source: NameError,
    },
    DuplicateMap {
        map: MapName,
    },
    UnknownMap {
        map: String,
    },
    EmptyMap {
        map: MapName,
    },
    InvalidMaxAddress {
        map: MapName,
        source: ParseAddressError,
    },
    InvalidRegionName {
        map: MapName,
        value: String,
        source: NameError,
    },
    DuplicateRegion {
        map: MapName,
        region: RegionName,
    },
    InvalidOrigin {
        map: MapName,
        region: RegionName,
        source: ParseAddressError,
    },
    InvalidSize {
        map: MapName,
        region: RegionName,
        source: ParseAddressError,
    },
    ZeroSize {
        map: MapName,
        region: RegionName,
    },
    AddressOverflow {
        map: MapName,
        region: RegionName,
        origin: u64,
        size: u64,
    },
    InvalidLinkTarget {
        map: MapName,
        region: RegionName,
        value: String,
        source: NameError,
    },
    UnknownLinkMap {
        map: MapName,
        region: RegionName,
        target_map: MapName,
    },
    SelfMapLink {
        map: MapName,
        region: RegionName,
        target_region: RegionName,
    },
    UnknownLinkRegion {
        map: MapName,
        region: RegionName,
        target_map: MapName,
        target_region: RegionName,
    },
    LinkSizeMismatch {
        map: MapName,
        region: RegionName,
        size: u64,
        target_map: MapName,
        target_region: RegionName,
        target_size: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "diagram dimensions must be positive (got {width}x{height})")
            }
            Self::NoMaps => f.write_str("diagram has no memory maps"),
            Self::InvalidVoidThreshold { source } => write!(f, "invalid void threshold: {source}"),
            Self::InvalidMapName { value, source } => {
                write!(f, "invalid map name {value:?}: {source}")
            }
            Self::DuplicateMap { map } => write!(f, "duplicate map name '{map}'"),
            Self::UnknownMap { map } => write!(f, "map '{map}' has not been declared"),
            Self::EmptyMap { map } => write!(f, "map '{map}' has no regions"),
            Self::InvalidMaxAddress { map, source } => {
                write!(f, "map '{map}': invalid max address: {source}")
            }
            Self::InvalidRegionName { map, value, source } => {
                write!(f, "map '{map}': invalid region name {value:?}: {source}")
            }
            Self::DuplicateRegion { map, region } => {
                write!(f, "map '{map}': duplicate region name '{region}'")
            }
            Self::InvalidOrigin { map, region, source } => {
                write!(f, "region '{region}' in map '{map}': invalid origin: {source}")
            }
            Self::InvalidSize { map, region, source } => {
                write!(f, "region '{region}' in map '{map}': invalid size: {source}")
            }
            Self::ZeroSize { map, region } => {
                write!(f, "region '{region}' in map '{map}': size must be greater than zero")
            }
            Self::AddressOverflow { map, region, origin, size } => write!(
                f,
                "region '{region}' in map '{map}': end overflows the address space \
                 ({origin:#x} + {size:#x})"
            ),
            Self::InvalidLinkTarget { map, region, value, source } => {
                write!(f, "region '{region}' in map '{map}': invalid link target {value:?}: {source}")
            }
            Self::UnknownLinkMap { map, region, target_map } => write!(
                f,
                "region '{region}' in map '{map}' links to unknown map '{target_map}'"
            ),
            Self::SelfMapLink { map, region, target_region } => write!(
                f,
                "region '{region}' in map '{map}' links to '{target_region}' in its own map; \
                 links must cross maps"
            ),
            Self::UnknownLinkRegion { map, region, target_map, target_region } => write!(
                f,
                "region '{region}' in map '{map}' links to unknown region '{target_region}' \
                 in map '{target_map}'"
            ),
            Self::LinkSizeMismatch { map, region, size, target_map, target_region, target_size } => {
                write!(
                    f,
                    "size mismatch: '{map}:{region}' ({size:#x}) links to \
                     '{target_map}:{target_region}' ({target_size:#x})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidMapName { source, .. }
            | Self::InvalidRegionName { source, .. }
            | Self::InvalidLinkTarget { source, .. } => Some(source),
            Self::InvalidVoidThreshold { source }
            | Self::InvalidMaxAddress { source, .. }
            | Self::InvalidOrigin { source, .. }
            | Self::InvalidSize { source, .. } => Some(source),
            _ => None,
        }
    }
}
