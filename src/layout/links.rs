// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ids::{MapName, RegionName};
use crate::model::memory_map::MemoryMap;
use crate::model::validation::ValidationError;

/// Which way a connector travels across the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDirection {
    /// Target map is drawn to the right of the source map.
    Rightward,
    Leftward,
}

impl LinkDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rightward => "rightward",
            Self::Leftward => "leftward",
        }
    }
}

/// A validated cross-map link between two same-sized regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    source_map: MapName,
    source_region: RegionName,
    target_map: MapName,
    target_region: RegionName,
    source_map_index: usize,
    target_map_index: usize,
}

impl ResolvedLink {
    pub fn source_map(&self) -> &MapName {
        &self.source_map
    }

    pub fn source_region(&self) -> &RegionName {
        &self.source_region
    }

    pub fn target_map(&self) -> &MapName {
        &self.target_map
    }

    pub fn target_region(&self) -> &RegionName {
        &self.target_region
    }

    pub fn source_map_index(&self) -> usize {
        self.source_map_index
    }

    pub fn target_map_index(&self) -> usize {
        self.target_map_index
    }

    pub fn direction(&self) -> LinkDirection {
        if self.target_map_index > self.source_map_index {
            LinkDirection::Rightward
        } else {
            LinkDirection::Leftward
        }
    }
}

/// Resolves every region link against `maps` (given in drawing order).
///
/// Links are returned in map order, then region name order, then link declaration
/// order. The first integrity failure aborts resolution.
pub fn resolve_links(maps: &[MemoryMap]) -> Result<Vec<ResolvedLink>, ValidationError> {
    let mut resolved = Vec::new();

    for (source_map_index, source_map) in maps.iter().enumerate() {
        for region in source_map.regions().values() {
            for link in region.links() {
                let (target_map_index, target_map) = maps
                    .iter()
                    .enumerate()
                    .find(|(_, map)| map.name() == link.map())
                    .ok_or_else(|| ValidationError::UnknownLinkMap {
                        map: source_map.name().clone(),
                        region: region.name().clone(),
                        target_map: link.map().clone(),
                    })?;

                if target_map_index == source_map_index {
                    return Err(ValidationError::SelfMapLink {
                        map: source_map.name().clone(),
                        region: region.name().clone(),
                        target_region: link.region().clone(),
                    });
                }

                let target = target_map.region(link.region().as_str()).ok_or_else(|| {
                    ValidationError::UnknownLinkRegion {
                        map: source_map.name().clone(),
                        region: region.name().clone(),
                        target_map: link.map().clone(),
                        target_region: link.region().clone(),
                    }
                })?;

                if target.size() != region.size() {
                    return Err(ValidationError::LinkSizeMismatch {
                        map: source_map.name().clone(),
                        region: region.name().clone(),
                        size: region.size(),
                        target_map: link.map().clone(),
                        target_region: link.region().clone(),
                        target_size: target.size(),
                    });
                }

                resolved.push(ResolvedLink {
                    source_map: source_map.name().clone(),
                    source_region: region.name().clone(),
                    target_map: target_map.name().clone(),
                    target_region: target.name().clone(),
                    source_map_index,
                    target_map_index,
                });
            }
        }
    }

    Ok(resolved)
}
