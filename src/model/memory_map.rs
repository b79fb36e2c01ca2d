// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::{MapName, RegionName};
use super::region::Region;

/// A named address space holding one or more regions.
///
/// Only [`DiagramBuilder`](super::builder::DiagramBuilder) creates maps, so a map
/// handed out by a [`Diagram`](super::diagram::Diagram) is always non-empty and has
/// unique region names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    name: MapName,
    regions: BTreeMap<RegionName, Region>,
    user_max_address: Option<u64>,
}

impl MemoryMap {
    pub(crate) fn new(
        name: MapName,
        regions: BTreeMap<RegionName, Region>,
        user_max_address: Option<u64>,
    ) -> Self {
        Self {
            name,
            regions,
            user_max_address,
        }
    }

    pub fn name(&self) -> &MapName {
        &self.name
    }

    pub fn regions(&self) -> &BTreeMap<RegionName, Region> {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn user_max_address(&self) -> Option<u64> {
        self.user_max_address
    }

    /// Regions ordered by `(origin, name)`.
    ///
    /// Every layout stage walks regions in this order, which keeps results
    /// independent of insertion order.
    pub fn regions_by_origin(&self) -> Vec<&Region> {
        let mut regions = self.regions.values().collect::<Vec<_>>();
        regions.sort_by(|a, b| a.origin().cmp(&b.origin()).then_with(|| a.name().cmp(b.name())));
        regions
    }

    pub fn largest_region_end(&self) -> u64 {
        self.regions.values().map(Region::end).max().unwrap_or(0)
    }
}
