// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;

use super::ids::{MapName, RegionName};

/// A named reference from one region to a same-sized region in another map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionLink {
    map: MapName,
    region: RegionName,
}

impl RegionLink {
    pub fn new(map: MapName, region: RegionName) -> Self {
        Self { map, region }
    }

    pub fn map(&self) -> &MapName {
        &self.map
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }
}

impl fmt::Display for RegionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.map, self.region)
    }
}

/// Most regions carry zero or one link; two inline slots cover the mirrored
/// flash/RAM case without allocating.
pub type RegionLinks = SmallVec<[RegionLink; 2]>;

/// One fixed-size interval of address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: RegionName,
    origin: u64,
    size: u64,
    links: RegionLinks,
}

impl Region {
    pub fn new(name: RegionName, origin: u64, size: u64) -> Result<Self, RegionError> {
        if size == 0 {
            return Err(RegionError::ZeroSize);
        }
        if origin.checked_add(size).is_none() {
            return Err(RegionError::AddressOverflow { origin, size });
        }

        Ok(Self {
            name,
            origin,
            size,
            links: RegionLinks::new(),
        })
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = RegionLink>) -> Self {
        self.links.extend(links);
        self
    }

    pub fn name(&self) -> &RegionName {
        &self.name
    }

    pub fn origin(&self) -> u64 {
        self.origin
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// First address past the region. Never overflows; checked at construction.
    pub fn end(&self) -> u64 {
        self.origin + self.size
    }

    pub fn links(&self) -> &[RegionLink] {
        &self.links
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.origin < other.end() && other.origin < self.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    ZeroSize,
    AddressOverflow { origin: u64, size: u64 },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => f.write_str("region size must be greater than zero"),
            Self::AddressOverflow { origin, size } => {
                write!(f, "region end overflows the address space ({origin:#x} + {size:#x})")
            }
        }
    }
}

impl std::error::Error for RegionError {}
