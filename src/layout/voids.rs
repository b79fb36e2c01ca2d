// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Splits a map into drawable region runs and compressed voids.

use std::slice;

use super::geometry::MapGeometry;
use crate::model::ids::RegionName;

/// Free space too large to draw at scale, shown as a fixed-height band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidMarker {
    after_region: RegionName,
    start: u64,
    end: u64,
}

impl VoidMarker {
    /// The region directly below the void.
    pub fn after_region(&self) -> &RegionName {
        &self.after_region
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Bytes skipped by the void.
    pub fn bytes(&self) -> u64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutGroup {
    /// Regions drawn at scale, ascending by origin. Never empty.
    Regions(Vec<RegionName>),
    Void(VoidMarker),
}

impl LayoutGroup {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void(_))
    }
}

/// Accumulates groups in address order. Consumed by [`GroupSequenceBuilder::finish`].
#[derive(Debug, Default)]
pub struct GroupSequenceBuilder {
    groups: Vec<LayoutGroup>,
    current: Vec<RegionName>,
}

impl GroupSequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_region(&mut self, region: RegionName) -> &mut Self {
        self.current.push(region);
        self
    }

    /// Closes the open region run (if any) and appends a void after it.
    pub fn push_void(&mut self, after_region: RegionName, start: u64, end: u64) -> &mut Self {
        self.close_run();
        self.groups.push(LayoutGroup::Void(VoidMarker {
            after_region,
            start,
            end,
        }));
        self
    }

    pub fn finish(mut self) -> GroupSequence {
        self.close_run();
        GroupSequence {
            groups: self.groups,
        }
    }

    fn close_run(&mut self) {
        if !self.current.is_empty() {
            self.groups
                .push(LayoutGroup::Regions(std::mem::take(&mut self.current)));
        }
    }
}

/// Finished group sequence. Has no mutating API; build a new one to change it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupSequence {
    groups: Vec<LayoutGroup>,
}

impl GroupSequence {
    pub fn groups(&self) -> &[LayoutGroup] {
        &self.groups
    }

    pub fn iter(&self) -> slice::Iter<'_, LayoutGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn void_count(&self) -> usize {
        self.groups.iter().filter(|group| group.is_void()).count()
    }
}

impl<'a> IntoIterator for &'a GroupSequence {
    type Item = &'a LayoutGroup;
    type IntoIter = slice::Iter<'a, LayoutGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Walks the regions in address order and closes a group after every region whose free
/// space exceeds `void_threshold`. Free space equal to the threshold stays inline.
pub fn plan_voids(geometry: &MapGeometry, void_threshold: u64) -> GroupSequence {
    let mut builder = GroupSequenceBuilder::new();

    for region in geometry.regions() {
        builder.push_region(region.name().clone());

        let Ok(freespace) = u64::try_from(region.freespace()) else {
            continue;
        };
        if freespace > void_threshold {
            let gap_end = region.end().saturating_add(freespace);
            builder.push_void(region.name().clone(), region.end(), gap_end);
        }
    }

    builder.finish()
}
