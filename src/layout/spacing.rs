// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Free space and collisions between the regions of one map.

use std::collections::BTreeMap;

use super::warnings::LayoutWarning;
use crate::model::ids::RegionName;
use crate::model::memory_map::MemoryMap;
use crate::model::region::Region;

/// Free space and collisions for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpacing {
    freespace: i64,
    collisions: BTreeMap<RegionName, u64>,
}

impl RegionSpacing {
    /// Signed byte distance from the region end to its nearest neighbour above (or the
    /// top of the map). Negative when the region runs into something.
    pub fn freespace(&self) -> i64 {
        self.freespace
    }

    /// Other region name -> address where the overlap with that region begins.
    pub fn collisions(&self) -> &BTreeMap<RegionName, u64> {
        &self.collisions
    }

    pub fn is_colliding(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Spacing for a region the resolver never saw: plain distance to `top`.
    pub(crate) fn unresolved(top: u64, end: u64) -> Self {
        Self {
            freespace: signed_distance(end, top),
            collisions: BTreeMap::new(),
        }
    }
}

/// Resolver output for a whole map, keyed by region name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSpacing {
    regions: BTreeMap<RegionName, RegionSpacing>,
}

impl MapSpacing {
    pub fn get(&self, region: &str) -> Option<&RegionSpacing> {
        self.regions.get(region)
    }

    pub fn freespace(&self, region: &str) -> Option<i64> {
        self.get(region).map(RegionSpacing::freespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionName, &RegionSpacing)> {
        self.regions.iter()
    }
}

/// Computes free space and collisions for every region of `map`.
///
/// For region `R` every other region `O` is visited in `(origin, name)` order:
/// - `O` entirely below `R` is ignored.
/// - `O` overlapping `R` is recorded as a collision at `O`'s origin. If `O` starts
///   above `R`, the first such overlap also fixes `R`'s free space at the negative
///   overlap.
/// - `O` above `R` without overlap is a candidate distance.
///
/// A region without collisions takes the smallest candidate distance, or the distance
/// to `top` when nothing lies above it. A colliding region whose free space was never
/// fixed also measures up to `top`.
///
/// Quadratic in the number of regions, which stays in the tens for real maps.
pub fn resolve_spacing(map: &MemoryMap, top: u64) -> MapSpacing {
    let ordered = map.regions_by_origin();
    let mut regions = BTreeMap::new();

    for region in &ordered {
        let mut fixed: Option<i64> = None;
        let mut nearest: Option<i64> = None;
        let mut collisions = BTreeMap::new();

        for other in &ordered {
            if other.name() == region.name() || region.origin() >= other.end() {
                continue;
            }

            let gap = signed_distance(region.end(), other.origin());
            if gap < 0 {
                // When `other` starts below, its origin is also the lower of the two.
                collisions.insert(other.name().clone(), other.origin());
                if region.origin() < other.origin() && fixed.is_none() {
                    fixed = Some(gap);
                }
            } else {
                nearest = Some(nearest.map_or(gap, |current| current.min(gap)));
                if fixed.is_none() {
                    fixed = Some(gap);
                }
            }
        }

        let to_top = signed_distance(region.end(), top);
        let freespace = if collisions.is_empty() {
            nearest.unwrap_or(to_top)
        } else {
            fixed.unwrap_or(to_top)
        };

        regions.insert(region.name().clone(), RegionSpacing { freespace, collisions });
    }

    MapSpacing { regions }
}

/// One warning per region with negative free space.
///
/// The region runs either into a region above it (the lowest such collider is named) or
/// past the top of the map.
pub(crate) fn negative_space_warnings(map: &MemoryMap, spacing: &MapSpacing) -> Vec<LayoutWarning> {
    spacing
        .iter()
        .filter(|(_, entry)| entry.freespace < 0)
        .map(|(name, entry)| {
            let origin = map.region(name.as_str()).map_or(0, Region::origin);
            let collider = entry
                .collisions
                .iter()
                .filter(|(_, boundary)| **boundary > origin)
                .min_by_key(|(_, boundary)| **boundary);

            match collider {
                Some((collider, _)) => LayoutWarning::RegionCollision {
                    map: map.name().clone(),
                    region: name.clone(),
                    collider: collider.clone(),
                    overlap: entry.freespace.unsigned_abs(),
                },
                None => LayoutWarning::RegionOverrunsMaxAddress {
                    map: map.name().clone(),
                    region: name.clone(),
                    freespace: entry.freespace,
                },
            }
        })
        .collect()
}

/// `to - from` as a signed value, saturating at the `i64` range.
fn signed_distance(from: u64, to: u64) -> i64 {
    let distance = i128::from(to) - i128::from(from);
    i64::try_from(distance).unwrap_or(if distance < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{negative_space_warnings, resolve_spacing, signed_distance};
    use crate::layout::warnings::LayoutWarning;
    use crate::model::fixtures::{boot_layout, boot_layout_with_collision, single_map};
    use crate::model::RegionName;

    fn rname(value: &str) -> RegionName {
        RegionName::new(value).expect("region name")
    }

    #[test]
    fn measures_distance_to_the_nearest_neighbour_and_the_top() {
        let diagram = boot_layout();
        let spacing = resolve_spacing(&diagram.maps()[0], 1000);

        assert_eq!(spacing.freespace("kernel"), Some(0x10));
        assert_eq!(spacing.freespace("rootfs"), Some(0x10));
        assert_eq!(spacing.freespace("dtb"), Some(0x328));
        assert!(spacing.iter().all(|(_, entry)| !entry.is_colliding()));
    }

    #[test]
    fn records_collisions_and_negative_free_space() {
        let diagram = boot_layout_with_collision();
        let spacing = resolve_spacing(&diagram.maps()[0], 1000);

        let kernel = spacing.get("kernel").expect("kernel");
        assert_eq!(kernel.freespace(), -0x20);
        assert_eq!(kernel.collisions(), &BTreeMap::from([(rname("rootfs"), 0x50)]));

        let rootfs = spacing.get("rootfs").expect("rootfs");
        assert_eq!(rootfs.freespace(), 0x10);
        assert_eq!(rootfs.collisions(), &BTreeMap::from([(rname("kernel"), 0x10)]));

        let dtb = spacing.get("dtb").expect("dtb");
        assert_eq!(dtb.freespace(), 0x328);
        assert!(!dtb.is_colliding());
    }

    #[test]
    fn reports_overrun_of_an_explicit_max_address() {
        let height = 1000;
        let diagram = single_map(&[("kernel", 0x10, height + 64)], Some(height));
        let map = &diagram.maps()[0];
        let spacing = resolve_spacing(map, height);

        assert_eq!(spacing.freespace("kernel"), Some(-0x50));
        assert_eq!(
            negative_space_warnings(map, &spacing),
            vec![LayoutWarning::RegionOverrunsMaxAddress {
                map: map.name().clone(),
                region: rname("kernel"),
                freespace: -0x50,
            }]
        );
    }

    #[test]
    fn reports_every_collision_with_negative_free_space() {
        let diagram = boot_layout_with_collision();
        let map = &diagram.maps()[0];
        let spacing = resolve_spacing(map, 1000);

        assert_eq!(
            negative_space_warnings(map, &spacing),
            vec![LayoutWarning::RegionCollision {
                map: map.name().clone(),
                region: rname("kernel"),
                collider: rname("rootfs"),
                overlap: 0x20,
            }]
        );
    }

    #[test]
    fn names_the_lowest_collider_above_the_region() {
        let diagram = single_map(
            &[("outer", 0x0, 0x100), ("a", 0x40, 0x10), ("b", 0x80, 0x10), ("next", 0x200, 0x10)],
            Some(0x400),
        );
        let map = &diagram.maps()[0];
        let spacing = resolve_spacing(map, 0x400);

        let warnings = negative_space_warnings(map, &spacing);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            LayoutWarning::RegionCollision { region, collider, overlap: 0xC0, .. }
                if region.as_str() == "outer" && collider.as_str() == "a"
        ));
    }

    #[test]
    fn picks_the_smallest_gap_regardless_of_declaration_order() {
        let diagram = single_map(
            &[("far", 0x900, 0x10), ("base", 0x0, 0x100), ("near", 0x180, 0x10)],
            Some(0x1000),
        );
        let spacing = resolve_spacing(&diagram.maps()[0], 0x1000);
        assert_eq!(spacing.freespace("base"), Some(0x80));
        assert_eq!(spacing.freespace("near"), Some(0x900 - 0x190));
        assert_eq!(spacing.freespace("far"), Some(0x1000 - 0x910));
    }

    #[test]
    fn lowest_origin_collider_fixes_free_space() {
        // `outer` overlaps both `a` and `b`; only `a` (lowest origin) sets the free space.
        let diagram = single_map(
            &[("outer", 0x0, 0x100), ("a", 0x40, 0x10), ("b", 0x80, 0x10), ("next", 0x200, 0x10)],
            Some(0x400),
        );
        let spacing = resolve_spacing(&diagram.maps()[0], 0x400);

        let outer = spacing.get("outer").expect("outer");
        assert_eq!(outer.freespace(), 0x40 - 0x100);
        assert_eq!(
            outer.collisions(),
            &BTreeMap::from([(rname("a"), 0x40), (rname("b"), 0x80)])
        );

        // `a` sits inside `outer`; it collides with it but measures to `b`.
        let a = spacing.get("a").expect("a");
        assert_eq!(a.collisions(), &BTreeMap::from([(rname("outer"), 0x0)]));
        assert_eq!(a.freespace(), 0x80 - 0x50);
    }

    #[test]
    fn colliding_region_without_neighbours_measures_to_the_top() {
        let diagram = single_map(&[("low", 0x0, 0x100), ("high", 0x80, 0x100)], Some(0x400));
        let spacing = resolve_spacing(&diagram.maps()[0], 0x400);

        let high = spacing.get("high").expect("high");
        assert!(high.is_colliding());
        assert_eq!(high.freespace(), 0x400 - 0x180);
    }

    #[test]
    fn regions_sharing_an_origin_collide_with_each_other() {
        let diagram = single_map(&[("a", 0x10, 0x10), ("b", 0x10, 0x20)], Some(0x100));
        let spacing = resolve_spacing(&diagram.maps()[0], 0x100);

        assert_eq!(
            spacing.get("a").expect("a").collisions(),
            &BTreeMap::from([(rname("b"), 0x10)])
        );
        assert_eq!(
            spacing.get("b").expect("b").collisions(),
            &BTreeMap::from([(rname("a"), 0x10)])
        );
        assert_eq!(spacing.freespace("a"), Some(0x100 - 0x20));
        assert_eq!(spacing.freespace("b"), Some(0x100 - 0x30));
    }

    #[test]
    fn size_plus_freespace_reaches_the_next_origin_for_disjoint_regions() {
        let regions = [("a", 0x0, 0x20), ("b", 0x40, 0x40), ("c", 0x100, 0x8), ("d", 0x400, 0x100)];
        let diagram = single_map(&regions, Some(0x1000));
        let spacing = resolve_spacing(&diagram.maps()[0], 0x1000);

        for pair in regions.windows(2) {
            let (name, origin, size) = pair[0];
            let next_origin = pair[1].1;
            let freespace = spacing.freespace(name).expect("freespace");
            assert_eq!(origin as i64 + size as i64 + freespace, next_origin as i64, "{name}");
        }
        assert_eq!(spacing.freespace("d"), Some(0x1000 - 0x500));
    }

    #[test]
    fn signed_distance_saturates() {
        assert_eq!(signed_distance(0, u64::MAX), i64::MAX);
        assert_eq!(signed_distance(u64::MAX, 0), i64::MIN);
        assert_eq!(signed_distance(0x70, 0x50), -0x20);
    }
}
