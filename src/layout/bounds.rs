// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Max address and draw scale for one map.
//!
//! Two stages:
//! - [`compute_bounds`] runs before free space is known and picks the max address
//!   and a first draw scale.
//! - [`finalize_scale`] runs on the resolved spacing and may shrink the scale when a
//!   user max address leaves most of the map empty.
//!
//! Only [`finalize_scale`] produces a [`ScaledBounds`], and the planners downstream
//! only accept that type, so scaling is always settled before voids are planned.

use super::spacing::MapSpacing;
use super::warnings::LayoutWarning;
use crate::model::memory_map::MemoryMap;

/// Added to the region data before re-dividing when a rescaled map would touch the top edge,
/// so there is room for a trailing void.
pub const SCALE_PADDING_BYTES: u64 = 800_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapBounds {
    largest_region_end: u64,
    user_max_address: Option<u64>,
    computed_max_address: u64,
    max_address_was_calculated: bool,
    pixel_height: u32,
    draw_scale: u64,
}

impl MapBounds {
    pub fn largest_region_end(&self) -> u64 {
        self.largest_region_end
    }

    pub fn computed_max_address(&self) -> u64 {
        self.computed_max_address
    }

    pub fn max_address_was_calculated(&self) -> bool {
        self.max_address_was_calculated
    }

    pub fn draw_scale(&self) -> u64 {
        self.draw_scale
    }

    /// The address free space is measured up to for the topmost regions.
    ///
    /// An explicit max address is honoured even when it is too small, so a region
    /// running past it reports negative free space instead of silently fitting.
    pub fn top_address(&self) -> u64 {
        self.user_max_address.unwrap_or(self.computed_max_address)
    }
}

pub fn compute_bounds(map: &MemoryMap, pixel_height: u32) -> (MapBounds, Option<LayoutWarning>) {
    let largest_region_end = map.largest_region_end();
    let user_max_address = map.user_max_address();

    let (computed_max_address, max_address_was_calculated, warning) = match user_max_address {
        Some(user) if user >= largest_region_end => (user, false, None),
        Some(user) => (
            largest_region_end,
            true,
            Some(LayoutWarning::MaxAddressBelowRegionData {
                map: map.name().clone(),
                user_max_address: user,
                largest_region_end,
            }),
        ),
        None => (largest_region_end, true, None),
    };

    let draw_scale = scale_for(largest_region_end.max(computed_max_address), pixel_height);

    let bounds = MapBounds {
        largest_region_end,
        user_max_address,
        computed_max_address,
        max_address_was_calculated,
        pixel_height,
        draw_scale,
    };
    (bounds, warning)
}

/// Bounds with the final draw scale, ready for void and indent planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledBounds {
    bounds: MapBounds,
    draw_scale: u64,
    draw_extent: u64,
    rescaled: bool,
}

impl ScaledBounds {
    pub fn largest_region_end(&self) -> u64 {
        self.bounds.largest_region_end
    }

    pub fn computed_max_address(&self) -> u64 {
        self.bounds.computed_max_address
    }

    pub fn max_address_was_calculated(&self) -> bool {
        self.bounds.max_address_was_calculated
    }

    pub fn top_address(&self) -> u64 {
        self.bounds.top_address()
    }

    pub fn pixel_height(&self) -> u32 {
        self.bounds.pixel_height
    }

    /// Bytes per pixel.
    pub fn draw_scale(&self) -> u64 {
        self.draw_scale
    }

    /// Highest address drawn at full scale. Anything above it is shown as a trailing void.
    pub fn draw_extent(&self) -> u64 {
        self.draw_extent
    }

    /// Whether the post-resolver check replaced the initial scale.
    pub fn rescaled(&self) -> bool {
        self.rescaled
    }

    /// Pixels needed to draw `bytes` at this scale.
    pub fn to_pixels(&self, bytes: u64) -> u64 {
        bytes.div_ceil(self.draw_scale)
    }
}

/// Settles the draw scale once free space is known.
///
/// Only a user supplied max address can waste drawing space, so the check is skipped
/// when the max address was calculated from the regions.
pub fn finalize_scale(
    map: &MemoryMap,
    bounds: MapBounds,
    spacing: &MapSpacing,
) -> (ScaledBounds, Option<LayoutWarning>) {
    let unchanged = ScaledBounds {
        bounds,
        draw_scale: bounds.draw_scale,
        draw_extent: bounds.largest_region_end.max(bounds.computed_max_address),
        rescaled: false,
    };

    if bounds.max_address_was_calculated {
        return (unchanged, None);
    }

    let pixel_height = i64::from(bounds.pixel_height);
    let Some((region, freespace)) = map
        .regions_by_origin()
        .into_iter()
        .filter_map(|region| {
            spacing.freespace(region.name().as_str()).map(|freespace| (region, freespace))
        })
        .find(|(_, freespace)| *freespace > pixel_height)
    else {
        return (unchanged, None);
    };

    let largest = bounds.largest_region_end;
    let mut draw_extent = largest;
    let mut draw_scale = scale_for(largest, bounds.pixel_height);
    if largest.div_ceil(draw_scale) >= u64::from(bounds.pixel_height) {
        draw_extent = largest.saturating_add(SCALE_PADDING_BYTES);
        draw_scale = scale_for(draw_extent, bounds.pixel_height);
    }

    let warning = LayoutWarning::ExcessFreeSpace {
        map: map.name().clone(),
        region: region.name().clone(),
        freespace,
        previous_scale: bounds.draw_scale,
        draw_scale,
    };

    let scaled = ScaledBounds {
        bounds,
        draw_scale,
        draw_extent,
        rescaled: true,
    };
    (scaled, Some(warning))
}

fn scale_for(extent: u64, pixel_height: u32) -> u64 {
    extent.div_ceil(u64::from(pixel_height.max(1))).max(1)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{compute_bounds, finalize_scale, SCALE_PADDING_BYTES};
    use crate::layout::spacing::resolve_spacing;
    use crate::layout::warnings::LayoutWarning;
    use crate::model::builder::DiagramBuilder;
    use crate::model::fixtures::{single_map, single_map_with};

    #[test]
    fn calculates_max_address_when_none_is_given() {
        let diagram = single_map(&[("kernel", 0x10, 0x30), ("dtb", 0x90, 0x30)], None);
        let (bounds, warning) = compute_bounds(&diagram.maps()[0], 1000);

        assert_eq!(warning, None);
        assert_eq!(bounds.largest_region_end(), 0xC0);
        assert_eq!(bounds.computed_max_address(), 0xC0);
        assert!(bounds.max_address_was_calculated());
        assert_eq!(bounds.draw_scale(), 1);
    }

    #[test]
    fn keeps_a_user_max_address_that_covers_the_regions() {
        let diagram = single_map(&[("kernel", 0x10, 0x30)], Some(0x10_0000));
        let (bounds, warning) = compute_bounds(&diagram.maps()[0], 1000);

        assert_eq!(warning, None);
        assert_eq!(bounds.computed_max_address(), 0x10_0000);
        assert!(!bounds.max_address_was_calculated());
        assert_eq!(bounds.draw_scale(), 0x10_0000_u64.div_ceil(1000));
    }

    #[test]
    fn replaces_a_user_max_address_below_the_region_data() {
        let diagram = single_map(&[("kernel", 0x10, 0x30)], Some(0x20));
        let (bounds, warning) = compute_bounds(&diagram.maps()[0], 1000);

        assert_eq!(bounds.computed_max_address(), 0x40);
        assert!(bounds.max_address_was_calculated());
        assert_eq!(bounds.top_address(), 0x20);
        assert!(matches!(
            warning,
            Some(LayoutWarning::MaxAddressBelowRegionData {
                user_max_address: 0x20,
                largest_region_end: 0x40,
                ..
            })
        ));
    }

    #[test]
    fn keeps_scale_when_free_space_fits_the_height() {
        let diagram = single_map(&[("kernel", 0x10, 0x30)], Some(0x200));
        let map = &diagram.maps()[0];
        let (bounds, _) = compute_bounds(map, 1000);
        let spacing = resolve_spacing(map, bounds.top_address());

        let (scaled, warning) = finalize_scale(map, bounds, &spacing);
        assert_eq!(warning, None);
        assert!(!scaled.rescaled());
        assert_eq!(scaled.draw_scale(), 1);
        assert_eq!(scaled.draw_extent(), 0x200);
    }

    #[test]
    fn rescales_when_user_max_address_wastes_the_drawing() {
        let diagram = single_map(&[("boot", 0, 0x1000)], Some(0x1000_0000));
        let map = &diagram.maps()[0];
        let (bounds, _) = compute_bounds(map, 1000);
        let spacing = resolve_spacing(map, bounds.top_address());

        let (scaled, warning) = finalize_scale(map, bounds, &spacing);
        assert!(scaled.rescaled());
        assert_eq!(scaled.draw_scale(), 0x1000_u64.div_ceil(1000));
        assert_eq!(scaled.draw_extent(), 0x1000);
        assert!(matches!(warning, Some(LayoutWarning::ExcessFreeSpace { .. })));
    }

    #[test]
    fn pads_the_rescaled_extent_when_content_reaches_the_top_edge() {
        let diagram = single_map(&[("image", 0, 2_000_000)], Some(0x4000_0000));
        let map = &diagram.maps()[0];
        let (bounds, _) = compute_bounds(map, 1000);
        let spacing = resolve_spacing(map, bounds.top_address());

        let (scaled, _) = finalize_scale(map, bounds, &spacing);
        assert_eq!(scaled.draw_extent(), 2_000_000 + SCALE_PADDING_BYTES);
        assert_eq!(scaled.draw_scale(), 2_800);
        assert!(scaled.to_pixels(2_000_000) < 1000);
    }

    #[rstest]
    #[case(Some(2_000_100))]
    #[case(Some(2_000_001))]
    #[case(Some(0x4000_0000))]
    fn pads_by_the_full_constant_whatever_the_user_max_address(#[case] max_address: Option<u64>) {
        let diagram = single_map(&[("a", 0, 990_000), ("b", 1_000_000, 1_000_000)], max_address);
        let map = &diagram.maps()[0];
        let (bounds, _) = compute_bounds(map, 1000);
        let spacing = resolve_spacing(map, bounds.top_address());

        let (scaled, _) = finalize_scale(map, bounds, &spacing);
        assert!(scaled.rescaled());
        assert_eq!(scaled.draw_extent(), 2_000_000 + SCALE_PADDING_BYTES);
        assert_eq!(scaled.draw_scale(), 2_800);
    }

    #[rstest]
    #[case(&[("a", 0, 0x10)], None, 1000)]
    #[case(&[("a", 0, 990_000), ("b", 1_000_000, 1_000_000)], Some(2_000_100), 1000)]
    #[case(&[("a", 0, 0x10)], Some(0x1000_0000), 1000)]
    #[case(&[("a", 0x1000, 0x10), ("b", 0x8000_0000, 0x400)], Some(0xFFFF_FFFF), 600)]
    #[case(&[("a", 0, 2_000_000)], Some(0x4000_0000), 1000)]
    #[case(&[("a", 0, 7), ("b", 3, 0x12345)], Some(0x20), 17)]
    fn draw_extent_always_fits_the_pixel_height(
        #[case] regions: &[(&str, u64, u64)],
        #[case] max_address: Option<u64>,
        #[case] height: u32,
    ) {
        let diagram =
            single_map_with(DiagramBuilder::default().pixel_size(400, height), regions, max_address);
        let map = &diagram.maps()[0];
        let (bounds, _) = compute_bounds(map, height);
        let spacing = resolve_spacing(map, bounds.top_address());
        let (scaled, _) = finalize_scale(map, bounds, &spacing);

        assert!(scaled.draw_scale() >= 1);
        assert!(scaled.draw_extent() >= scaled.largest_region_end());
        assert!(scaled.to_pixels(scaled.draw_extent()) <= u64::from(height));
    }
}
