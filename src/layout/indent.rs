// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::geometry::MapGeometry;
use crate::model::diagram::IndentScheme;
use crate::model::ids::RegionName;

pub const INDENT_STEP: u32 = 5;

/// Horizontal indent per region. Only colliding regions ever get a nonzero value.
pub fn plan_indents(geometry: &MapGeometry, scheme: IndentScheme) -> BTreeMap<RegionName, u32> {
    let mut indents = BTreeMap::new();
    let mut counter = 0_u32;
    let mut shifted = false;

    for region in geometry.regions() {
        let indent = if !region.is_colliding() {
            0
        } else {
            match scheme {
                IndentScheme::Inline => 0,
                IndentScheme::Linear => {
                    let indent = counter;
                    counter = counter.saturating_add(INDENT_STEP);
                    indent
                }
                IndentScheme::Alternate => {
                    let indent = if shifted { INDENT_STEP } else { 0 };
                    shifted = !shifted;
                    indent
                }
            }
        };
        indents.insert(region.name().clone(), indent);
    }

    indents
}
