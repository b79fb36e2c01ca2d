// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Region fill colours.
//!
//! Every region takes a distinct colour from a fixed palette. The allocator owns the
//! remaining colours, so two diagrams rendered in one process never share state.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::ids::{MapName, RegionName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    name: &'static str,
    rgb: [u8; 3],
}

impl Colour {
    pub const fn new(name: &'static str, rgb: [u8; 3]) -> Self {
        Self { name, rgb }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// The same hue at 60% brightness, used for outlines.
    pub fn darker(&self) -> [u8; 3] {
        self.rgb.map(|channel| (u16::from(channel) * 3 / 5) as u8)
    }
}

pub const PALETTE: &[Colour] = &[
    Colour::new("steelblue", [70, 130, 180]),
    Colour::new("indianred", [205, 92, 92]),
    Colour::new("seagreen", [46, 139, 87]),
    Colour::new("goldenrod", [218, 165, 32]),
    Colour::new("mediumpurple", [147, 112, 219]),
    Colour::new("darkorange", [255, 140, 0]),
    Colour::new("cadetblue", [95, 158, 160]),
    Colour::new("palevioletred", [219, 112, 147]),
    Colour::new("olivedrab", [107, 142, 35]),
    Colour::new("sandybrown", [244, 164, 96]),
    Colour::new("slateblue", [106, 90, 205]),
    Colour::new("teal", [0, 128, 128]),
    Colour::new("tomato", [255, 99, 71]),
    Colour::new("darkkhaki", [189, 183, 107]),
    Colour::new("orchid", [218, 112, 214]),
    Colour::new("lightseagreen", [32, 178, 170]),
    Colour::new("peru", [205, 133, 63]),
    Colour::new("cornflowerblue", [100, 149, 237]),
    Colour::new("yellowgreen", [154, 205, 50]),
    Colour::new("rosybrown", [188, 143, 143]),
    Colour::new("darkseagreen", [143, 188, 143]),
    Colour::new("plum", [221, 160, 221]),
    Colour::new("burlywood", [222, 184, 135]),
    Colour::new("lightslategray", [119, 136, 153]),
    Colour::new("salmon", [250, 128, 114]),
    Colour::new("mediumaquamarine", [102, 205, 170]),
    Colour::new("khaki", [240, 230, 140]),
    Colour::new("thistle", [216, 191, 216]),
    Colour::new("lightcoral", [240, 128, 128]),
    Colour::new("skyblue", [135, 206, 235]),
    Colour::new("darkcyan", [0, 139, 139]),
    Colour::new("chocolate", [210, 105, 30]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    /// Every palette colour is already in use.
    Exhausted { map: MapName, region: RegionName },
}

impl fmt::Display for ColourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { map, region } => {
                write!(f, "no colours left for region '{region}' in map '{map}'")
            }
        }
    }
}

impl std::error::Error for ColourError {}

pub struct ColourAllocator {
    remaining: Vec<Colour>,
    rng: StdRng,
}

impl ColourAllocator {
    /// Deterministic allocation: the same seed always yields the same colours in the same order.
    pub fn seeded(seed: u64) -> Self {
        Self::with_palette(PALETTE, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_palette(PALETTE, StdRng::from_entropy())
    }

    pub fn with_palette(palette: &[Colour], rng: StdRng) -> Self {
        Self {
            remaining: palette.to_vec(),
            rng,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Takes a random colour out of the pool.
    pub fn allocate(&mut self, map: &MapName, region: &RegionName) -> Result<Colour, ColourError> {
        if self.remaining.is_empty() {
            return Err(ColourError::Exhausted {
                map: map.clone(),
                region: region.clone(),
            });
        }

        let index = self.rng.gen_range(0..self.remaining.len());
        Ok(self.remaining.swap_remove(index))
    }
}
