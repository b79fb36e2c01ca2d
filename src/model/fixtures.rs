// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::builder::{DiagramBuilder, RawAddress, RegionInput};
use super::diagram::{Diagram, IndentScheme};

/// One map named `flash` holding `(name, origin, size)` regions.
pub(crate) fn single_map(regions: &[(&str, u64, u64)], max_address: Option<u64>) -> Diagram {
    single_map_with(DiagramBuilder::default(), regions, max_address)
}

pub(crate) fn single_map_with(
    mut builder: DiagramBuilder,
    regions: &[(&str, u64, u64)],
    max_address: Option<u64>,
) -> Diagram {
    builder.add_map("flash", max_address.map(RawAddress::from)).expect("map");
    for &(name, origin, size) in regions {
        builder.add_region("flash", RegionInput::new(name, origin, size)).expect("region");
    }
    builder.build().expect("diagram")
}

/// Three evenly spaced boot regions below a 1000 byte top.
pub(crate) fn boot_layout() -> Diagram {
    single_map(&[("kernel", 0x10, 0x30), ("rootfs", 0x50, 0x30), ("dtb", 0x90, 0x30)], Some(1000))
}

/// Same as [`boot_layout`] but the kernel grows into the rootfs.
pub(crate) fn boot_layout_with_collision() -> Diagram {
    single_map(&[("kernel", 0x10, 0x60), ("rootfs", 0x50, 0x30), ("dtb", 0x90, 0x30)], Some(1000))
}

/// Flash image whose sections are copied into RAM at boot.
pub(crate) fn flash_and_ram() -> Diagram {
    let mut builder = DiagramBuilder::new("Boot copy").indent_scheme(IndentScheme::Alternate);
    builder.add_map("flash", Some(RawAddress::from("0x20000"))).expect("flash");
    builder.add_map("ram", None).expect("ram");

    builder
        .add_region("flash", RegionInput::new("vectors", "0x0", "0x400"))
        .expect("vectors");
    builder
        .add_region("flash", RegionInput::new("text", "0x400", "0x8000"))
        .expect("text");
    builder
        .add_region("flash", RegionInput::new("data_lma", "0x8400", "0x1000").with_link("ram", "data"))
        .expect("data_lma");

    builder
        .add_region("ram", RegionInput::new("data", "0x20000000", "0x1000"))
        .expect("data");
    builder
        .add_region("ram", RegionInput::new("bss", "0x20001000", "0x2000"))
        .expect("bss");
    builder
        .add_region("ram", RegionInput::new("heap", "0x20002800", "0x4000"))
        .expect("heap");
    builder
        .add_region("ram", RegionInput::new("stack", "0x2000f000", "0x1000"))
        .expect("stack");

    builder.build().expect("diagram")
}
