// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram input formats.
//!
//! Both formats end in [`crate::model::DiagramBuilder`], so they share all validation.

pub mod cli_regions;
pub mod json;

pub use cli_regions::{diagram_from_regions, parse_region_tuples, CliRegionsError};
pub use json::{
    diagram_schema_json, load_diagram_file, read_diagram_config, AddressValue, ConfigError,
    DiagramConfig, MapConfig, RegionConfig,
};
