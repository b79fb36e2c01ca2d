// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A diagram holds ordered memory maps; a map holds named regions. Everything here is
//! validated on construction and read-only afterwards.

pub mod address;
pub mod builder;
pub mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod memory_map;
pub mod region;
pub mod validation;

pub use address::{format_address, format_signed, parse_address, ParseAddressError};
pub use builder::{DiagramBuilder, DuplicateRegionPolicy, RawAddress, RegionInput};
pub use diagram::{Diagram, IndentScheme, ParseIndentSchemeError};
pub use ids::{MapName, Name, NameError, RegionName};
pub use memory_map::MemoryMap;
pub use region::{Region, RegionError, RegionLink};
pub use validation::ValidationError;
