// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! mmdiagram: memory-map diagrams from named address regions.
//!
//! - [`model`] validates input into an immutable [`model::Diagram`].
//! - [`layout`] derives free space, collisions, scale, voids and indents, then places
//!   everything on a pixel canvas.
//! - [`render`] writes the PNG, the markdown report and a text preview.
//! - [`format`] reads JSON configuration and command-line region triples.

pub mod format;
pub mod layout;
pub mod model;
pub mod render;
