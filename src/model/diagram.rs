// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::Deserialize;

use super::memory_map::MemoryMap;
use crate::layout::links::ResolvedLink;

pub const DEFAULT_DIAGRAM_NAME: &str = "Memory Map Diagram";
pub const DEFAULT_PIXEL_WIDTH: u32 = 400;
pub const DEFAULT_PIXEL_HEIGHT: u32 = 1000;
pub const DEFAULT_VOID_THRESHOLD: u64 = 0x1000;

/// How colliding regions are shifted sideways so overlaps stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndentScheme {
    #[default]
    Linear,
    Alternate,
    Inline,
}

impl IndentScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Alternate => "alternate",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for IndentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndentSchemeError {
    value: String,
}

impl fmt::Display for ParseIndentSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid indent scheme '{}' (expected linear, alternate or inline)", self.value)
    }
}

impl std::error::Error for ParseIndentSchemeError {}

impl FromStr for IndentScheme {
    type Err = ParseIndentSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "alternate" => Ok(Self::Alternate),
            "inline" => Ok(Self::Inline),
            _ => Err(ParseIndentSchemeError { value: s.to_owned() }),
        }
    }
}

/// A validated diagram: ordered maps plus their resolved cross-map links.
///
/// Map order is drawing order (left to right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    name: String,
    pixel_width: u32,
    pixel_height: u32,
    void_threshold: u64,
    indent_scheme: IndentScheme,
    maps: Vec<MemoryMap>,
    links: Vec<ResolvedLink>,
}

impl Diagram {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        pixel_width: u32,
        pixel_height: u32,
        void_threshold: u64,
        indent_scheme: IndentScheme,
        maps: Vec<MemoryMap>,
        links: Vec<ResolvedLink>,
    ) -> Self {
        Self {
            name,
            pixel_width,
            pixel_height,
            void_threshold,
            indent_scheme,
            maps,
            links,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn void_threshold(&self) -> u64 {
        self.void_threshold
    }

    pub fn indent_scheme(&self) -> IndentScheme {
        self.indent_scheme
    }

    pub fn maps(&self) -> &[MemoryMap] {
        &self.maps
    }

    pub fn map(&self, name: &str) -> Option<&MemoryMap> {
        self.maps.iter().find(|map| map.name().as_str() == name)
    }

    pub fn links(&self) -> &[ResolvedLink] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::IndentScheme;

    #[test]
    fn indent_scheme_roundtrips_via_str() {
        for scheme in [IndentScheme::Linear, IndentScheme::Alternate, IndentScheme::Inline] {
            let parsed: IndentScheme = scheme.as_str().parse().expect("parse");
            assert_eq!(parsed, scheme);
            assert_eq!(parsed.to_string(), scheme.as_str());
        }
    }

    #[test]
    fn indent_scheme_rejects_unknown_values() {
        let err = "diagonal".parse::<IndentScheme>().unwrap_err();
        assert!(err.to_string().contains("diagonal"));
    }
}
