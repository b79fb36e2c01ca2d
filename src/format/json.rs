// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON diagram configuration.
//!
//! Duplicate region names are always rejected here; only CLI tuples may opt into skipping.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::model::builder::{DiagramBuilder, RawAddress, RegionInput};
use crate::model::diagram::{
    Diagram, IndentScheme, DEFAULT_DIAGRAM_NAME, DEFAULT_PIXEL_HEIGHT, DEFAULT_PIXEL_WIDTH,
};
use crate::model::validation::ValidationError;

/// An address or size: a JSON integer, or a decimal / `0x` hexadecimal string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AddressValue {
    Number(u64),
    Text(String),
}

impl From<AddressValue> for RawAddress {
    fn from(value: AddressValue) -> Self {
        match value {
            AddressValue::Number(value) => RawAddress::Number(value),
            AddressValue::Text(text) => RawAddress::Text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    pub name: String,
    pub origin: AddressValue,
    pub size: AddressValue,
    /// `[map, region]` pairs naming same-sized regions in other maps.
    #[serde(default)]
    pub links: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    pub name: String,
    /// Top of the map. Calculated from the regions when omitted.
    #[serde(default)]
    pub max_address: Option<AddressValue>,
    pub regions: Vec<RegionConfig>,
}

/// Root of a diagram configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DiagramConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub void_threshold: Option<AddressValue>,
    #[serde(default)]
    pub indent_scheme: IndentScheme,
    /// Drawn left to right in this order.
    pub maps: Vec<MapConfig>,
}

fn default_name() -> String {
    DEFAULT_DIAGRAM_NAME.to_owned()
}

fn default_width() -> u32 {
    DEFAULT_PIXEL_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_PIXEL_HEIGHT
}

impl DiagramConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn into_diagram(self) -> Result<Diagram, ValidationError> {
        let mut builder = DiagramBuilder::new(self.name)
            .pixel_size(self.width, self.height)
            .indent_scheme(self.indent_scheme);

        if let Some(threshold) = self.void_threshold {
            let threshold = RawAddress::from(threshold)
                .resolve()
                .map_err(|source| ValidationError::InvalidVoidThreshold { source })?;
            builder = builder.void_threshold(threshold);
        }

        for map in &self.maps {
            builder.add_map(&map.name, map.max_address.clone().map(RawAddress::from))?;
        }
        for map in self.maps {
            for region in map.regions {
                let input = region.links.into_iter().fold(
                    RegionInput::new(region.name, region.origin, region.size),
                    |input, (target_map, target_region)| input.with_link(target_map, target_region),
                );
                builder.add_region(&map.name, input)?;
            }
        }

        builder.build()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Validation {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } | Self::Validation { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Validation { path, source } => write!(f, "invalid diagram in {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Validation { source, .. } => Some(source),
        }
    }
}

pub fn read_diagram_config(path: impl AsRef<Path>) -> Result<DiagramConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    DiagramConfig::from_json(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_diagram_file(path: impl AsRef<Path>) -> Result<Diagram, ConfigError> {
    let path = path.as_ref();
    read_diagram_config(path)?
        .into_diagram()
        .map_err(|source| ConfigError::Validation {
            path: path.to_path_buf(),
            source,
        })
}

/// JSON schema of [`DiagramConfig`], pretty printed.
pub fn diagram_schema_json() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(DiagramConfig);
    serde_json::to_string_pretty(&schema)
}
