// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `NAME ORIGIN SIZE` triples given on the command line.

use std::fmt;

use crate::model::builder::{DiagramBuilder, RawAddress, RegionInput};
use crate::model::diagram::Diagram;
use crate::model::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliRegionsError {
    /// The value count is not a multiple of three.
    Arity { count: usize },
    Validation { source: ValidationError },
}

impl fmt::Display for CliRegionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { count } => write!(
                f,
                "--regions expects NAME ORIGIN SIZE triples, got {count} value(s)"
            ),
            Self::Validation { source } => write!(f, "invalid region: {source}"),
        }
    }
}

impl std::error::Error for CliRegionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Arity { .. } => None,
            Self::Validation { source } => Some(source),
        }
    }
}

pub fn parse_region_tuples<S: AsRef<str>>(values: &[S]) -> Result<Vec<RegionInput>, CliRegionsError> {
    if values.is_empty() || values.len() % 3 != 0 {
        return Err(CliRegionsError::Arity {
            count: values.len(),
        });
    }

    Ok(values
        .chunks_exact(3)
        .map(|triple| {
            RegionInput::new(triple[0].as_ref(), triple[1].as_ref(), triple[2].as_ref())
        })
        .collect())
}

/// Builds a one-map diagram; the map takes the diagram's name.
///
/// `builder` carries the dimensions and duplicate policy chosen on the command line.
pub fn diagram_from_regions(
    mut builder: DiagramBuilder,
    map_name: &str,
    max_address: Option<RawAddress>,
    regions: Vec<RegionInput>,
) -> Result<Diagram, CliRegionsError> {
    let validation = |source| CliRegionsError::Validation { source };

    builder.add_map(map_name, max_address).map_err(validation)?;
    for region in regions {
        builder.add_region(map_name, region).map_err(validation)?;
    }
    builder.build().map_err(validation)
}
