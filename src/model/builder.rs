// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single entry point for turning user input into a validated [`Diagram`].
//!
//! Validation is eager: every `add_*` call checks its own input, and [`DiagramBuilder::build`]
//! checks whole-diagram invariants (non-empty maps, link integrity). Nothing partial is ever
//! returned.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::address::{parse_address, ParseAddressError};
use super::diagram::{
    Diagram, IndentScheme, DEFAULT_DIAGRAM_NAME, DEFAULT_PIXEL_HEIGHT, DEFAULT_PIXEL_WIDTH,
    DEFAULT_VOID_THRESHOLD,
};
use super::ids::{MapName, RegionName};
use super::memory_map::MemoryMap;
use super::region::{Region, RegionError, RegionLink};
use super::validation::ValidationError;
use crate::layout::links::resolve_links;

/// An address or size as supplied by the user, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAddress {
    Number(u64),
    Text(String),
}

impl RawAddress {
    pub fn resolve(&self) -> Result<u64, ParseAddressError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_address(text),
        }
    }
}

impl From<u64> for RawAddress {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAddress {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawAddress {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Unvalidated region input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionInput {
    pub name: String,
    pub origin: RawAddress,
    pub size: RawAddress,
    /// `(target map, target region)` pairs.
    pub links: Vec<(String, String)>,
}

impl RegionInput {
    pub fn new(
        name: impl Into<String>,
        origin: impl Into<RawAddress>,
        size: impl Into<RawAddress>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            size: size.into(),
            links: Vec::new(),
        }
    }

    pub fn with_link(mut self, map: impl Into<String>, region: impl Into<String>) -> Self {
        self.links.push((map.into(), region.into()));
        self
    }
}

/// What to do when a map receives a second region with an existing name.
///
/// Structured (JSON) input always rejects. The CLI tuple form historically warned and
/// kept the first definition; that leniency is available as an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateRegionPolicy {
    #[default]
    Reject,
    WarnAndSkip,
}

impl DuplicateRegionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::WarnAndSkip => "skip",
        }
    }
}

impl fmt::Display for DuplicateRegionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDuplicateRegionPolicyError {
    value: String,
}

impl fmt::Display for ParseDuplicateRegionPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duplicate policy '{}' (expected reject or skip)", self.value)
    }
}

impl std::error::Error for ParseDuplicateRegionPolicyError {}

impl FromStr for DuplicateRegionPolicy {
    type Err = ParseDuplicateRegionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::WarnAndSkip),
            _ => Err(ParseDuplicateRegionPolicyError { value: s.to_owned() }),
        }
    }
}

#[derive(Debug)]
struct MapDraft {
    name: MapName,
    user_max_address: Option<u64>,
    regions: BTreeMap<RegionName, Region>,
}

#[derive(Debug)]
pub struct DiagramBuilder {
    name: String,
    pixel_width: u32,
    pixel_height: u32,
    void_threshold: u64,
    indent_scheme: IndentScheme,
    duplicate_policy: DuplicateRegionPolicy,
    maps: Vec<MapDraft>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGRAM_NAME)
    }
}

impl DiagramBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pixel_width: DEFAULT_PIXEL_WIDTH,
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            void_threshold: DEFAULT_VOID_THRESHOLD,
            indent_scheme: IndentScheme::default(),
            duplicate_policy: DuplicateRegionPolicy::default(),
            maps: Vec::new(),
        }
    }

    pub fn pixel_size(mut self, width: u32, height: u32) -> Self {
        self.pixel_width = width;
        self.pixel_height = height;
        self
    }

    pub fn void_threshold(mut self, void_threshold: u64) -> Self {
        self.void_threshold = void_threshold;
        self
    }

    pub fn indent_scheme(mut self, indent_scheme: IndentScheme) -> Self {
        self.indent_scheme = indent_scheme;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicateRegionPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Declares a map. Maps are drawn in declaration order.
    pub fn add_map(
        &mut self,
        name: &str,
        max_address: Option<RawAddress>,
    ) -> Result<&mut Self, ValidationError> {
        let map_name = MapName::new(name).map_err(|source| ValidationError::InvalidMapName {
            value: name.to_owned(),
            source,
        })?;

        if self.maps.iter().any(|draft| draft.name == map_name) {
            return Err(ValidationError::DuplicateMap { map: map_name });
        }

        let user_max_address = max_address
            .map(|raw| raw.resolve())
            .transpose()
            .map_err(|source| ValidationError::InvalidMaxAddress { map: map_name.clone(), source })?;

        self.maps.push(MapDraft {
            name: map_name,
            user_max_address,
            regions: BTreeMap::new(),
        });
        Ok(self)
    }

    /// Adds a region to a previously declared map.
    pub fn add_region(
        &mut self,
        map: &str,
        input: RegionInput,
    ) -> Result<&mut Self, ValidationError> {
        let policy = self.duplicate_policy;
        let draft = self
            .maps
            .iter_mut()
            .find(|draft| draft.name.as_str() == map)
            .ok_or_else(|| ValidationError::UnknownMap { map: map.to_owned() })?;

        let region = build_region(&draft.name, input)?;

        match draft.regions.entry(region.name().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(region);
            }
            Entry::Occupied(existing) => match policy {
                DuplicateRegionPolicy::Reject => {
                    return Err(ValidationError::DuplicateRegion {
                        map: draft.name.clone(),
                        region: existing.key().clone(),
                    });
                }
                DuplicateRegionPolicy::WarnAndSkip => {
                    tracing::warn!(
                        map = %draft.name,
                        region = %existing.key(),
                        "duplicate region name; keeping the first definition and skipping this one"
                    );
                }
            },
        }

        Ok(self)
    }

    pub fn build(self) -> Result<Diagram, ValidationError> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(ValidationError::InvalidDimensions {
                width: self.pixel_width,
                height: self.pixel_height,
            });
        }

        if self.maps.is_empty() {
            return Err(ValidationError::NoMaps);
        }

        let maps = self
            .maps
            .into_iter()
            .map(|draft| {
                if draft.regions.is_empty() {
                    return Err(ValidationError::EmptyMap { map: draft.name });
                }
                Ok(MemoryMap::new(draft.name, draft.regions, draft.user_max_address))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let links = resolve_links(&maps)?;

        Ok(Diagram::new(
            self.name,
            self.pixel_width,
            self.pixel_height,
            self.void_threshold,
            self.indent_scheme,
            maps,
            links,
        ))
    }
}

fn build_region(map: &MapName, input: RegionInput) -> Result<Region, ValidationError> {
    let name = RegionName::new(&input.name).map_err(|source| {
        ValidationError::InvalidRegionName {
            map: map.clone(),
            value: input.name.clone(),
            source,
        }
    })?;

    let origin = input.origin.resolve().map_err(|source| ValidationError::InvalidOrigin {
        map: map.clone(),
        region: name.clone(),
        source,
    })?;
    let size = input.size.resolve().map_err(|source| ValidationError::InvalidSize {
        map: map.clone(),
        region: name.clone(),
        source,
    })?;

    let links = input
        .links
        .iter()
        .map(|(target_map, target_region)| {
            let invalid = |value: &str, source| ValidationError::InvalidLinkTarget {
                map: map.clone(),
                region: name.clone(),
                value: value.to_owned(),
                source,
            };
            let target_map = MapName::new(target_map).map_err(|err| invalid(target_map, err))?;
            let target_region =
                RegionName::new(target_region).map_err(|err| invalid(target_region, err))?;
            Ok(RegionLink::new(target_map, target_region))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let region = Region::new(name.clone(), origin, size).map_err(|err| match err {
        RegionError::ZeroSize => ValidationError::ZeroSize { map: map.clone(), region: name.clone() },
        RegionError::AddressOverflow { origin, size } => ValidationError::AddressOverflow {
            map: map.clone(),
            region: name.clone(),
            origin,
            size,
        },
    })?;

    Ok(region.with_links(links))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DiagramBuilder, DuplicateRegionPolicy, RawAddress, RegionInput};
    use crate::model::{ParseAddressError, ValidationError};

    fn single_map_builder() -> DiagramBuilder {
        let mut builder = DiagramBuilder::default();
        builder.add_map("flash", None).expect("map");
        builder
    }

    #[test]
    fn builds_a_diagram_with_defaults() {
        let mut builder = single_map_builder();
        builder.add_region("flash", RegionInput::new("kernel", "0x10", "0x30")).expect("region");

        let diagram = builder.build().expect("diagram");
        assert_eq!(diagram.name(), "Memory Map Diagram");
        assert_eq!((diagram.pixel_width(), diagram.pixel_height()), (400, 1000));
        assert_eq!(diagram.void_threshold(), 0x1000);

        let map = diagram.map("flash").expect("flash");
        let kernel = map.region("kernel").expect("kernel");
        assert_eq!((kernel.origin(), kernel.size(), kernel.end()), (0x10, 0x30, 0x40));
    }

    #[rstest]
    #[case::empty_origin(RegionInput::new("kernel", "", "0x30"), "origin")]
    #[case::bad_origin(RegionInput::new("kernel", "0xnope", "0x30"), "origin")]
    #[case::bad_size(RegionInput::new("kernel", "0x10", "-3"), "size")]
    fn rejects_malformed_addresses(#[case] input: RegionInput, #[case] field: &str) {
        let mut builder = single_map_builder();
        let err = builder.add_region("flash", input).unwrap_err();

        match (field, &err) {
            ("origin", ValidationError::InvalidOrigin { region, .. })
            | ("size", ValidationError::InvalidSize { region, .. }) => {
                assert_eq!(region.as_str(), "kernel");
            }
            _ => panic!("unexpected error for {field}: {err:?}"),
        }
    }

    #[test]
    fn rejects_empty_origin_with_parse_error_detail() {
        let mut builder = single_map_builder();
        let err = builder.add_region("flash", RegionInput::new("kernel", " ", 0x30_u64)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidOrigin { source: ParseAddressError::Empty, .. }
        ));
    }

    #[test]
    fn rejects_zero_size_and_empty_names() {
        let mut builder = single_map_builder();
        let err = builder.add_region("flash", RegionInput::new("kernel", 0x10_u64, 0_u64)).unwrap_err();
        assert!(matches!(err, ValidationError::ZeroSize { .. }));

        let err = builder.add_region("flash", RegionInput::new("", 0x10_u64, 0x10_u64)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRegionName { .. }));

        let mut builder = DiagramBuilder::default();
        let err = builder.add_map("", None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMapName { .. }));
    }

    #[test]
    fn rejects_duplicate_regions_by_default() {
        let mut builder = single_map_builder();
        builder.add_region("flash", RegionInput::new("kernel", 0x10_u64, 0x30_u64)).expect("first");
        let err = builder.add_region("flash", RegionInput::new("kernel", 0x90_u64, 0x30_u64)).unwrap_err();
        assert_eq!(err.to_string(), "map 'flash': duplicate region name 'kernel'");
    }

    #[test]
    fn skips_duplicate_regions_when_policy_allows() {
        let mut builder =
            DiagramBuilder::default().duplicate_policy(DuplicateRegionPolicy::WarnAndSkip);
        builder.add_map("flash", None).expect("map");
        builder.add_region("flash", RegionInput::new("kernel", 0x10_u64, 0x30_u64)).expect("first");
        builder.add_region("flash", RegionInput::new("kernel", 0x90_u64, 0x30_u64)).expect("skipped");

        let diagram = builder.build().expect("diagram");
        let map = diagram.map("flash").expect("flash");
        assert_eq!(map.regions().len(), 1);
        assert_eq!(map.region("kernel").expect("kernel").origin(), 0x10);
    }

    #[test]
    fn rejects_duplicate_maps_and_unknown_maps() {
        let mut builder = single_map_builder();
        assert!(matches!(
            builder.add_map("flash", None).unwrap_err(),
            ValidationError::DuplicateMap { .. }
        ));
        assert!(matches!(
            builder.add_region("ram", RegionInput::new("kernel", 0_u64, 1_u64)).unwrap_err(),
            ValidationError::UnknownMap { .. }
        ));
    }

    #[test]
    fn rejects_empty_maps_and_zero_dimensions() {
        let builder = single_map_builder();
        assert!(matches!(builder.build().unwrap_err(), ValidationError::EmptyMap { .. }));

        assert_eq!(DiagramBuilder::default().build().unwrap_err(), ValidationError::NoMaps);

        let mut builder = DiagramBuilder::default().pixel_size(0, 100);
        builder.add_map("flash", None).expect("map");
        builder.add_region("flash", RegionInput::new("kernel", 0_u64, 1_u64)).expect("region");
        assert_eq!(
            builder.build().unwrap_err(),
            ValidationError::InvalidDimensions { width: 0, height: 100 }
        );
    }

    #[test]
    fn parses_user_max_address() {
        let mut builder = DiagramBuilder::default();
        builder.add_map("flash", Some(RawAddress::from("0x1000"))).expect("map");
        builder.add_region("flash", RegionInput::new("kernel", 0_u64, 1_u64)).expect("region");
        let diagram = builder.build().expect("diagram");
        assert_eq!(diagram.map("flash").unwrap().user_max_address(), Some(0x1000));

        let mut builder = DiagramBuilder::default();
        let err = builder.add_map("flash", Some(RawAddress::from("top"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMaxAddress { .. }));
    }

    #[test]
    fn preserves_map_declaration_order() {
        let mut builder = DiagramBuilder::default();
        for map in ["sram", "flash", "dram"] {
            builder.add_map(map, None).expect("map");
            builder.add_region(map, RegionInput::new("r", 0_u64, 1_u64)).expect("region");
        }
        let diagram = builder.build().expect("diagram");
        let names = diagram.maps().iter().map(|m| m.name().as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["sram", "flash", "dram"]);
    }
}
