// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Wire formats for the two inputs loaded before the first frame: a
//! GeoJSON-like boundary feature collection and the displacement
//! origin/destination matrix.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::Result;

/// An ordered sequence of (longitude, latitude) pairs, closed implicitly.
pub type Ring = Vec<[f64; 2]>;

/// The sentinel destination name marking the origin-totals row.
pub const TOTAL_ROW: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_json_str(contents: &str) -> Result<FeatureCollection> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(rename = "NAME_1", skip_serializing_if = "Option::is_none", default)]
    pub name_1: Option<String>,
}

impl Properties {
    /// The boundary-source region name; `name` wins over `NAME_1`.
    pub fn region_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.name_1.as_deref())
    }
}

/// Region geometry as it appears on the wire. Only outer rings (ring
/// index 0 of each polygon) matter to us; holes are ignored by design
/// since administrative regions are treated as solid shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// Iterate over the outer ring of every polygon part.
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> {
        let rings: Vec<&Ring> = match self {
            Geometry::Polygon { coordinates } => coordinates.first().into_iter().collect(),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().filter_map(|poly| poly.first()).collect()
            }
        };
        rings.into_iter()
    }

    /// The first polygon's outer ring, used for centroid/label anchors.
    pub fn first_outer_ring(&self) -> Option<&Ring> {
        self.outer_rings().next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplacementData {
    #[serde(default)]
    pub data: Vec<DisplacementRow>,
}

/// One destination's share of the displacement matrix: how many people
/// arrived here, broken down by the region they fled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplacementRow {
    pub state_of_displacement: String,
    #[serde(default)]
    pub by_state_of_origin: HashMap<String, u64>,
}

impl DisplacementRow {
    pub fn count_for(&self, origin: &str) -> u64 {
        self.by_state_of_origin.get(origin).copied().unwrap_or(0)
    }
}

impl DisplacementData {
    pub fn from_json_str(contents: &str) -> Result<DisplacementData> {
        Ok(serde_json::from_str(contents)?)
    }

    /// The distinguished row holding per-origin totals across all
    /// destinations, used to enumerate active origins.
    pub fn totals_row(&self) -> Option<&DisplacementRow> {
        self.data
            .iter()
            .find(|row| row.state_of_displacement == TOTAL_ROW)
    }

    /// Every row keyed by an actual destination region.
    pub fn destination_rows(&self) -> impl Iterator<Item = &DisplacementRow> {
        self.data
            .iter()
            .filter(|row| row.state_of_displacement != TOTAL_ROW)
    }
}
