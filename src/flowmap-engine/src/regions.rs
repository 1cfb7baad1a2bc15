// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Canonical region names and projected region geometry.
//!
//! The boundary dataset and the displacement statistics name Sudan's
//! states independently; a fixed alias table bridges the two. The index
//! itself is projection-dependent (centroids live in screen space) and
//! is rebuilt wholesale whenever the projection changes.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::datamodel::FeatureCollection;
use crate::geom::{polygon_centroid, Point};
use crate::projection::Projection;

lazy_static! {
    /// Boundary-source name → statistical-source name, one entry per
    /// state in the boundary dataset.
    static ref BOUNDARY_NAME_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Gezira", "Aj Jazirah");
        m.insert("Gadarif", "Gedaref");
        m.insert("Blue Nile", "Blue Nile");
        m.insert("Central Darfur", "Central Darfur");
        m.insert("East Darfur", "East Darfur");
        m.insert("Khartoum", "Khartoum");
        m.insert("North Darfur", "North Darfur");
        m.insert("North Kordofan", "North Kordofan");
        m.insert("Northern", "Northern");
        m.insert("Red Sea", "Red Sea");
        m.insert("River Nile", "River Nile");
        m.insert("Sennar", "Sennar");
        m.insert("South Darfur", "South Darfur");
        m.insert("South Kordofan", "South Kordofan");
        m.insert("West Darfur", "West Darfur");
        m.insert("West Kordofan", "West Kordofan");
        m.insert("White Nile", "White Nile");
        m.insert("Kassala", "Kassala");
        m
    };
}

/// Resolve a boundary-source name to its canonical (statistical) name,
/// falling back to the raw name verbatim when no alias exists.
pub fn resolve_name(name: &str) -> &str {
    BOUNDARY_NAME_ALIASES.get(name).copied().unwrap_or(name)
}

/// One region's projected shape: the outer ring of each polygon part,
/// plus the centroid of the first part (the label/fallback anchor).
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    /// Projected outer rings, one per polygon part.
    pub rings: Vec<Vec<Point>>,
    /// Centroid of the first ring, in screen space.
    pub centroid: Point,
}

/// Canonical name → projected geometry and centroid.
#[derive(Clone, Debug, Default)]
pub struct RegionIndex {
    regions: HashMap<String, Region>,
}

impl RegionIndex {
    /// Project every feature's outer rings and derive centroids.
    /// Features without a usable name or ring are skipped with a
    /// diagnostic. Idempotent for identical inputs.
    pub fn build(boundaries: &FeatureCollection, projection: &Projection) -> RegionIndex {
        let mut regions = HashMap::new();

        for feature in &boundaries.features {
            let Some(raw_name) = feature.properties.region_name() else {
                eprintln!("skipping unnamed boundary feature");
                continue;
            };
            let name = resolve_name(raw_name);

            let rings: Vec<Vec<Point>> = feature
                .geometry
                .outer_rings()
                .map(|ring| projection.project_ring(ring))
                .collect();
            let Some(first_ring) = rings.first() else {
                eprintln!("skipping region '{name}': no outer ring");
                continue;
            };

            let centroid = polygon_centroid(first_ring);
            regions.insert(
                name.to_owned(),
                Region {
                    name: name.to_owned(),
                    rings,
                    centroid,
                },
            );
        }

        RegionIndex { regions }
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn centroid(&self, name: &str) -> Option<Point> {
        self.regions.get(name).map(|r| r.centroid)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
