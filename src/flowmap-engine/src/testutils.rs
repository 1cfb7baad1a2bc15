// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Shared fixture builders for unit tests.

use std::collections::HashMap;

use crate::agents::Agent;
use crate::datamodel::{
    DisplacementData, DisplacementRow, Feature, FeatureCollection, Geometry, Properties,
};
use crate::geom::Point;

/// An axis-aligned square region with its lower-left corner at
/// (lon0, lat0).
pub(crate) fn square_feature(name: &str, lon0: f64, lat0: f64, size: f64) -> Feature {
    Feature {
        properties: Properties {
            name: Some(name.to_owned()),
            name_1: None,
        },
        geometry: Geometry::Polygon {
            coordinates: vec![vec![
                [lon0, lat0],
                [lon0 + size, lat0],
                [lon0 + size, lat0 + size],
                [lon0, lat0 + size],
            ]],
        },
    }
}

pub(crate) fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { features }
}

pub(crate) fn displacement_row(destination: &str, counts: &[(&str, u64)]) -> DisplacementRow {
    let by_state_of_origin: HashMap<String, u64> = counts
        .iter()
        .map(|&(name, count)| (name.to_owned(), count))
        .collect();
    DisplacementRow {
        state_of_displacement: destination.to_owned(),
        by_state_of_origin,
    }
}

pub(crate) fn displacement(rows: Vec<DisplacementRow>) -> DisplacementData {
    DisplacementData { data: rows }
}

/// An agent pinned to explicit endpoints, for export tests.
pub(crate) fn segment_agent(x1: f64, y1: f64, x2: f64, y2: f64) -> Agent {
    Agent::new(
        Point::new(x1, y1),
        Point::new(x2, y2),
        "origin".to_owned(),
        "destination".to_owned(),
    )
}
