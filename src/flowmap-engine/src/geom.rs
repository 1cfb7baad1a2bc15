// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::f64::consts::PI;
use std::ops::{Add, Sub};

use float_cmp::approx_eq;

use crate::common::Result;
use crate::datamodel::FeatureCollection;
use crate::sim_err;

/// 2D point/vector in screen space.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle from `self` to `other` in radians, in [-pi, pi].
    pub fn angle_to(self, other: Self) -> f64 {
        let delta = other - self;
        delta.y.atan2(delta.x)
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Axis-aligned bounding box in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// Bounding box over a set of points; `None` for an empty slice.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect { min, max })
}

// Guards the horizontal-edge case in the ray cast, where yj == yi.
const RAY_EPSILON: f64 = 1e-7;

/// Even-odd ray casting against a closed ring of projected vertices.
///
/// The ring is implicitly closed: the last vertex connects back to the
/// first. Points exactly on an edge may land on either side.
pub fn point_in_polygon(point: Point, ring: &[Point]) -> bool {
    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for (i, vi) in ring.iter().enumerate() {
        let vj = ring[j];
        let intersect = ((vi.y > y) != (vj.y > y))
            && (x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y + RAY_EPSILON) + vi.x);
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Signed-area (shoelace) centroid of a closed ring.
///
/// Computed in already-projected screen space, so it stays correct under
/// whatever scale the projection applied. Degenerate rings (zero area,
/// e.g. collinear or repeated points) fall back to the bounding-box
/// center rather than dividing by zero.
pub fn polygon_centroid(ring: &[Point]) -> Point {
    let n = ring.len();
    if n == 0 {
        return Point::default();
    }

    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        let a = p0.x * p1.y - p1.x * p0.y;
        area += a;
        cx += (p0.x + p1.x) * a;
        cy += (p0.y + p1.y) * a;
    }
    area /= 2.0;

    if approx_eq!(f64, area, 0.0) {
        // bounding_rect is Some: n > 0
        return bounding_rect(ring).map(|r| r.center()).unwrap_or_default();
    }

    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Geographic bounding box in (longitude, latitude) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl GeoBounds {
    pub fn lon_range(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_range(&self) -> f64 {
        self.lat_max - self.lat_min
    }
}

/// Scan every polygon's outer ring across the whole feature collection.
///
/// Holes don't extend a shape's extent, so skipping them here is exact,
/// not an approximation.
pub fn geo_bounds(boundaries: &FeatureCollection) -> Result<GeoBounds> {
    let mut lon_min = f64::INFINITY;
    let mut lat_min = f64::INFINITY;
    let mut lon_max = f64::NEG_INFINITY;
    let mut lat_max = f64::NEG_INFINITY;

    let mut saw_vertex = false;
    for feature in &boundaries.features {
        for ring in feature.geometry.outer_rings() {
            for &[lon, lat] in ring {
                lon_min = lon_min.min(lon);
                lon_max = lon_max.max(lon);
                lat_min = lat_min.min(lat);
                lat_max = lat_max.max(lat);
                saw_vertex = true;
            }
        }
    }

    if !saw_vertex {
        return sim_err!(
            EmptyBoundaries,
            "no polygon vertices in boundary data".to_owned()
        );
    }

    Ok(GeoBounds {
        lon_min,
        lat_min,
        lon_max,
        lat_max,
    })
}

/// Interpolate from angle `a` toward `b` along the shortest arc.
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    let diff = (b - a + PI).rem_euclid(2.0 * PI) - PI;
    a + diff * t
}
