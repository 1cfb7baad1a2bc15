// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The affine transform from geographic (longitude, latitude) space to
//! screen space, plus the scale-bar and graticule support math an
//! external renderer needs.

use crate::common::Result;
use crate::config::SimConfig;
use crate::datamodel::Ring;
use crate::geom::{GeoBounds, Point};
use crate::sim_err;

/// Fraction of canvas width left of the map in the fit-to-width branch.
const LEFT_MARGIN_FRACTION: f64 = 0.125;

/// Kilometers per degree of longitude at the equator.
const KM_PER_DEGREE: f64 = 111.32;

/// Candidate scale-bar lengths, in km.
const NICE_SCALE_STEPS: [f64; 7] = [50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0];

/// Fitted affine transform for one canvas size. Recomputed wholesale on
/// resize; `project` is then pure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub bounds: GeoBounds,
}

impl Projection {
    /// Fit the map to the canvas, preserving aspect ratio.
    ///
    /// If the map is wider than the canvas (relative to their aspect
    /// ratios) it is fit to width with a fixed left margin, vertically
    /// centered; otherwise fit to height with a fixed top margin,
    /// horizontally centered. The configured horizontal shift applies in
    /// both branches.
    pub fn compute(
        bounds: GeoBounds,
        width: f64,
        height: f64,
        config: &SimConfig,
    ) -> Result<Projection> {
        if !(width > 0.0 && height > 0.0) {
            return sim_err!(BadCanvasSize, format!("canvas {width}x{height}"));
        }

        let lon_range = bounds.lon_range();
        let lat_range = bounds.lat_range();
        if lon_range <= 0.0 || lat_range <= 0.0 {
            return sim_err!(
                DegenerateBounds,
                format!("lon range {lon_range}, lat range {lat_range}")
            );
        }

        let map_aspect = lon_range / lat_range;
        let canvas_aspect = width / height;

        let (scale, offset_x, offset_y) = if map_aspect > canvas_aspect {
            let scale = width * config.map_scale_factor / lon_range;
            let offset_x = width * (LEFT_MARGIN_FRACTION + config.horizontal_shift_fraction);
            let offset_y = (height - lat_range * scale) / 2.0;
            (scale, offset_x, offset_y)
        } else {
            let scale = height * config.map_scale_factor / lat_range;
            let offset_y = height * config.vertical_offset_fraction;
            let offset_x =
                (width - lon_range * scale) / 2.0 + width * config.horizontal_shift_fraction;
            (scale, offset_x, offset_y)
        };

        Ok(Projection {
            scale,
            offset_x,
            offset_y,
            bounds,
        })
    }

    /// (lon, lat) → screen (x, y). Latitude increases upward in the
    /// source data but downward on screen, hence the inversion.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        Point::new(
            self.offset_x + (lon - self.bounds.lon_min) * self.scale,
            self.offset_y + (self.bounds.lat_max - lat) * self.scale,
        )
    }

    /// Project a lon/lat ring into screen space.
    pub fn project_ring(&self, ring: &Ring) -> Vec<Point> {
        ring.iter().map(|&[lon, lat]| self.project(lon, lat)).collect()
    }

    /// Screen-space length of `km` kilometers of east-west distance at
    /// the map's mid latitude.
    pub fn distance_in_pixels(&self, km: f64) -> f64 {
        let center_lat = (self.bounds.lat_min + self.bounds.lat_max) / 2.0;
        let deg = km / KM_PER_DEGREE;
        let p0 = self.project(self.bounds.lon_min, center_lat);
        let p1 = self.project(self.bounds.lon_min + deg, center_lat);
        (p1.x - p0.x).abs()
    }

    /// East-west extent of the map in kilometers at the mid latitude.
    pub fn map_width_km(&self) -> f64 {
        let center_lat = (self.bounds.lat_min + self.bounds.lat_max) / 2.0;
        self.bounds.lon_range() * KM_PER_DEGREE * center_lat.to_radians().cos()
    }

    /// Scale-bar length: the smallest nice step covering a sixth of the
    /// map's width, capped at the largest step.
    pub fn nice_scale_bar_km(&self) -> f64 {
        let target = self.map_width_km() / 6.0;
        NICE_SCALE_STEPS
            .iter()
            .copied()
            .find(|&s| s >= target)
            .unwrap_or(NICE_SCALE_STEPS[NICE_SCALE_STEPS.len() - 1])
    }

    /// Projected endpoints of whole-degree meridians and parallels
    /// spanning the (floored/ceiled) bounds, every `step` degrees.
    pub fn grid_lines(&self, step: u32) -> Vec<GridLine> {
        let step = step.max(1) as i64;
        let lon_lo = self.bounds.lon_min.floor() as i64;
        let lon_hi = self.bounds.lon_max.ceil() as i64;
        let lat_lo = self.bounds.lat_min.floor() as i64;
        let lat_hi = self.bounds.lat_max.ceil() as i64;

        let mut lines = Vec::new();
        let mut lat = lat_lo;
        while lat <= lat_hi {
            lines.push(GridLine {
                orientation: GridOrientation::Parallel,
                degree: lat,
                start: self.project(lon_lo as f64, lat as f64),
                end: self.project(lon_hi as f64, lat as f64),
            });
            lat += step;
        }
        let mut lon = lon_lo;
        while lon <= lon_hi {
            lines.push(GridLine {
                orientation: GridOrientation::Meridian,
                degree: lon,
                start: self.project(lon as f64, lat_lo as f64),
                end: self.project(lon as f64, lat_hi as f64),
            });
            lon += step;
        }
        lines
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridOrientation {
    /// Constant-latitude line, labeled °N.
    Parallel,
    /// Constant-longitude line, labeled °E.
    Meridian,
}

/// One graticule line, ready for an external renderer to stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub orientation: GridOrientation,
    /// The whole degree this line sits on.
    pub degree: i64,
    pub start: Point,
    pub end: Point,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorCode;
    use float_cmp::approx_eq;

    fn bounds() -> GeoBounds {
        GeoBounds {
            lon_min: 22.0,
            lat_min: 8.0,
            lon_max: 39.0,
            lat_max: 23.0,
        }
    }

    #[test]
    fn test_fit_to_width() {
        // map aspect 17/15 > canvas aspect 1000/1000
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1000.0, 1000.0, &config).unwrap();
        assert!(approx_eq!(f64, p.scale, 1000.0 * 0.73 / 17.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, p.offset_x, 125.0, epsilon = 1e-9));
        // vertically centered
        assert!(approx_eq!(
            f64,
            p.offset_y,
            (1000.0 - 15.0 * p.scale) / 2.0,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_fit_to_height() {
        // map aspect 17/15 < canvas aspect 2000/800
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 2000.0, 800.0, &config).unwrap();
        assert!(approx_eq!(f64, p.scale, 800.0 * 0.73 / 15.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, p.offset_y, 100.0, epsilon = 1e-9));
        assert!(approx_eq!(
            f64,
            p.offset_x,
            (2000.0 - 17.0 * p.scale) / 2.0,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_project_round_trip() {
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1200.0, 900.0, &config).unwrap();

        let (lon, lat) = (30.5, 15.25);
        let pt = p.project(lon, lat);
        // invert the affine transform
        let lon2 = (pt.x - p.offset_x) / p.scale + p.bounds.lon_min;
        let lat2 = p.bounds.lat_max - (pt.y - p.offset_y) / p.scale;
        assert!(approx_eq!(f64, lon, lon2, epsilon = 1e-9));
        assert!(approx_eq!(f64, lat, lat2, epsilon = 1e-9));
    }

    #[test]
    fn test_latitude_is_inverted() {
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1000.0, 1000.0, &config).unwrap();
        let north = p.project(30.0, 20.0);
        let south = p.project(30.0, 10.0);
        assert!(north.y < south.y);
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let config = SimConfig::default();
        let flat = GeoBounds {
            lon_min: 10.0,
            lat_min: 5.0,
            lon_max: 10.0,
            lat_max: 6.0,
        };
        let err = Projection::compute(flat, 100.0, 100.0, &config).unwrap_err();
        assert_eq!(ErrorCode::DegenerateBounds, err.code);

        let err = Projection::compute(bounds(), 0.0, 100.0, &config).unwrap_err();
        assert_eq!(ErrorCode::BadCanvasSize, err.code);
    }

    #[test]
    fn test_distance_in_pixels_linear_in_km() {
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1000.0, 1000.0, &config).unwrap();
        let d100 = p.distance_in_pixels(100.0);
        let d200 = p.distance_in_pixels(200.0);
        assert!(d100 > 0.0);
        assert!(approx_eq!(f64, d200, 2.0 * d100, epsilon = 1e-9));
    }

    #[test]
    fn test_nice_scale_bar_selection() {
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1000.0, 1000.0, &config).unwrap();
        // Sudan-ish bounds: ~17 degrees of longitude at ~15.5N is about
        // 1800 km across, so a sixth is ~300 km and the bar snaps to 500
        assert_eq!(500.0, p.nice_scale_bar_km());
    }

    #[test]
    fn test_grid_lines_cover_bounds() {
        let config = SimConfig::default();
        let p = Projection::compute(bounds(), 1000.0, 1000.0, &config).unwrap();
        let lines = p.grid_lines(2);

        let parallels: Vec<i64> = lines
            .iter()
            .filter(|l| l.orientation == GridOrientation::Parallel)
            .map(|l| l.degree)
            .collect();
        assert_eq!(vec![8, 10, 12, 14, 16, 18, 20, 22], parallels);

        let meridians: Vec<i64> = lines
            .iter()
            .filter(|l| l.orientation == GridOrientation::Meridian)
            .map(|l| l.degree)
            .collect();
        assert_eq!(vec![22, 24, 26, 28, 30, 32, 34, 36, 38], meridians);

        // a parallel is horizontal in screen space
        let first = &lines[0];
        assert_eq!(first.start.y, first.end.y);
    }
}
