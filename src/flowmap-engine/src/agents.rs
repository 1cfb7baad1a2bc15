// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Flow agents: particles oscillating between an origin and destination
//! region, derived from the displacement matrix.

use std::f64::consts::PI;

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::{RotationSmoothing, SimConfig, SpeedMode};
use crate::datamodel::DisplacementData;
use crate::geom::{bounding_rect, lerp_angle, point_in_polygon, Point};
use crate::regions::{Region, RegionIndex};

/// Which fixed endpoint the agent is currently traveling toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waypoint {
    Origin,
    Destination,
}

impl Waypoint {
    fn flipped(self) -> Waypoint {
        match self {
            Waypoint::Origin => Waypoint::Destination,
            Waypoint::Destination => Waypoint::Origin,
        }
    }
}

/// One simulated flow particle.
///
/// The two endpoints are fixed at build time; the agent shuttles between
/// them forever, dwelling `pause_ticks` at each end. There is no
/// termination condition.
#[derive(Clone, Debug)]
pub struct Agent {
    pub pos: Point,
    pub origin_pos: Point,
    pub target_pos: Point,
    pub origin: String,
    pub destination: String,
    waypoint: Waypoint,
    heading: f64,
    target_heading: f64,
    pause_ticks: u32,
}

impl Agent {
    pub(crate) fn new(start: Point, end: Point, origin: String, destination: String) -> Agent {
        let heading = start.angle_to(end);
        Agent {
            pos: start,
            origin_pos: start,
            target_pos: end,
            origin,
            destination,
            waypoint: Waypoint::Destination,
            heading,
            target_heading: heading,
            pause_ticks: 0,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn waypoint(&self) -> Waypoint {
        self.waypoint
    }

    pub fn is_pausing(&self) -> bool {
        self.pause_ticks > 0
    }

    fn waypoint_pos(&self) -> Point {
        match self.waypoint {
            Waypoint::Origin => self.origin_pos,
            Waypoint::Destination => self.target_pos,
        }
    }

    /// Advance one tick.
    ///
    /// Pausing: count down the dwell; on expiry, aim the heading back
    /// the way we came. Traveling: step toward the current waypoint; if
    /// the remaining distance is within one step (we would overshoot),
    /// flip the waypoint and start the dwell instead of moving.
    pub fn step(&mut self, dt: f64, config: &SimConfig) {
        if self.pause_ticks > 0 {
            self.pause_ticks -= 1;
            if self.pause_ticks == 0 {
                self.target_heading = self.heading + PI;
            }
        } else {
            let delta = self.waypoint_pos() - self.pos;
            let dist = delta.length();
            let step = match config.speed_mode {
                SpeedMode::PerSecond => config.speed * dt,
                SpeedMode::FixedPerFrame => config.speed,
            };
            if dist > step {
                self.pos.x += delta.x * (step / dist);
                self.pos.y += delta.y * (step / dist);
                self.target_heading = delta.y.atan2(delta.x);
            } else {
                self.waypoint = self.waypoint.flipped();
                self.pause_ticks = config.pause_ticks;
            }
        }

        match config.rotation_smoothing {
            RotationSmoothing::Instant => self.heading = self.target_heading,
            RotationSmoothing::Smoothed { rate } => {
                self.heading = lerp_angle(self.heading, self.target_heading, (rate * dt).min(1.0));
            }
        }
    }
}

/// A uniform random point inside one of the region's polygon parts.
///
/// Rejection sampling: pick a part uniformly, sample its bounding box,
/// accept on containment. After `config.sampling_attempts` misses
/// (pathologically thin shapes), fall back to the region's centroid so
/// the caller always gets a usable point.
pub fn random_point_in_region(region: &Region, config: &SimConfig, rng: &mut StdRng) -> Point {
    if !region.rings.is_empty() {
        for _ in 0..config.sampling_attempts {
            let ring = &region.rings[rng.random_range(0..region.rings.len())];
            let Some(rect) = bounding_rect(ring) else {
                continue;
            };
            let p = Point::new(
                rng.random_range(rect.min.x..=rect.max.x),
                rng.random_range(rect.min.y..=rect.max.y),
            );
            if point_in_polygon(p, ring) {
                return p;
            }
        }
    }
    region.centroid
}

/// Derive the full agent population from the displacement matrix.
///
/// Every (origin, destination) pair with a non-zero count contributes
/// `max(1, floor(count * agent_scale_factor))` agents, so even the
/// smallest recorded flow stays visible. Pairs whose geometry cannot be
/// resolved are skipped with a diagnostic; a missing totals row yields
/// an empty population. The old population is always discarded, never
/// merged.
pub fn build_population(
    displacement: &DisplacementData,
    index: &RegionIndex,
    config: &SimConfig,
    rng: &mut StdRng,
) -> Vec<Agent> {
    let Some(totals) = displacement.totals_row() else {
        eprintln!("no origin-totals row in displacement data; population is empty");
        return Vec::new();
    };

    // sorted for a deterministic population under a fixed seed
    let mut origins: Vec<&str> = totals
        .by_state_of_origin
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(name, _)| name.as_str())
        .collect();
    origins.sort_unstable();

    let mut agents = Vec::new();
    for origin in origins {
        let Some(origin_region) = index.get(origin) else {
            eprintln!("skipping origin '{origin}': no boundary geometry");
            continue;
        };

        for row in displacement.destination_rows() {
            let count = row.count_for(origin);
            if count == 0 {
                continue;
            }
            let dest = row.state_of_displacement.as_str();
            let Some(dest_region) = index.get(dest) else {
                eprintln!("skipping destination '{dest}': no boundary geometry");
                continue;
            };

            let n_agents = ((count as f64 * config.agent_scale_factor).floor() as usize).max(1);
            for _ in 0..n_agents {
                let start = random_point_in_region(origin_region, config, rng);
                let end = random_point_in_region(dest_region, config, rng);
                agents.push(Agent::new(start, end, origin.to_owned(), dest.to_owned()));
            }
        }
    }

    agents
}
