// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

/// How an agent's per-tick step size is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedMode {
    /// `speed` is pixels per tick, ignoring wall-clock time.
    FixedPerFrame,
    /// `speed` is pixels per second, scaled by the tick's delta time.
    PerSecond,
}

/// How an agent's heading tracks its direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationSmoothing {
    /// Heading snaps to the direction of travel each tick.
    Instant,
    /// Heading turns toward the direction of travel at most `rate`
    /// radians per second, along the shortest angular arc.
    Smoothed { rate: f64 },
}

/// Tunable parameters for projection fitting and the agent simulation.
///
/// All screen-space values are in pixels; fractions are relative to the
/// canvas dimension they apply to.
#[derive(Clone, Debug)]
pub struct SimConfig {
    // Projection fitting
    /// Fraction of the limiting canvas dimension the map should span.
    pub map_scale_factor: f64,
    /// Top margin as a fraction of canvas height (fit-to-height branch).
    pub vertical_offset_fraction: f64,
    /// Extra horizontal shift as a fraction of canvas width.
    pub horizontal_shift_fraction: f64,

    // Agent population
    /// Agents per displaced person; every non-zero flow still gets one.
    pub agent_scale_factor: f64,
    /// Attempts before rejection sampling falls back to the centroid.
    pub sampling_attempts: u32,
    /// Seed for the population RNG, for reproducible runs.
    pub random_seed: u64,

    // Agent motion
    pub speed_mode: SpeedMode,
    /// Travel speed, interpreted per `speed_mode`.
    pub speed: f64,
    pub rotation_smoothing: RotationSmoothing,
    /// Ticks an agent dwells at an endpoint before reversing.
    pub pause_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_scale_factor: 0.73,
            vertical_offset_fraction: 0.125,
            horizontal_shift_fraction: 0.0,
            agent_scale_factor: 0.00003,
            sampling_attempts: 1000,
            random_seed: 42,
            speed_mode: SpeedMode::PerSecond,
            speed: 10.0,
            rotation_smoothing: RotationSmoothing::Smoothed { rate: 3.0 },
            pause_ticks: 120,
        }
    }
}
