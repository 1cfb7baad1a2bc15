// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod config;
pub mod datamodel;
pub mod geom;
pub mod projection;
pub mod regions;

mod agents;
mod export;
mod sim;

#[cfg(test)]
mod testutils;

pub use self::agents::{Agent, Waypoint, build_population, random_point_in_region};
pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::config::{RotationSmoothing, SimConfig, SpeedMode};
pub use self::export::trajectories_svg;
pub use self::sim::{InputEvent, Simulation};
