// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The simulation context: one object owning the projection, region
//! index, and agent population, driven by an external frame loop.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::agents::{build_population, Agent};
use crate::common::Result;
use crate::config::SimConfig;
use crate::datamodel::{DisplacementData, FeatureCollection};
use crate::export::trajectories_svg;
use crate::geom::geo_bounds;
use crate::projection::Projection;
use crate::regions::RegionIndex;

/// Host-surfaced interaction events, applied as plain state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    TogglePause,
    ToggleMap,
    ToggleTrajectories,
}

/// Owns all simulation state; there are no process-wide globals.
///
/// Single-threaded and frame-driven: the host calls `tick` once per
/// rendered frame and `rebuild` on viewport resize. A resize replaces
/// projection, region index, and population in sequence before
/// returning, so a renderer never observes a population from a stale
/// projection mixed with new geometry.
pub struct Simulation {
    config: SimConfig,
    boundaries: FeatureCollection,
    displacement: DisplacementData,
    projection: Projection,
    index: RegionIndex,
    agents: Vec<Agent>,
    rng: StdRng,
    paused: bool,
    show_map: bool,
    show_trajectories: bool,
}

impl Simulation {
    /// Load-time construction: derive the projection from the boundary
    /// data's extent, index the regions, and seed the population.
    pub fn new(
        boundaries: FeatureCollection,
        displacement: DisplacementData,
        width: f64,
        height: f64,
        config: SimConfig,
    ) -> Result<Simulation> {
        let bounds = geo_bounds(&boundaries)?;
        let projection = Projection::compute(bounds, width, height, &config)?;
        let index = RegionIndex::build(&boundaries, &projection);
        let mut rng = StdRng::seed_from_u64(config.random_seed);
        let agents = build_population(&displacement, &index, &config, &mut rng);

        Ok(Simulation {
            config,
            boundaries,
            displacement,
            projection,
            index,
            agents,
            rng,
            paused: false,
            show_map: true,
            show_trajectories: false,
        })
    }

    /// Recompute projection, region index, and population for a new
    /// canvas size. The old population is discarded wholesale.
    pub fn rebuild(&mut self, width: f64, height: f64) -> Result<()> {
        let bounds = geo_bounds(&self.boundaries)?;
        self.projection = Projection::compute(bounds, width, height, &self.config)?;
        self.index = RegionIndex::build(&self.boundaries, &self.projection);
        self.agents = build_population(&self.displacement, &self.index, &self.config, &mut self.rng);
        Ok(())
    }

    /// Advance every agent by one tick unless globally paused. Agents
    /// are independent, so ordering between them doesn't matter.
    pub fn tick(&mut self, dt: f64) {
        if self.paused {
            return;
        }
        for agent in self.agents.iter_mut() {
            agent.step(dt, &self.config);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn show_map(&self) -> bool {
        self.show_map
    }

    pub fn show_trajectories(&self) -> bool {
        self.show_trajectories
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::TogglePause => self.paused = !self.paused,
            InputEvent::ToggleMap => self.show_map = !self.show_map,
            InputEvent::ToggleTrajectories => self.show_trajectories = !self.show_trajectories,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn regions(&self) -> &RegionIndex {
        &self.index
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The trajectory SVG document, or `None` when there are no agents.
    pub fn export_trajectories(&self) -> Option<String> {
        trajectories_svg(&self.agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RotationSmoothing, SpeedMode};
    use crate::testutils::{displacement, displacement_row, feature_collection, square_feature};

    fn test_simulation() -> Simulation {
        let fc = feature_collection(vec![
            square_feature("A", 20.0, 10.0, 4.0),
            square_feature("B", 30.0, 10.0, 4.0),
        ]);
        let data = displacement(vec![
            displacement_row("Total", &[("A", 100)]),
            displacement_row("B", &[("A", 100)]),
        ]);
        let config = SimConfig {
            agent_scale_factor: 0.05,
            speed_mode: SpeedMode::FixedPerFrame,
            speed: 2.0,
            rotation_smoothing: RotationSmoothing::Instant,
            ..SimConfig::default()
        };
        Simulation::new(fc, data, 1000.0, 800.0, config).unwrap()
    }

    #[test]
    fn test_new_builds_population() {
        let sim = test_simulation();
        assert_eq!(5, sim.agents().len());
        assert_eq!(2, sim.regions().len());
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_tick_moves_agents_and_pause_freezes_them() {
        let mut sim = test_simulation();
        let before: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();

        sim.tick(1.0);
        let after: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();
        assert_ne!(before, after);

        sim.set_paused(true);
        sim.tick(1.0);
        let frozen: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();
        assert_eq!(after, frozen);

        sim.set_paused(false);
        sim.tick(1.0);
        let moved: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();
        assert_ne!(frozen, moved);
    }

    #[test]
    fn test_rebuild_replaces_population_wholesale() {
        let mut sim = test_simulation();
        let old_scale = sim.projection().scale;
        let old_positions: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();

        sim.rebuild(500.0, 400.0).unwrap();
        assert_ne!(old_scale, sim.projection().scale);
        assert_eq!(5, sim.agents().len());

        // agents were reseeded against the new projection, and every
        // endpoint lies inside the newly projected regions
        let new_positions: Vec<_> = sim.agents().iter().map(|a| a.pos).collect();
        assert_ne!(old_positions, new_positions);
        let a = sim.regions().get("A").unwrap();
        for agent in sim.agents() {
            assert!(crate::geom::point_in_polygon(agent.origin_pos, &a.rings[0]));
        }
    }

    #[test]
    fn test_input_events_toggle_flags() {
        let mut sim = test_simulation();
        assert!(sim.show_map());
        assert!(!sim.show_trajectories());

        sim.handle_input(InputEvent::ToggleMap);
        sim.handle_input(InputEvent::ToggleTrajectories);
        sim.handle_input(InputEvent::TogglePause);
        assert!(!sim.show_map());
        assert!(sim.show_trajectories());
        assert!(sim.is_paused());

        sim.handle_input(InputEvent::TogglePause);
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_export_round_trips_through_context() {
        let sim = test_simulation();
        let svg = sim.export_trajectories().unwrap();
        assert_eq!(5, svg.matches("<line ").count());
    }

    #[test]
    fn test_empty_displacement_degrades_to_no_agents() {
        let fc = feature_collection(vec![square_feature("A", 20.0, 10.0, 4.0)]);
        let data = displacement(vec![]);
        let sim = Simulation::new(fc, data, 800.0, 600.0, SimConfig::default()).unwrap();
        assert!(sim.agents().is_empty());
        assert!(sim.export_trajectories().is_none());
    }
}
