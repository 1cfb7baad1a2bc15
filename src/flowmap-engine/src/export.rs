// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Serializes agent origin→destination segments as a minimal SVG line
//! drawing, one `<line>` per agent.

use std::fmt::Write;

use crate::agents::Agent;

/// Render every agent's fixed origin→destination segment (not its
/// current position) as an SVG document. The viewport is the tight
/// bounding box of all endpoints, no padding. Zero agents is a no-op
/// with a diagnostic, not an error.
pub fn trajectories_svg(agents: &[Agent]) -> Option<String> {
    if agents.is_empty() {
        eprintln!("no agents to export");
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for a in agents {
        for p in [a.origin_pos, a.target_pos] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }

    let width = max_x - min_x;
    let height = max_y - min_y;

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    // infallible: writing to a String
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"{min_x} {min_y} {width} {height}\">"
    );
    for a in agents {
        let _ = writeln!(
            svg,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"1\" />",
            a.origin_pos.x, a.origin_pos.y, a.target_pos.x, a.target_pos.y
        );
    }
    svg.push_str("</svg>");

    Some(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::segment_agent;

    #[test]
    fn test_empty_population_is_a_noop() {
        assert!(trajectories_svg(&[]).is_none());
    }

    #[test]
    fn test_viewport_is_tight_over_all_endpoints() {
        let agents = vec![
            segment_agent(0.0, 0.0, 10.0, 10.0),
            segment_agent(5.0, 5.0, 15.0, 15.0),
        ];
        let svg = trajectories_svg(&agents).unwrap();
        assert!(svg.contains("viewBox=\"0 0 15 15\""), "{svg}");
        assert!(svg.contains("width=\"15\" height=\"15\""), "{svg}");
        assert!(
            svg.contains("<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"10\" stroke=\"black\" stroke-width=\"1\" />"),
            "{svg}"
        );
        assert!(
            svg.contains("<line x1=\"5\" y1=\"5\" x2=\"15\" y2=\"15\" stroke=\"black\" stroke-width=\"1\" />"),
            "{svg}"
        );
        assert_eq!(2, svg.matches("<line ").count());
    }

    #[test]
    fn test_viewport_offset_for_negative_coordinates() {
        let agents = vec![segment_agent(-5.0, -2.0, 5.0, 8.0)];
        let svg = trajectories_svg(&agents).unwrap();
        assert!(svg.contains("viewBox=\"-5 -2 10 10\""), "{svg}");
    }

    #[test]
    fn test_document_structure() {
        let agents = vec![segment_agent(0.0, 0.0, 1.0, 1.0)];
        let svg = trajectories_svg(&agents).unwrap();
        assert!(svg.starts_with("<?xml version=\"1.0\""));
        assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>"));
    }
}
