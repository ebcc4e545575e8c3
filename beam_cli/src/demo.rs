//! Built-in demonstration layouts

use beam_core::api::{BeamRequest, LoadSpec, SupportSpec};
use beam_core::SupportKind;

fn point(position: f64, magnitude: f64) -> LoadSpec {
    LoadSpec::Concentrated { position, magnitude }
}

fn varying(start_pos: f64, end_pos: f64, start_intensity: f64, end_intensity: f64) -> LoadSpec {
    LoadSpec::Varying {
        start_pos,
        end_pos,
        start_intensity,
        end_intensity,
    }
}

fn request(length: f64, left: f64, right: f64, loads: Vec<LoadSpec>) -> BeamRequest {
    BeamRequest {
        beam_length: length,
        supports: vec![
            SupportSpec {
                position: left,
                kind: SupportKind::Pin,
            },
            SupportSpec {
                position: right,
                kind: SupportKind::Roller,
            },
        ],
        loads,
        material: None,
        elastic_modulus: None,
        moment_of_inertia: None,
        extreme_fiber: None,
        resolution: None,
    }
}

/// Named demonstration requests, simplest first
pub fn scenarios() -> Vec<(&'static str, BeamRequest)> {
    vec![
        (
            "Overhanging beam with concentrated loads",
            request(10.0, 2.0, 8.0, vec![point(1.0, 50.0), point(6.0, 30.0), point(9.0, 40.0)]),
        ),
        (
            "Triangular and trapezoidal line loads",
            request(
                12.0,
                3.0,
                9.0,
                vec![
                    point(1.5, 25.0),
                    varying(4.0, 7.0, 0.0, 20.0),
                    varying(10.0, 12.0, 15.0, 5.0),
                ],
            ),
        ),
        (
            "Mixed loading on both overhangs",
            request(
                15.0,
                4.0,
                11.0,
                vec![
                    point(2.0, 35.0),
                    point(6.5, 45.0),
                    point(13.0, 28.0),
                    varying(0.0, 3.0, 12.0, 12.0),
                    varying(8.0, 10.0, 0.0, 25.0),
                    varying(12.0, 15.0, 18.0, 8.0),
                ],
            ),
        ),
    ]
}
