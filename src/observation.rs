//! Observation layout and writer.
//!
//! The observation is 8-dimensional:
//!
//! | index | content |
//! |---|---|
//! | 0..3 | move target scaled by 1 / half_extent |
//! | 3..6 | position scaled by 1 / half_extent |
//! | 6 | sin(yaw) |
//! | 7 | cos(yaw) |

use crate::constants::OBS_SIZE;
use crate::types::Vec3;

/// Write the observation for the given state into `out`.
pub fn write_observation(
    pos: Vec3,
    move_target: Vec3,
    yaw: f32,
    half_extent: f32,
    out: &mut [f32; OBS_SIZE],
) {
    let inv = 1.0 / half_extent;

    out[0] = move_target[0] * inv;
    out[1] = move_target[1] * inv;
    out[2] = move_target[2] * inv;

    out[3] = pos[0] * inv;
    out[4] = pos[1] * inv;
    out[5] = pos[2] * inv;

    out[6] = yaw.sin();
    out[7] = yaw.cos();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRID_SIZE;

    #[test]
    fn test_observation_layout() {
        let mut obs = [0.0f32; OBS_SIZE];
        write_observation(
            [5.0, -5.0, 10.0],
            [10.0, 0.0, -10.0],
            0.0,
            GRID_SIZE,
            &mut obs,
        );

        assert_eq!(&obs[0..3], &[1.0, 0.0, -1.0]);
        assert_eq!(&obs[3..6], &[0.5, -0.5, 1.0]);
        assert_eq!(obs[6], 0.0);
        assert_eq!(obs[7], 1.0);
    }

    #[test]
    fn test_yaw_encoding_is_unit() {
        let mut obs = [0.0f32; OBS_SIZE];
        for &yaw in &[0.0, 0.7, -2.1, std::f32::consts::PI] {
            write_observation([0.0; 3], [0.0; 3], yaw, GRID_SIZE, &mut obs);
            let norm = obs[6] * obs[6] + obs[7] * obs[7];
            assert!((norm - 1.0).abs() < 1e-6, "sin/cos not unit for yaw {}", yaw);
        }
    }
}
