// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position resolution: from accumulated pointer deltas to guide values.
//!
//! A drag is resolved in three steps, each a pure function here:
//!
//! 1. [`to_pixel_delta`] maps the screen-space delta into the guides layer's
//!    local space using the transform captured at drag start.
//! 2. [`next_pixel_position`] adds the drag-start offset and rounds along the
//!    axis the guide moves on.
//! 3. [`to_logical_value`] divides by zoom and rounds to the configured
//!    number of digits; [`apply_snap`] then optionally replaces the result
//!    with the nearest snap candidate.
//!
//! [`resolve`] runs all three.

use alloc::vec::Vec;

use kurbo::{Affine, Vec2};
use understory_ruler::Orientation;

/// Maps a screen-space delta into local space.
///
/// Only the linear part of `screen_to_local` applies; deltas are unaffected by
/// translation.
#[must_use]
pub fn to_pixel_delta(screen_to_local: Affine, screen_delta: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = screen_to_local.as_coeffs();
    Vec2::new(
        a * screen_delta.x + c * screen_delta.y,
        b * screen_delta.x + d * screen_delta.y,
    )
}

/// Rounds half up, like `Math.round`: `2.5 -> 3`, `-2.5 -> -2`.
#[inline]
fn round_half_up(x: f64) -> f64 {
    libm::floor(x + 0.5)
}

/// Rounds half away from zero at `digits` decimal places: `2.5 -> 3`, `-2.5 -> -3`.
#[must_use]
pub fn round_to_digits(x: f64, digits: u32) -> f64 {
    if digits == 0 {
        return libm::round(x);
    }
    let scale = libm::pow(10.0, f64::from(digits));
    libm::round(x * scale) / scale
}

/// Pixel position of a guide along its movement axis.
///
/// Guides on a horizontal ruler move along Y; on a vertical ruler, along X.
#[must_use]
pub fn next_pixel_position(
    session_offset: Vec2,
    pixel_delta: Vec2,
    orientation: Orientation,
) -> f64 {
    round_half_up(orientation.across(pixel_delta + session_offset))
}

/// Converts a pixel position to a guide value in ruler units.
#[must_use]
pub fn to_logical_value(pixel_pos: f64, zoom: f64, digits: u32) -> f64 {
    round_to_digits(pixel_pos / zoom, digits)
}

/// Returns `snaps` ordered by distance to `target`, nearest first.
///
/// The sort is stable: equally distant candidates keep their input order.
#[must_use]
pub fn sort_snaps_by_distance(snaps: &[f64], target: f64) -> Vec<f64> {
    let mut sorted = snaps.to_vec();
    sorted.sort_by(|a, b| libm::fabs(target - a).total_cmp(&libm::fabs(target - b)));
    sorted
}

/// Nearest snap candidate to `target`, first one on ties.
#[must_use]
pub fn closest_snap(snaps: &[f64], target: f64) -> Option<f64> {
    snaps
        .iter()
        .copied()
        .min_by(|a, b| libm::fabs(target - a).total_cmp(&libm::fabs(target - b)))
}

/// A resolved drag position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved {
    /// Position along the movement axis in local pixels.
    pub pixel_pos: f64,
    /// Guide value in ruler units.
    pub value: f64,
}

/// Replaces `value`/`pixel_pos` with the nearest snap candidate when it lies
/// strictly within `threshold` pixels of `pixel_pos`.
///
/// Only the single nearest candidate (by value distance) is considered.
#[must_use]
pub fn apply_snap(
    value: f64,
    pixel_pos: f64,
    snaps: &[f64],
    zoom: f64,
    threshold: f64,
) -> Resolved {
    if let Some(snap) = closest_snap(snaps, value) {
        let snapped_pos = snap * zoom;
        if libm::fabs(snapped_pos - pixel_pos) < threshold {
            return Resolved {
                pixel_pos: snapped_pos,
                value: snap,
            };
        }
    }
    Resolved { pixel_pos, value }
}

/// Inputs to [`resolve`] that come from configuration.
#[derive(Clone, Copy, Debug)]
pub struct ResolveParams<'a> {
    /// Orientation of the ruler the guides belong to.
    pub orientation: Orientation,
    /// Pixels per ruler unit.
    pub zoom: f64,
    /// Decimal places kept in guide values.
    pub digits: u32,
    /// Snap candidates in ruler units.
    pub snaps: &'a [f64],
    /// Snap distance in pixels.
    pub snap_threshold: f64,
}

/// Resolves an accumulated screen delta to a guide position.
///
/// `session_offset` and `screen_to_local` are the values captured when the
/// drag started.
#[must_use]
pub fn resolve(
    params: &ResolveParams<'_>,
    session_offset: Vec2,
    screen_to_local: Affine,
    screen_dist: Vec2,
) -> Resolved {
    let delta = to_pixel_delta(screen_to_local, screen_dist);
    let pixel_pos = next_pixel_position(session_offset, delta, params.orientation);
    let value = to_logical_value(pixel_pos, params.zoom, params.digits);
    apply_snap(
        value,
        pixel_pos,
        params.snaps,
        params.zoom,
        params.snap_threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn pixel_delta_ignores_translation() {
        let m = Affine::translate((100.0, -40.0));
        assert_eq!(to_pixel_delta(m, Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn pixel_delta_undoes_scale() {
        let screen_to_local = Affine::scale(2.0).inverse();
        assert_eq!(
            to_pixel_delta(screen_to_local, Vec2::new(10.0, -6.0)),
            Vec2::new(5.0, -3.0)
        );
    }

    #[test]
    fn pixel_delta_undoes_rotation() {
        let screen_to_local = Affine::rotate(FRAC_PI_2).inverse();
        let local = to_pixel_delta(screen_to_local, Vec2::new(0.0, 10.0));
        assert!(libm::fabs(local.x - 10.0) < 1e-9);
        assert!(libm::fabs(local.y) < 1e-9);
    }

    #[test]
    fn pixel_position_follows_cross_axis() {
        let offset = Vec2::new(1.0, 2.0);
        let delta = Vec2::new(10.2, 20.5);
        assert_eq!(
            next_pixel_position(offset, delta, Orientation::Horizontal),
            23.0
        );
        assert_eq!(next_pixel_position(offset, delta, Orientation::Vertical), 11.0);
    }

    #[test]
    fn pixel_position_rounds_half_up() {
        let h = Orientation::Horizontal;
        assert_eq!(next_pixel_position(Vec2::ZERO, Vec2::new(0.0, 2.5), h), 3.0);
        assert_eq!(next_pixel_position(Vec2::ZERO, Vec2::new(0.0, -2.5), h), -2.0);
    }

    #[test]
    fn logical_value_rounds_half_away_from_zero() {
        assert_eq!(to_logical_value(5.0, 2.0, 0), 3.0);
        assert_eq!(to_logical_value(-5.0, 2.0, 0), -3.0);
        assert_eq!(to_logical_value(10.0, 3.0, 2), 3.33);
        assert_eq!(to_logical_value(1.0, 8.0, 1), 0.1);
    }

    #[test]
    fn logical_value_round_trips_within_half_step() {
        for digits in 0..4_u32 {
            let bound = libm::pow(10.0, -f64::from(digits)) / 2.0;
            for zoom in [0.5, 1.0, 1.5, 3.0] {
                for i in -50..50 {
                    let logical = f64::from(i) * 0.37;
                    let value = to_logical_value(logical * zoom, zoom, digits);
                    assert!(
                        libm::fabs(value - logical) <= bound + 1e-9,
                        "digits={digits} zoom={zoom} logical={logical} value={value}"
                    );
                }
            }
        }
    }

    #[test]
    fn snaps_sort_stably_by_distance() {
        assert_eq!(
            sort_snaps_by_distance(&[3.0, 8.0, 1.0, 7.0, 5.0], 4.0),
            [3.0, 5.0, 1.0, 7.0, 8.0]
        );
        assert_eq!(closest_snap(&[3.0, 8.0, 1.0, 7.0, 5.0], 4.0), Some(3.0));
        assert_eq!(closest_snap(&[], 4.0), None);
    }

    #[test]
    fn snap_applies_strictly_within_threshold() {
        let snapped = apply_snap(12.0, 24.0, &[10.0, 40.0], 2.0, 5.0);
        assert_eq!(
            snapped,
            Resolved {
                pixel_pos: 20.0,
                value: 10.0
            }
        );

        // Exactly at the threshold does not snap.
        let unsnapped = apply_snap(12.0, 25.0, &[10.0], 2.0, 5.0);
        assert_eq!(
            unsnapped,
            Resolved {
                pixel_pos: 25.0,
                value: 12.0
            }
        );
    }

    #[test]
    fn snap_is_identity_when_nothing_is_close() {
        for (value, pos) in [(0.0, 0.0), (13.0, 13.0), (-40.0, -40.0), (99.0, 99.0)] {
            let snaps = [50.0, 200.0, -100.0];
            assert_eq!(
                apply_snap(value, pos, &snaps, 1.0, 5.0),
                Resolved {
                    pixel_pos: pos,
                    value
                }
            );
        }
        assert_eq!(
            apply_snap(7.0, 7.0, &[], 1.0, 5.0),
            Resolved {
                pixel_pos: 7.0,
                value: 7.0
            }
        );
    }

    #[test]
    fn only_nearest_candidate_is_considered() {
        // 11 and 9 are equally near; the first listed wins.
        let snapped = apply_snap(10.0, 20.0, &[11.0, 9.0], 2.0, 3.0);
        assert_eq!(snapped.value, 11.0);
    }

    #[test]
    fn resolve_combines_all_steps() {
        let params = ResolveParams {
            orientation: Orientation::Horizontal,
            zoom: 2.0,
            digits: 0,
            snaps: &[30.0],
            snap_threshold: 5.0,
        };
        // Offset 40 + delta 17 = 57 px -> 28.5 -> 29 units; snap 30 is 3 px away.
        let resolved = resolve(
            &params,
            Vec2::new(0.0, 40.0),
            Affine::IDENTITY,
            Vec2::new(100.0, 17.0),
        );
        assert_eq!(
            resolved,
            Resolved {
                pixel_pos: 60.0,
                value: 30.0
            }
        );

        let params = ResolveParams {
            snaps: &[],
            ..params
        };
        let resolved = resolve(
            &params,
            Vec2::new(0.0, 40.0),
            Affine::IDENTITY,
            Vec2::new(100.0, 17.0),
        );
        assert_eq!(
            resolved,
            Resolved {
                pixel_pos: 57.0,
                value: 29.0
            }
        );
    }
}
