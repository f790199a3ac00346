//! Relative rotations between directions and between orientation frames.
//!
//! Every function here assumes unit length directions. Results are unit
//! quaternions when that holds.

use crate::error::RotationError;
use crate::quaternion::{AngleAxis, Quaternion};
use crate::vector::{Vec3, DIR_EPSILON};

/// Squared length of `v1 + v2` below which the bisector is undefined and the
/// directions count as antipodal. Holds only within about 1e-7 rad of opposite,
/// where the fallback half turn misses by less than that angle.
pub const ANTIPODAL_EPSILON: f64 = 1e-14;

fn is_antipodal(v1: Vec3, v2: Vec3) -> bool {
    (v1 + v2).len_sq() < ANTIPODAL_EPSILON
}

/// Shortest-arc rotation taking `v1` onto `v2`, built from their bisector.
fn bisector_quaternion(v1: Vec3, v2: Vec3) -> Quaternion {
    let mid = (v1 + v2).normalized();
    Quaternion::from_sv(v1.dot(mid), v1.cross(mid))
}

/// Unit quaternion rotating `v1` onto `v2` along the shortest arc.
///
/// Fails with [`RotationError::DegenerateRotation`] when the two are
/// antipodal, since every axis perpendicular to them gives a shortest arc.
pub fn relative_quaternion(v1: Vec3, v2: Vec3) -> Result<Quaternion, RotationError> {
    if is_antipodal(v1, v2) {
        log::debug!("antipodal directions {v1} and {v2} without fallback axis");
        return Err(RotationError::DegenerateRotation(v1, v2));
    }
    Ok(bisector_quaternion(v1, v2))
}

/// Like [`relative_quaternion`], but antipodal inputs resolve to a half
/// turn about `fallback_axis`, which should be a unit vector perpendicular
/// to `v1`.
pub fn relative_quaternion_with_fallback(v1: Vec3, v2: Vec3, fallback_axis: Vec3) -> Quaternion {
    if is_antipodal(v1, v2) {
        log::debug!("antipodal directions {v1} and {v2}, half turn about {fallback_axis}");
        return Quaternion::from_vector(fallback_axis);
    }
    bisector_quaternion(v1, v2)
}

/// Rotation taking frame `(forward1, up1)` onto `(forward2, up2)`.
///
/// Aligns the forwards first, then twists about `forward2` to bring the
/// rotated up onto `up2`. Fails only when the two forwards are antipodal.
pub fn relative_quaternion_from_frames(
    forward1: Vec3,
    up1:      Vec3,
    forward2: Vec3,
    up2:      Vec3,
) -> Result<Quaternion, RotationError> {
    let forward_quat = relative_quaternion(forward1, forward2)?;
    let up1_rotated = forward_quat.rotate(up1);
    let up_quat = relative_quaternion_with_fallback(up1_rotated, up2, forward2);
    Ok(up_quat * forward_quat)
}

/// Rotation carrying the xy-plane onto the plane with unit `normal`.
pub fn orient_plane(normal: Vec3) -> AngleAxis {
    if normal.approx_eq(Vec3::OUT, DIR_EPSILON) {
        return AngleAxis { angle: 0.0, axis: Vec3::OUT };
    }
    relative_quaternion_with_fallback(Vec3::OUT, normal, Vec3::RIGHT).to_angle_axis()
}

/// An orientation given by perpendicular unit `forward` and `up` directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub forward: Vec3,
    pub up:      Vec3,
}
impl Frame {
    pub fn new(forward: Vec3, up: Vec3) -> Result<Self, RotationError> {
        let unit = |v: Vec3| (v.len() - 1.0).abs() < DIR_EPSILON;
        if !unit(forward) || !unit(up) || forward.dot(up).abs() > DIR_EPSILON {
            return Err(RotationError::NotOrthonormal(forward, up));
        }
        Ok(Self::new_unchecked(forward, up))
    }

    pub fn new_unchecked(forward: Vec3, up: Vec3) -> Self {
        Self { forward, up }
    }

    /// `RIGHT` forward and `OUT` up: the frame of a flat drawing in the xy-plane.
    pub fn standard() -> Self {
        Self::new_unchecked(Vec3::RIGHT, Vec3::OUT)
    }

    /// Frame whose forward runs along `a` and whose up is the normal of the
    /// plane spanned by `a` and `b`.
    pub fn spanning(a: Vec3, b: Vec3) -> Result<Self, RotationError> {
        let normal = a.cross(b);
        if normal.near_zero() {
            return Err(RotationError::NotOrthonormal(a, b));
        }
        Ok(Self::new_unchecked(a.normalized(), normal.normalized()))
    }

    pub fn rotation_to(&self, other: &Frame) -> Result<Quaternion, RotationError> {
        relative_quaternion_from_frames(self.forward, self.up, other.forward, other.up)
    }

    pub fn rotated(&self, quat: Quaternion) -> Self {
        Self::new_unchecked(quat.rotate(self.forward), quat.rotate(self.up))
    }
}


#[cfg(test)]
use crate::random::Randf64;
#[cfg(test)]
use std::f64::consts::{FRAC_PI_2, PI};

#[test]
fn same_direction_gives_identity() {
    let mut rand = Randf64::seed(3);
    for _ in 0..50 {
        let v = rand.unit_vec();
        let q = relative_quaternion(v, v).unwrap();
        assert!(q.approx_eq(Quaternion::identity(), 1e-12));
    }
    assert!(relative_quaternion(Vec3::UP, Vec3::UP).unwrap() == Quaternion::identity());
}

#[test]
fn relative_rotation_maps_v1_onto_v2() {
    let mut rand = Randf64::seed(11);
    for _ in 0..500 {
        let v1 = rand.unit_vec();
        let v2 = rand.unit_vec();
        if let Ok(q) = relative_quaternion(v1, v2) {
            assert!((q.norm() - 1.0).abs() < 1e-9);
            assert!(q.rotate(v1).approx_eq(v2, 1e-6));
        }
    }
}

#[test]
fn right_to_up_is_quarter_turn_about_out() {
    let aa = relative_quaternion(Vec3::RIGHT, Vec3::UP).unwrap().to_angle_axis();
    assert!((aa.angle - FRAC_PI_2).abs() < 1e-12);
    assert!(aa.axis.approx_eq(Vec3::OUT, 1e-12));
}

#[test]
fn antipodal_uses_fallback_axis() {
    let q = relative_quaternion_with_fallback(Vec3::RIGHT, -Vec3::RIGHT, Vec3::OUT);
    assert!(q == Quaternion::new(0.0, 0.0, 0.0, 1.0));
    assert!(q.rotate(Vec3::RIGHT).approx_eq(-Vec3::RIGHT, 1e-12));
}

#[test]
fn antipodal_without_fallback_is_an_error() {
    let err = relative_quaternion(Vec3::RIGHT, -Vec3::RIGHT).unwrap_err();
    assert!(err == RotationError::DegenerateRotation(Vec3::RIGHT, -Vec3::RIGHT));

    let nearly = Vec3::new(-1.0, 0.000000001, 0.0).normalized();
    assert!(relative_quaternion(Vec3::RIGHT, nearly).is_err());
}

#[test]
fn nearly_antipodal_still_uses_bisector() {
    let (sin, cos) = 0.001_f64.sin_cos();
    let v2 = Vec3::new(-cos, sin, 0.0);

    let q = relative_quaternion(Vec3::RIGHT, v2).unwrap();
    assert!(q.rotate(Vec3::RIGHT).approx_eq(v2, 1e-9));

    let q = relative_quaternion_with_fallback(Vec3::RIGHT, v2, Vec3::OUT);
    assert!(q.rotate(Vec3::RIGHT).approx_eq(v2, 1e-9));
}

#[test]
fn nearly_antipodal_up_twist() {
    for twist in [0.002, 0.001, 0.00001] {
        let (sin, cos) = f64::sin_cos(twist);
        let up2 = Vec3::new(0.0, -cos, sin);
        let q = relative_quaternion_from_frames(Vec3::RIGHT, Vec3::UP, Vec3::RIGHT, up2).unwrap();

        assert!(q.rotate(Vec3::RIGHT).approx_eq(Vec3::RIGHT, 1e-9));
        assert!(q.rotate(Vec3::UP).approx_eq(up2, 1e-6));
    }
}

#[test]
fn plane_normal_near_in() {
    let (sin, cos) = 0.001_f64.sin_cos();
    let normal = Vec3::new(0.0, sin, -cos);
    let q = Quaternion::from(orient_plane(normal));
    assert!(q.rotate(Vec3::OUT).approx_eq(normal, 1e-9));
}

#[test]
fn fallback_is_ignored_away_from_antipodes() {
    let with = relative_quaternion_with_fallback(Vec3::RIGHT, Vec3::UP, Vec3::RIGHT);
    let without = relative_quaternion(Vec3::RIGHT, Vec3::UP).unwrap();
    assert!(with == without);
}

#[test]
fn swapped_axes_frame() {
    let q = relative_quaternion_from_frames(Vec3::RIGHT, Vec3::UP, Vec3::UP, Vec3::RIGHT).unwrap();
    assert!(q.rotate(Vec3::RIGHT).approx_eq(Vec3::UP, 1e-12));
    assert!(q.rotate(Vec3::UP).approx_eq(Vec3::RIGHT, 1e-12));
    assert!(q.rotate(Vec3::OUT).approx_eq(-Vec3::OUT, 1e-12));
}

#[test]
fn frame_rotation_maps_forward_and_up() {
    let mut rand = Randf64::seed(99);
    for _ in 0..500 {
        let a = rand.frame();
        let b = rand.frame();
        if let Ok(q) = a.rotation_to(&b) {
            assert!((q.norm() - 1.0).abs() < 1e-9);
            let moved = a.rotated(q);
            assert!(moved.forward.approx_eq(b.forward, 1e-6));
            assert!(moved.up.approx_eq(b.up, 1e-6));
        }
    }
}

#[test]
fn frame_rotation_fails_for_antipodal_forwards() {
    let a = Frame::standard();
    let b = Frame::new(-Vec3::RIGHT, Vec3::UP).unwrap();
    assert!(a.rotation_to(&b).is_err());
}

#[test]
fn frame_new_checks_orthonormality() {
    assert!(Frame::new(Vec3::RIGHT, Vec3::UP).is_ok());
    assert!(Frame::new(Vec3::RIGHT, Vec3::new(1.0, 1.0, 0.0).normalized()).is_err());
    assert!(Frame::new(Vec3::RIGHT * 2.0, Vec3::UP).is_err());
}

#[test]
fn spanning_frame_lays_standard_plane_onto_lines() {
    let a = Vec3::new(1.0, 1.0, 1.0);
    let b = Vec3::new(0.0, 2.0, -1.0);
    let frame = Frame::spanning(a, b).unwrap();
    let q = Frame::standard().rotation_to(&frame).unwrap();

    assert!(q.rotate(Vec3::RIGHT).approx_eq(a.normalized(), 1e-9));
    // UP stays in the plane of a and b
    assert!(q.rotate(Vec3::UP).dot(frame.up).abs() < 1e-9);
    assert!(Frame::spanning(a, a * 3.0).is_err());
}

#[test]
fn orient_plane_cases() {
    let flat = orient_plane(Vec3::OUT);
    assert!(flat.angle == 0.0 && flat.axis == Vec3::OUT);

    let flipped = orient_plane(-Vec3::OUT);
    assert!((flipped.angle - PI).abs() < 1e-12);
    assert!(flipped.axis.approx_eq(Vec3::RIGHT, 1e-12));

    let normal = Vec3::new(0.0, -1.0, 1.0).normalized();
    let tilt = orient_plane(normal);
    let q = Quaternion::from(tilt);
    assert!(q.rotate(Vec3::OUT).approx_eq(normal, 1e-9));
    assert!((tilt.angle - PI / 4.0).abs() < 1e-9);
}
