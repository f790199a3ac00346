use std::ops::{Neg, Mul};
use std::fmt;

use crate::vector::Vec3;

/// Quaternion `s + v.x i + v.y j + v.z k`.
///
/// Unit quaternions represent rotations. `q` and `-q` represent the same one.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quaternion {
    pub s: f64,
    pub v: Vec3,
}

/// Rotation by `angle` radians about a unit `axis`, right handed.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct AngleAxis {
    pub angle: f64,
    pub axis:  Vec3,
}

impl Quaternion {
    pub const fn new(s: f64, xi: f64, yj: f64, zk: f64) -> Self {
        Self {
            s,
            v: Vec3::new(xi, yj, zk),
        }
    }

    pub const fn from_sv(s: f64, v: Vec3) -> Self {
        Self { s, v }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Pure quaternion `(0, v)`.
    pub const fn from_vector(v: Vec3) -> Self {
        Self::from_sv(0.0, v)
    }

    /// Unit quaternion rotating by `angle` about `axis`. The axis is normalized.
    pub fn from_angle_axis(angle: f64, axis: Vec3) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::from_sv(cos, axis.normalized() * sin)
    }

    /// Angle in `[0, 2π]` and unit axis of this rotation.
    ///
    /// The quaternion is normalized first. Rotations without a defined axis
    /// (the identity) report the axis `OUT`.
    pub fn to_angle_axis(&self) -> AngleAxis {
        let q = self.normalized();
        let angle = 2.0 * q.s.clamp(-1.0, 1.0).acos();
        let axis = if q.v.near_zero() {
            Vec3::OUT
        }
        else {
            q.v.normalized()
        };
        AngleAxis { angle, axis }
    }

    pub fn conjugate(&self) -> Self {
        Self::from_sv(self.s, -self.v)
    }

    pub fn norm_sq(&self) -> f64 {
        self.s*self.s + self.v.len_sq()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        Self::from_sv(self.s / norm, self.v / norm)
    }

    pub fn dot(&self, other: Quaternion) -> f64 {
        self.s*other.s + self.v.dot(other.v)
    }

    /// True when both represent the same rotation within `eps`, ignoring sign.
    pub fn same_rotation(&self, other: Quaternion, eps: f64) -> bool {
        (self.dot(other).abs() - 1.0).abs() < eps
    }

    pub fn approx_eq(&self, other: Quaternion, eps: f64) -> bool {
        (self.s - other.s).abs() < eps && self.v.approx_eq(other.v, eps)
    }

    /// Applies the sandwich `q (0,v) q*` and keeps the vector part.
    ///
    /// Uses the conjugate rather than the inverse, so a non-unit `q` also
    /// scales the result by `|q|²`.
    pub fn rotate(&self, vec: Vec3) -> Vec3 {
        (*self * Quaternion::from_vector(vec) * self.conjugate()).v
    }
}

/// Rotates `vec` by `quat`. See [`Quaternion::rotate`].
pub fn rotate_vector_by_quaternion(vec: Vec3, quat: Quaternion) -> Vec3 {
    quat.rotate(vec)
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. `a * b` applies `b` first, then `a`.
    fn mul(self, other: Self) -> Self::Output {
        Self::from_sv(
            self.s*other.s - self.v.dot(other.v),
            other.v*self.s + self.v*other.s + self.v.cross(other.v),
        )
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::from_sv(self.s * other, self.v * other)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_sv(-self.s, -self.v)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Quaternion {
        Quaternion::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(quat: Quaternion) -> [f64; 4] {
        [quat.s, quat.v.x, quat.v.y, quat.v.z]
    }
}

impl From<AngleAxis> for Quaternion {
    fn from(aa: AngleAxis) -> Quaternion {
        Quaternion::from_angle_axis(aa.angle, aa.axis)
    }
}

impl From<cgmath::Quaternion<f64>> for Quaternion {
    fn from(quat: cgmath::Quaternion<f64>) -> Quaternion {
        Quaternion::from_sv(quat.s, quat.v.into())
    }
}

impl From<Quaternion> for cgmath::Quaternion<f64> {
    fn from(quat: Quaternion) -> cgmath::Quaternion<f64> {
        cgmath::Quaternion::from_sv(quat.s, quat.v.into())
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.s, self.v.x, self.v.y, self.v.z)
    }
}

impl fmt::Display for AngleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad about {}", self.angle, self.axis)
    }
}


#[test]
fn unit_products() {
    let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
    let minus_one = Quaternion::new(-1.0, 0.0, 0.0, 0.0);

    assert!(i * j == k);
    assert!(j * k == i);
    assert!(k * i == j);
    assert!(j * i == -k);
    assert!(i * i == minus_one);
    assert!(i * j * k == minus_one);
}

#[test]
fn product_matches_cgmath() {
    let a = Quaternion::new(0.3, -1.2, 2.0, 0.5);
    let b = Quaternion::new(-0.7, 0.4, 0.1, -1.5);

    let ours = a * b;
    let theirs: Quaternion = (cgmath::Quaternion::<f64>::from(a) * cgmath::Quaternion::<f64>::from(b)).into();
    assert!(ours.approx_eq(theirs, 1e-12));
}

#[test]
fn identity_rotation_is_noop() {
    let v = Vec3::new(0.2, -3.0, 1.0);
    assert!(rotate_vector_by_quaternion(v, Quaternion::identity()) == v);
}

#[test]
fn rotation_matches_cgmath() {
    let q = Quaternion::from_angle_axis(1.1, Vec3::new(1.0, 2.0, -0.5));
    let v = Vec3::new(0.3, -0.8, 2.0);

    let ours = q.rotate(v);
    let theirs: Vec3 = (cgmath::Quaternion::<f64>::from(q) * cgmath::Vector3::<f64>::from(v)).into();
    assert!(ours.approx_eq(theirs, 1e-12));
}

#[test]
fn quarter_turn_about_out() {
    let q = Quaternion::from_angle_axis(std::f64::consts::FRAC_PI_2, Vec3::OUT);
    assert!(q.rotate(Vec3::RIGHT).approx_eq(Vec3::UP, 1e-12));
    assert!(q.rotate(Vec3::UP).approx_eq(-Vec3::RIGHT, 1e-12));
    assert!(q.rotate(Vec3::OUT).approx_eq(Vec3::OUT, 1e-12));
}

#[test]
fn non_unit_rotation_scales_by_norm_sq() {
    let q = Quaternion::from_angle_axis(0.7, Vec3::UP) * 2.0;
    let v = Vec3::new(1.0, 0.5, -1.0);

    let unit = q.normalized().rotate(v);
    assert!(q.rotate(v).approx_eq(unit * 4.0, 1e-12));
}

#[test]
fn angle_axis_round_trip() {
    let axis = Vec3::new(1.0, -1.0, 2.0).normalized();
    for angle in [0.1, 1.0, 2.5, 3.0, 5.0] {
        let aa = Quaternion::from_angle_axis(angle, axis).to_angle_axis();
        assert!((aa.angle - angle).abs() < 1e-9);
        assert!(aa.axis.approx_eq(axis, 1e-9));
    }
}

#[test]
fn identity_angle_axis() {
    let aa = Quaternion::identity().to_angle_axis();
    assert!(aa.angle == 0.0);
    assert!(aa.axis == Vec3::OUT);
}

#[test]
fn conjugate_inverts_unit_rotation() {
    let q = Quaternion::from_angle_axis(2.2, Vec3::new(0.0, 1.0, 1.0));
    assert!((q * q.conjugate()).approx_eq(Quaternion::identity(), 1e-12));
    assert!(q.same_rotation(-q, 1e-12));
}

#[test]
fn array_layout_is_real_first() {
    let q: Quaternion = [1.0, 2.0, 3.0, 4.0].into();
    assert!(q.s == 1.0 && q.v == Vec3::new(2.0, 3.0, 4.0));
    assert!(<[f64; 4]>::from(q) == [1.0, 2.0, 3.0, 4.0]);

    let bytes: &[f64] = bytemuck::cast_slice(std::slice::from_ref(&q));
    assert!(bytes == [1.0, 2.0, 3.0, 4.0]);
}
