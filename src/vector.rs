use std::ops::{Neg, Add, Sub, Mul, Div};
use std::fmt;

/// Tolerance used when comparing directions.
pub const DIR_EPSILON: f64 = 0.000001;

#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const RIGHT:  Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const UP:     Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const OUT:    Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the unit circle at `theta` radians.
    pub fn from_angle(theta: f64) -> Self {
        polar_to_cartesian(theta, 1.0)
    }

    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f64 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }

    pub fn dot(&self, vec: Vec3) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    pub fn cross(&self, vec: Vec3) -> Self {
        Self::new(
            self.y*vec.z - self.z*vec.y,
            self.z*vec.x - self.x*vec.z,
            self.x*vec.y - self.y*vec.x,
        )
    }

    /// Unit vector in the same direction. A zero vector yields NaN components.
    pub fn normalized(&self) -> Self {
        let len = self.len();
        Self::new(self.x / len, self.y / len, self.z / len)
    }

    pub fn near_zero(&self) -> bool {
        let s = 0.00000001;
        self.x.abs() < s && self.y.abs() < s && self.z.abs() < s
    }

    /// Componentwise comparison within `eps`.
    pub fn approx_eq(&self, other: Vec3, eps: f64) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
    }

    /// Quarter turn counter-clockwise about the z-axis. z is passed through.
    pub fn rotated_ccw(&self) -> Self {
        Self::new(-self.y, self.x, self.z)
    }

    /// Quarter turn clockwise about the z-axis. z is passed through.
    pub fn rotated_cw(&self) -> Self {
        Self::new(self.y, -self.x, self.z)
    }

    pub fn rotated_180(&self) -> Self {
        Self::new(-self.x, -self.y, self.z)
    }
}

/// Multiplies the xy-part of `vec` by `i`.
pub fn rotate_ccw(vec: Vec3) -> Vec3 {
    vec.rotated_ccw()
}

/// Multiplies the xy-part of `vec` by `-i`.
pub fn rotate_cw(vec: Vec3) -> Vec3 {
    vec.rotated_cw()
}

/// Point at angle `theta` on a circle of `radius` around the origin, in the xy-plane.
///
/// A negative radius mirrors the point through the origin, which flips the
/// winding of arcs built from it.
pub fn polar_to_cartesian(theta: f64, radius: f64) -> Vec3 {
    let (sin, cos) = theta.sin_cos();
    Vec3::new(cos * radius, sin * radius, 0.0)
}

/// Start and end points of an arc of `angle` radians beginning at `angle_offset`.
pub fn arc_endpoints(angle: f64, radius: f64, angle_offset: f64) -> (Vec3, Vec3) {
    (
        polar_to_cartesian(angle_offset, radius),
        polar_to_cartesian(angle_offset + angle, radius),
    )
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, other: f64) -> Self::Output {
        Self::new(self.x / other, self.y / other, self.z / other)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Vec3 {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(vec: Vec3) -> [f64; 3] {
        [vec.x, vec.y, vec.z]
    }
}

impl From<cgmath::Vector3<f64>> for Vec3 {
    fn from(vec: cgmath::Vector3<f64>) -> Vec3 {
        Vec3::new(vec.x, vec.y, vec.z)
    }
}

impl From<Vec3> for cgmath::Vector3<f64> {
    fn from(vec: Vec3) -> cgmath::Vector3<f64> {
        cgmath::Vector3::new(vec.x, vec.y, vec.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}


#[test]
fn cross_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let cross = v.cross(v2);
    assert!(cross == Vec3::new(-45.0, 0.0, 30.0));
}

#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let dot = v.dot(v2);
    assert!(dot == 53.0);
}

#[test]
fn quarter_turns_are_inverse() {
    let vecs = [
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-0.5, 4.0, 0.0),
        Vec3::new(0.0, 0.0, -7.0),
    ];
    for v in vecs {
        assert!(rotate_ccw(rotate_cw(v)) == v);
        assert!(rotate_cw(rotate_ccw(v)) == v);
    }
}

#[test]
fn quarter_turn_directions() {
    assert!(rotate_ccw(Vec3::RIGHT) == Vec3::UP);
    assert!(rotate_cw(Vec3::UP) == Vec3::RIGHT);
    assert!(rotate_ccw(Vec3::new(1.0, 2.0, 5.0)) == Vec3::new(-2.0, 1.0, 5.0));
    assert!(rotate_cw(Vec3::new(1.0, 2.0, 5.0)) == Vec3::new(2.0, -1.0, 5.0));
}

#[test]
fn two_quarter_turns_negate_plane_part() {
    let v = Vec3::new(3.0, -2.0, 1.5);
    let twice = rotate_ccw(rotate_ccw(v));
    assert!(twice == v.rotated_180());
    assert!(twice == Vec3::new(-3.0, 2.0, 1.5));
}

#[test]
fn polar_points() {
    use std::f64::consts::{FRAC_PI_2, PI};

    assert!(polar_to_cartesian(0.0, 1.0) == Vec3::RIGHT);
    assert!(Vec3::from_angle(FRAC_PI_2).approx_eq(Vec3::UP, 1e-12));
    assert!(polar_to_cartesian(PI, 2.0).approx_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-12));
    assert!(polar_to_cartesian(1.3, 0.0) == Vec3::ORIGIN);
}

#[test]
fn polar_is_linear_in_radius() {
    for i in 0..16 {
        let theta = i as f64 * 0.45 - 3.0;
        for r in [-2.0, -0.5, 0.0, 0.25, 3.0] {
            let scaled = Vec3::from_angle(theta) * r;
            assert!(polar_to_cartesian(theta, r).approx_eq(scaled, 1e-12));
        }
    }
}

#[test]
fn arc_endpoints_follow_offset() {
    use std::f64::consts::FRAC_PI_2;

    let (start, end) = arc_endpoints(FRAC_PI_2, 2.0, FRAC_PI_2);
    assert!(start.approx_eq(Vec3::new(0.0, 2.0, 0.0), 1e-12));
    assert!(end.approx_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-12));
}

#[test]
fn cgmath_round_trip() {
    let v = Vec3::new(1.5, -2.0, 0.25);
    let cg: cgmath::Vector3<f64> = v.into();
    assert!(Vec3::from(cg) == v);
}
