use std::ops::Mul;
use std::fmt;

use crate::vector::Vec3;
use crate::quaternion::Quaternion;

/// Column-major 3 x 3 matrix.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Mat3x3 {
    pub c0: Vec3,
    pub c1: Vec3,
    pub c2: Vec3,
}
impl Mat3x3 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        c0r0: f64, c0r1: f64, c0r2: f64,
        c1r0: f64, c1r1: f64, c1r2: f64,
        c2r0: f64, c2r1: f64, c2r2: f64,
    ) -> Self {
        Self::from_cols(
            Vec3::new(c0r0, c0r1, c0r2),
            Vec3::new(c1r0, c1r1, c1r2),
            Vec3::new(c2r0, c2r1, c2r2),
        )
    }

    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn identity() -> Self {
        Self::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    pub fn approx_eq(&self, other: &Mat3x3, eps: f64) -> bool {
        self.c0.approx_eq(other.c0, eps)
            && self.c1.approx_eq(other.c1, eps)
            && self.c2.approx_eq(other.c2, eps)
    }
}

impl From<Quaternion> for Mat3x3 {
    /// Convert a unit quaternion to a 3 x 3 rotation matrix.
    fn from(quat: Quaternion) -> Mat3x3 {
        let x2 = quat.v.x + quat.v.x;
        let y2 = quat.v.y + quat.v.y;
        let z2 = quat.v.z + quat.v.z;

        let xx2 = x2 * quat.v.x;
        let xy2 = x2 * quat.v.y;
        let xz2 = x2 * quat.v.z;

        let yy2 = y2 * quat.v.y;
        let yz2 = y2 * quat.v.z;
        let zz2 = z2 * quat.v.z;

        let sy2 = y2 * quat.s;
        let sz2 = z2 * quat.s;
        let sx2 = x2 * quat.s;

        Mat3x3::new(
            1.0 - yy2 - zz2, xy2 + sz2,       xz2 - sy2,
            xy2 - sz2,       1.0 - xx2 - zz2, yz2 + sx2,
            xz2 + sy2,       yz2 - sx2,       1.0 - xx2 - yy2,
        )
    }
}

impl Mul<Vec3> for Mat3x3 {
    type Output = Vec3;

    fn mul(self, vec: Vec3) -> Self::Output {
        self.c0 * vec.x + self.c1 * vec.y + self.c2 * vec.z
    }
}

impl fmt::Display for Mat3x3 {
    /// One row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}, {}, {}]", self.c0.x, self.c1.x, self.c2.x)?;
        writeln!(f, "[{}, {}, {}]", self.c0.y, self.c1.y, self.c2.y)?;
        write!(f, "[{}, {}, {}]", self.c0.z, self.c1.z, self.c2.z)
    }
}

#[test]
fn quaternion_matrix_agrees_with_sandwich() {
    let q = Quaternion::from_angle_axis(2.1, Vec3::new(-1.0, 0.5, 3.0));
    let mat = Mat3x3::from(q);
    let v = Vec3::new(0.7, 1.9, -0.4);

    assert!((mat * v).approx_eq(q.rotate(v), 1e-12));
}

#[test]
fn quaternion_matrix_matches_cgmath() {
    let q = Quaternion::from_angle_axis(0.9, Vec3::new(2.0, -1.0, 0.5));
    let ours = Mat3x3::from(q);
    let theirs = cgmath::Matrix3::<f64>::from(cgmath::Quaternion::<f64>::from(q));

    assert!(ours.approx_eq(&Mat3x3::from_cols(theirs.x.into(), theirs.y.into(), theirs.z.into()), 1e-12));
}

#[test]
fn rotation_matrix_is_orthonormal() {
    let mat = Mat3x3::from(Quaternion::from_angle_axis(1.7, Vec3::new(1.0, 1.0, 0.0)));
    for c in [mat.c0, mat.c1, mat.c2] {
        assert!((c.len() - 1.0).abs() < 1e-12);
    }
    assert!(mat.c0.dot(mat.c1).abs() < 1e-12);
    assert!(mat.c1.dot(mat.c2).abs() < 1e-12);
    assert!(mat.c0.cross(mat.c1).approx_eq(mat.c2, 1e-12));
}

#[test]
fn identity_quaternion_gives_identity_matrix() {
    let mat = Mat3x3::from(Quaternion::identity());
    assert!(mat == Mat3x3::identity());
    assert!(mat.to_string() == "[1, 0, 0]\n[0, 1, 0]\n[0, 0, 1]");
}
