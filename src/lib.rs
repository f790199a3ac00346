//! Rotation math for placing and turning objects in animated explanations
//! of complex numbers and quaternions.

pub mod vector;
pub mod quaternion;
pub mod matrix;
pub mod relative;
pub mod easing;
pub mod random;
pub mod error;
pub mod config;
pub mod command;

pub use crate::vector::{Vec3, rotate_ccw, rotate_cw, polar_to_cartesian, arc_endpoints};
pub use crate::quaternion::{Quaternion, AngleAxis, rotate_vector_by_quaternion};
pub use crate::relative::{
    Frame,
    orient_plane,
    relative_quaternion,
    relative_quaternion_with_fallback,
    relative_quaternion_from_frames,
};
pub use crate::easing::{smoothstep, clamp};
pub use crate::error::{QuatError, QuatResult, RotationError};
