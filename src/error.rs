use std::fmt;
use std::io;
use std::error::Error;

use crate::vector::Vec3;

pub type QuatResult<T> = Result<T, QuatError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationError {
    /// The two directions point opposite ways, so the shortest arc is not unique.
    DegenerateRotation(Vec3, Vec3),
    /// A frame's forward and up are not unit length and perpendicular.
    NotOrthonormal(Vec3, Vec3),
}
impl fmt::Display for RotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationError::DegenerateRotation(v1, v2) => {
                write!(f, "no unique shortest rotation from {v1} to antipodal {v2}; supply a fallback axis")
            }
            RotationError::NotOrthonormal(forward, up) => {
                write!(f, "frame is not orthonormal: forward {forward}, up {up}")
            }
        }
    }
}
impl Error for RotationError {}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingCommand,
    UnknownCommand(String),
    UnknownFlag(String),
    UnexpectedFlag(String, String),
    MissingFlagValue(String),
    WrongArgCount(String, usize),
    InvalidNumber(String),
    InvalidVector(String),
    InvalidQuaternion(String),
    InvalidCount(String),
    InvalidSeed(String),
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCommand => {
                write!(f, "no command given")
            }
            ConfigError::UnknownCommand(cmd) => {
                write!(f, "unknown command: {cmd}")
            }
            ConfigError::UnknownFlag(flag) => {
                write!(f, "unknown flag: {flag}")
            }
            ConfigError::UnexpectedFlag(cmd, flag) => {
                write!(f, "{cmd} does not take {flag}")
            }
            ConfigError::MissingFlagValue(flag) => {
                write!(f, "missing value after {flag}")
            }
            ConfigError::WrongArgCount(cmd, count) => {
                write!(f, "wrong number of arguments for {cmd}: got {count}")
            }
            ConfigError::InvalidNumber(arg) => {
                write!(f, "invalid number: {arg}")
            }
            ConfigError::InvalidVector(arg) => {
                write!(f, "invalid vector, expected X,Y,Z: {arg}")
            }
            ConfigError::InvalidQuaternion(arg) => {
                write!(f, "invalid quaternion, expected W,X,Y,Z: {arg}")
            }
            ConfigError::InvalidCount(arg) => {
                write!(f, "invalid count: {arg}")
            }
            ConfigError::InvalidSeed(arg) => {
                write!(f, "invalid seed: {arg}")
            }
        }
    }
}
impl Error for ConfigError {}

#[derive(Debug)]
pub enum QuatError {
    Rotation(RotationError),
    Config(ConfigError),
    Io(io::Error),
}
impl From<RotationError> for QuatError {
    fn from(err: RotationError) -> Self {
        Self::Rotation(err)
    }
}
impl From<ConfigError> for QuatError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
impl From<io::Error> for QuatError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
impl fmt::Display for QuatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuatError::Rotation(err) => write!(f, "rotation error: {err}"),
            QuatError::Config(err) => write!(f, "config error: {err}"),
            QuatError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}
impl Error for QuatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QuatError::Rotation(err) => Some(err),
            QuatError::Config(err) => Some(err),
            QuatError::Io(err) => Some(err),
        }
    }
}
