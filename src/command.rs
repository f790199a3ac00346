use std::fmt;
use std::io::Write;

use crate::config::{Command, Config};
use crate::easing::smoothstep;
use crate::error::QuatResult;
use crate::matrix::Mat3x3;
use crate::quaternion::{rotate_vector_by_quaternion, Quaternion};
use crate::random::Randf64;
use crate::relative::{
    relative_quaternion,
    relative_quaternion_from_frames,
    relative_quaternion_with_fallback,
};
use crate::vector::{polar_to_cartesian, rotate_ccw, rotate_cw, Vec3};

/// Result of running a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Report {
    Vector(Vec3),
    Scalar(f64),
    Rotation(Quaternion),
    Check {
        pairs:     usize,
        skipped:   usize,
        max_error: f64,
    },
}
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Vector(v) => write!(f, "{v}"),
            Report::Scalar(x) => write!(f, "{x}"),
            Report::Rotation(q) => {
                write!(f, "{q}\n{}\n{}", q.to_angle_axis(), Mat3x3::from(*q))
            }
            Report::Check { pairs, skipped, max_error } => {
                write!(f, "{pairs} frame pairs, {skipped} skipped as antipodal, max error {max_error:e}")
            }
        }
    }
}

impl Report {
    /// Writes the report on its own line. Write failures, such as a closed
    /// pipe, are returned.
    pub fn write_to<W: Write>(&self, out: &mut W) -> QuatResult<()> {
        writeln!(out, "{self}")?;
        out.flush()?;
        Ok(())
    }
}

impl Config {
    pub fn run(&self) -> QuatResult<Report> {
        let report = match self.command {
            Command::Ccw(v) => Report::Vector(rotate_ccw(v)),
            Command::Cw(v) => Report::Vector(rotate_cw(v)),
            Command::Polar { theta, radius } => {
                Report::Vector(polar_to_cartesian(theta, radius))
            }
            Command::Smoothstep { edge0, edge1, x } => {
                Report::Scalar(smoothstep(edge0, edge1, x))
            }
            Command::Relative { v1, v2, fallback: Some(axis) } => {
                Report::Rotation(relative_quaternion_with_fallback(v1, v2, axis))
            }
            Command::Relative { v1, v2, fallback: None } => {
                Report::Rotation(relative_quaternion(v1, v2)?)
            }
            Command::Frames { forward1, up1, forward2, up2 } => {
                Report::Rotation(relative_quaternion_from_frames(forward1, up1, forward2, up2)?)
            }
            Command::Rotate { vec, quat } => {
                Report::Vector(rotate_vector_by_quaternion(vec, quat))
            }
            Command::Check { count, seed } => check_frames(count, seed),
        };
        Ok(report)
    }
}

/// Measures how far frame rotations miss their targets over random frame pairs.
fn check_frames(count: usize, seed: u64) -> Report {
    let mut rand = Randf64::seed(seed);
    let mut skipped = 0;
    let mut max_error: f64 = 0.0;

    for _ in 0..count {
        let from = rand.frame();
        let to = rand.frame();
        match from.rotation_to(&to) {
            Ok(quat) => {
                let moved = from.rotated(quat);
                let error = (moved.forward - to.forward).len().max((moved.up - to.up).len());
                max_error = max_error.max(error);
            }
            Err(err) => {
                log::debug!("skipping frame pair: {err}");
                skipped += 1;
            }
        }
    }
    log::info!("checked {count} frame pairs, max error {max_error:e}");

    Report::Check {
        pairs: count,
        skipped,
        max_error,
    }
}


#[test]
fn runs_scenarios() {
    let run = |line: &str| {
        Config::new(line.split_whitespace().map(String::from).collect())
            .unwrap()
            .run()
            .unwrap()
    };

    assert!(run("cw 0,1,2") == Report::Vector(Vec3::new(1.0, 0.0, 2.0)));
    assert!(run("smoothstep 0 1 0.5") == Report::Scalar(0.5));
    assert!(run("relative 1,0,0 -1,0,0 -fallback 0,0,1") == Report::Rotation(Quaternion::new(0.0, 0.0, 0.0, 1.0)));

    match run("rotate 1,0,0 0,0,0,1") {
        Report::Vector(v) => assert!(v.approx_eq(-Vec3::RIGHT, 1e-12)),
        other => panic!("unexpected report {other}"),
    }
}

#[test]
fn rotation_report_lists_matrix() {
    let report = Report::Rotation(Quaternion::identity());
    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.len() == 5);
    assert!(lines[0] == "(1, 0, 0, 0)");
    assert!(lines[1] == "0 rad about (0, 0, 1)");
    assert!(lines[2] == "[1, 0, 0]");
    assert!(lines[4] == "[0, 0, 1]");
}

#[cfg(test)]
struct ClosedPipe;

#[cfg(test)]
impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_is_reported() {
    let report = Report::Scalar(0.5);
    match report.write_to(&mut ClosedPipe) {
        Err(crate::error::QuatError::Io(err)) => assert!(err.kind() == std::io::ErrorKind::BrokenPipe),
        other => panic!("unexpected result {other:?}"),
    }

    let mut out = Vec::new();
    assert!(report.write_to(&mut out).is_ok());
    assert!(out == b"0.5\n");
}

#[test]
fn antipodal_without_fallback_fails() {
    let cfg = Config::new(vec!["relative".into(), "0,1,0".into(), "0,-1,0".into()]).unwrap();
    assert!(cfg.run().is_err());
}

#[test]
fn check_reports_small_error() {
    match check_frames(200, 17) {
        Report::Check { pairs, skipped, max_error } => {
            assert!(pairs == 200);
            assert!(skipped < pairs);
            assert!(max_error < 1e-6);
        }
        other => panic!("unexpected report {other}"),
    }
}
