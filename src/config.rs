use std::fmt;

use crate::{
    error::ConfigError,
    quaternion::Quaternion,
    vector::Vec3,
};


pub const DEFAULT_CHECK_COUNT: usize = 1000;
pub const DEFAULT_CHECK_SEED: u64 = 555555555;


/// Parsing states.
enum Parse {
    Positional,
    Fallback,
    Count,
    Seed,
}


/// Operation requested on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Ccw(Vec3),
    Cw(Vec3),
    Polar { theta: f64, radius: f64 },
    Smoothstep { edge0: f64, edge1: f64, x: f64 },
    Relative { v1: Vec3, v2: Vec3, fallback: Option<Vec3> },
    Frames { forward1: Vec3, up1: Vec3, forward2: Vec3, up2: Vec3 },
    Rotate { vec: Vec3, quat: Quaternion },
    Check { count: usize, seed: u64 },
}

/// User defined configuration settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub command: Command,
}
impl Config {
    /// Create a new Config with the specified command line arguments.
    pub fn new(args: Vec<String>) -> Result<Config, ConfigError> {
        let mut args = args.into_iter();
        let name = args.next().ok_or(ConfigError::MissingCommand)?;

        let mut parser     = Parse::Positional;
        let mut positional = Vec::new();
        let mut fallback   = None;
        let mut count      = None;
        let mut seed       = None;
        let mut flags      = Vec::new();

        for arg in args {
            if let Parse::Positional = parser {
                match arg.as_str() {
                    "-fallback" => {
                        parser = Parse::Fallback;
                    }
                    "-count" => {
                        parser = Parse::Count;
                    }
                    "-seed" => {
                        parser = Parse::Seed;
                    }
                    flag if is_flag(flag) => {
                        return Err(
                            ConfigError::UnknownFlag(arg.clone())
                        );
                    }
                    _ => {
                        positional.push(arg);
                        continue;
                    }
                }
                flags.push(arg);
                continue;
            }
            match parser {
                Parse::Positional => {}
                Parse::Fallback => {
                    fallback = Some(parse_vec(&arg)?);
                }
                Parse::Count => {
                    if let Ok(n) = arg.parse::<usize>() {
                        count = Some(n);
                    }
                    else {
                        return Err(
                            ConfigError::InvalidCount(arg.clone())
                        );
                    }
                }
                Parse::Seed => {
                    if let Ok(s) = arg.parse::<u64>() {
                        seed = Some(s);
                    }
                    else {
                        return Err(
                            ConfigError::InvalidSeed(arg.clone())
                        );
                    }
                }
            }
            parser = Parse::Positional;
        }
        if !matches!(parser, Parse::Positional) {
            if let Some(flag) = flags.pop() {
                return Err(
                    ConfigError::MissingFlagValue(flag)
                );
            }
        }

        let allowed: &[&str] = match name.as_str() {
            "relative" => &["-fallback"],
            "check" => &["-count", "-seed"],
            _ => &[],
        };
        if let Some(flag) = flags.iter().find(|f| !allowed.contains(&f.as_str())) {
            return Err(
                ConfigError::UnexpectedFlag(name.clone(), flag.clone())
            );
        }

        let expect = |range: std::ops::RangeInclusive<usize>| {
            if range.contains(&positional.len()) {
                Ok(())
            }
            else {
                Err(ConfigError::WrongArgCount(name.clone(), positional.len()))
            }
        };

        let command = match name.as_str() {
            "ccw" => {
                expect(1..=1)?;
                Command::Ccw(parse_vec(&positional[0])?)
            }
            "cw" => {
                expect(1..=1)?;
                Command::Cw(parse_vec(&positional[0])?)
            }
            "polar" => {
                expect(1..=2)?;
                Command::Polar {
                    theta:  parse_num(&positional[0])?,
                    radius: match positional.get(1) {
                        Some(r) => parse_num(r)?,
                        None => 1.0,
                    },
                }
            }
            "smoothstep" => {
                expect(3..=3)?;
                Command::Smoothstep {
                    edge0: parse_num(&positional[0])?,
                    edge1: parse_num(&positional[1])?,
                    x:     parse_num(&positional[2])?,
                }
            }
            "relative" => {
                expect(2..=2)?;
                Command::Relative {
                    v1: parse_vec(&positional[0])?,
                    v2: parse_vec(&positional[1])?,
                    fallback,
                }
            }
            "frames" => {
                expect(4..=4)?;
                Command::Frames {
                    forward1: parse_vec(&positional[0])?,
                    up1:      parse_vec(&positional[1])?,
                    forward2: parse_vec(&positional[2])?,
                    up2:      parse_vec(&positional[3])?,
                }
            }
            "rotate" => {
                expect(2..=2)?;
                Command::Rotate {
                    vec:  parse_vec(&positional[0])?,
                    quat: parse_quat(&positional[1])?,
                }
            }
            "check" => {
                expect(0..=0)?;
                Command::Check {
                    count: count.unwrap_or(DEFAULT_CHECK_COUNT),
                    seed:  seed.unwrap_or(DEFAULT_CHECK_SEED),
                }
            }
            _ => {
                return Err(
                    ConfigError::UnknownCommand(name.clone())
                );
            }
        };
        Ok(Config { command })
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.command {
            Command::Ccw(v) => write!(f, "ccw {v}"),
            Command::Cw(v) => write!(f, "cw {v}"),
            Command::Polar { theta, radius } => {
                write!(f, "polar theta {theta} radius {radius}")
            }
            Command::Smoothstep { edge0, edge1, x } => {
                write!(f, "smoothstep [{edge0}, {edge1}] at {x}")
            }
            Command::Relative { v1, v2, fallback } => {
                write!(f, "relative {v1} -> {v2}")?;
                if let Some(axis) = fallback {
                    write!(f, " fallback {axis}")?;
                }
                Ok(())
            }
            Command::Frames { forward1, up1, forward2, up2 } => {
                write!(f, "frames ({forward1}, {up1}) -> ({forward2}, {up2})")
            }
            Command::Rotate { vec, quat } => write!(f, "rotate {vec} by {quat}"),
            Command::Check { count, seed } => write!(f, "check {count} frame pairs, seed {seed}"),
        }
    }
}

/// Anything dash-led that is not a number or a component list.
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && !arg.contains(',') && arg.parse::<f64>().is_err()
}

fn parse_num(arg: &str) -> Result<f64, ConfigError> {
    arg.trim().parse::<f64>().map_err(|_| ConfigError::InvalidNumber(arg.to_string()))
}

fn parse_components(arg: &str) -> Option<Vec<f64>> {
    arg.split(',')
        .map(|c| c.trim().parse::<f64>().ok())
        .collect()
}

/// Parses `X,Y,Z`.
pub fn parse_vec(arg: &str) -> Result<Vec3, ConfigError> {
    match parse_components(arg).as_deref() {
        Some(&[x, y, z]) => Ok(Vec3::new(x, y, z)),
        _ => Err(ConfigError::InvalidVector(arg.to_string())),
    }
}

/// Parses `W,X,Y,Z`, real part first.
pub fn parse_quat(arg: &str) -> Result<Quaternion, ConfigError> {
    match parse_components(arg).as_deref() {
        Some(&[w, x, y, z]) => Ok(Quaternion::new(w, x, y, z)),
        _ => Err(ConfigError::InvalidQuaternion(arg.to_string())),
    }
}


#[cfg(test)]
fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[test]
fn parses_vector_commands() {
    let cfg = Config::new(args("ccw 1,2,3")).unwrap();
    assert!(cfg.command == Command::Ccw(Vec3::new(1.0, 2.0, 3.0)));

    let cfg = Config::new(args("rotate 1,0,0 1,0,0,0")).unwrap();
    assert!(cfg.command == Command::Rotate { vec: Vec3::RIGHT, quat: Quaternion::identity() });
}

#[test]
fn polar_radius_defaults_to_one() {
    let cfg = Config::new(args("polar 0.5")).unwrap();
    assert!(cfg.command == Command::Polar { theta: 0.5, radius: 1.0 });

    let cfg = Config::new(args("polar 0.5 -2")).unwrap();
    assert!(cfg.command == Command::Polar { theta: 0.5, radius: -2.0 });
}

#[test]
fn relative_fallback_flag() {
    let cfg = Config::new(args("relative 1,0,0 -1,0,0 -fallback 0,0,1")).unwrap();
    assert!(cfg.command == Command::Relative {
        v1: Vec3::RIGHT,
        v2: -Vec3::RIGHT,
        fallback: Some(Vec3::OUT),
    });
}

#[test]
fn check_flags() {
    let cfg = Config::new(args("check -count 20 -seed 4")).unwrap();
    assert!(cfg.command == Command::Check { count: 20, seed: 4 });

    let cfg = Config::new(args("check")).unwrap();
    assert!(cfg.command == Command::Check { count: 1000, seed: 555555555 });
}

#[test]
fn rejects_bad_input() {
    assert!(Config::new(Vec::new()) == Err(ConfigError::MissingCommand));
    assert!(Config::new(args("spin 1,2,3")) == Err(ConfigError::UnknownCommand("spin".into())));
    assert!(Config::new(args("ccw 1,2")) == Err(ConfigError::InvalidVector("1,2".into())));
    assert!(Config::new(args("frames 1,0,0 0,1,0")) == Err(ConfigError::WrongArgCount("frames".into(), 2)));
    assert!(Config::new(args("smoothstep 0 1 x")) == Err(ConfigError::InvalidNumber("x".into())));
    assert!(Config::new(args("check -count many")) == Err(ConfigError::InvalidCount("many".into())));
    assert!(Config::new(args("ccw 1,2,3 -wobble")) == Err(ConfigError::UnknownFlag("-wobble".into())));
    assert!(Config::new(args("check -seed x")) == Err(ConfigError::InvalidSeed("x".into())));
}

#[test]
fn rejects_flag_misuse() {
    assert!(Config::new(args("relative 1,0,0 -1,0,0 -fallback")) == Err(ConfigError::MissingFlagValue("-fallback".into())));
    assert!(Config::new(args("check -count")) == Err(ConfigError::MissingFlagValue("-count".into())));
    assert!(Config::new(args("check -count 5 -seed")) == Err(ConfigError::MissingFlagValue("-seed".into())));
    assert!(Config::new(args("ccw 1,2,3 -count 5")) == Err(ConfigError::UnexpectedFlag("ccw".into(), "-count".into())));
    assert!(Config::new(args("check -fallback 0,0,1")) == Err(ConfigError::UnexpectedFlag("check".into(), "-fallback".into())));
}

#[test]
fn dash_led_numbers_are_positional() {
    let cfg = Config::new(args("polar -inf")).unwrap();
    assert!(cfg.command == Command::Polar { theta: f64::NEG_INFINITY, radius: 1.0 });

    let cfg = Config::new(args("smoothstep -1 -0.5 -0.75")).unwrap();
    assert!(cfg.command == Command::Smoothstep { edge0: -1.0, edge1: -0.5, x: -0.75 });
}
