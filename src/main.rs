use std::io;
use std::process::ExitCode;

use quatrot::config::Config;
use quatrot::QuatResult;

const USAGE: &str = "
    \rusage: quatrot <command> [args]
    \r  ccw X,Y,Z
    \r  cw X,Y,Z
    \r  polar THETA [RADIUS]
    \r  smoothstep EDGE0 EDGE1 X
    \r  relative X,Y,Z X,Y,Z [-fallback X,Y,Z]
    \r  frames FORWARD1 UP1 FORWARD2 UP2
    \r  rotate X,Y,Z W,X,Y,Z
    \r  check [-count N] [-seed S]";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}\n{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> QuatResult<()> {
    let config = Config::new(std::env::args().skip(1).collect())?;
    log::info!("{config}");

    let report = config.run()?;

    let mut stdout = io::stdout().lock();
    report.write_to(&mut stdout)
}
