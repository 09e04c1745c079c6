use gpu_vecadd::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run_demo() -> Result<()> {
    let session = Session::open(Config::default())?;
    println!("Using platform: {}", session.platform_name());
    println!("Using device: {}\n", session.device_name());

    let report = session.run()?;
    print!("{}", report);
    Ok(())
}
