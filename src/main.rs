use std::io;
use std::process;

use log::error;

use speedup::{Comparison, PythonModule};

// Python and Cython builds of the same benchmark, imported from the current directory.
const BASELINE_MODULE: &str = "run_python";
const CONTENDER_MODULE: &str = "run_cython";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> speedup::Result<()> {
    let baseline = PythonModule::spawn(BASELINE_MODULE)?;
    let contender = PythonModule::spawn(CONTENDER_MODULE)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    Comparison::default().run_and_print(&mut out, baseline, contender)?;
    Ok(())
}
