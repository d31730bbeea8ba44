#![deny(unsafe_code)]

use std::{env, io, process::ExitCode};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    daemon::exit_code_from(daemon::run(env::args_os(), &mut stdout, &mut stderr))
}
