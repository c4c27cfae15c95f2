// src/main.rs

use sysconfig::{cli, run};

fn main() {
    if let Err(err) = run(cli::parse()) {
        eprintln!("sysconfig error: {err:?}");
        std::process::exit(1);
    }
}
