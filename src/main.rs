//! A tool to analyze the health and sustainability of the napari plugin ecosystem.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use plugin_pulse::{Host, run};
use std::io::{Write, stderr, stdout};

/// Host backed by the process's real stdio and exit.
#[derive(Debug, Clone, Default)]
struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
