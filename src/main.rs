//! ieeg-clips CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = ieeg_clips::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
