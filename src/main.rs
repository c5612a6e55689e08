//! The `eero` binary.

fn main() -> std::process::ExitCode {
    eeroctl::cli::run()
}
