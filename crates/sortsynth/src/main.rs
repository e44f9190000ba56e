#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = sortsynth::run_from_env() {
        eprintln!("sortsynth: {error}");
        std::process::exit(error.exit_code());
    }
}
