use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log::LevelFilter::Warn)
        .init();

    surveyor::cli::run()
}
