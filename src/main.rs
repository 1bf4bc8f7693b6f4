use bugboard::cli::{report_error, run};
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = enable_ansi_support::enable_ansi_support() {
        log::debug!("ANSI colors unavailable (code {})", e);
    }

    if let Err(e) = run() {
        std::process::exit(report_error(&e));
    }
}
