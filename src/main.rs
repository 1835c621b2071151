use anyhow::Context;
use ash::Interpreter;
use ash::config::Config;
use env_logger::Env;

fn setup_logging(config: &Config) {
    env_logger::Builder::from_env(Env::default().filter_or("ASH_LOG", config.default_log_filter()))
        .format_timestamp(None)
        .init();
}

fn run(config: Config) -> anyhow::Result<()> {
    let mut sh = Interpreter::stdio()
        .with_prompt(config.prompt)
        .with_eof_loops(config.eof_loops);
    log::debug!("starting in {}", sh.env().current_dir.display());

    match sh.repl(std::io::stdin().lock()) {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => Err(e).context("cannot keep reading commands"),
        Err(e) => {
            // The terminal went away; there is nobody left to report to.
            log::warn!("stopping: {}", e);
            Ok(())
        }
    }
}

fn main() {
    let config: Config = argh::from_env();
    setup_logging(&config);

    if let Err(e) = run(config) {
        eprintln!("ash: {:#}", e);
        std::process::exit(1);
    }
}
