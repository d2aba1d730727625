// Departure board for one BART platform on a 128x64 monochrome panel.
extern crate anyhow;
extern crate flexi_logger;
extern crate getopts;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod bart;
mod colors;
mod config;
mod controller;
mod display;
#[cfg(test)]
mod fakes;
mod render;
mod result;
mod schedule;
mod selector;

use anyhow::Context;

fn start_logging(log_dir: &str, level: &str) -> result::BartDashResult<flexi_logger::LoggerHandle> {
    let handle = flexi_logger::Logger::try_with_env_or_str(level)
        .context("while parsing log level")?
        .log_to_file(flexi_logger::FileSpec::default().directory(log_dir))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .format(flexi_logger::detailed_format)
        .start()
        .context("while starting logger")?;
    return Ok(handle);
}

fn run_dashboard<S: render::Surface>(config: &config::Config, surface: S, one_shot: bool) -> result::BartDashResult<()> {
    let transport = bart::HttpTransport::new()?;
    let clock = controller::SystemClock::new(config.tz()?);

    let mut dashboard = controller::Dashboard::new(
        config, transport, surface, clock, controller::ThreadSleeper);

    dashboard.run(if one_shot { Some(1) } else { None });
    return Ok(());
}

// A --save-image path that --skip-display makes pointless.
fn ignored_save_image(matches: &getopts::Matches) -> Option<String> {
    if !matches.opt_present("skip-display") {
        return None;
    }
    return matches.opt_str("save-image");
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt("c", "config", "JSON config file.", "FILENAME");
    opts.optopt("e", "endpoint", "Override the ETD feed URL.", "URL");
    opts.optflag("o", "one-shot", "Run one poll cycle and exit.");
    opts.optflag("d", "skip-display", "Log screens instead of drawing them.");
    opts.optopt("i", "save-image", "Where to put a png of each frame.", "FILENAME");
    opts.optopt("l", "log-dir", "Directory for log files.", "DIR");
    opts.optopt("", "log-level", "Log level, unless RUST_LOG is set.", "LEVEL");
    opts.optflag("h", "help", "Print this help.");
    return opts;
}

fn run(matches: &getopts::Matches) -> result::BartDashResult<()> {
    let mut config = match matches.opt_str("config") {
        Some(path) => config::config_from_file(&path)?,
        None => config::Config::default(),
    };
    if let Some(endpoint) = matches.opt_str("endpoint") {
        config.endpoint = endpoint;
    }

    let one_shot = matches.opt_present("one-shot");
    info!("Running. endpoint={} one-shot={}", config.endpoint, one_shot);

    if matches.opt_present("skip-display") {
        if let Some(png_out) = ignored_save_image(matches) {
            warn!("--skip-display given, not saving frames to {}", png_out);
        }
        return run_dashboard(&config, display::LogSurface::new(), one_shot);
    }

    match display::ImageSurface::from_font_file(&config.font_path, matches.opt_str("save-image")) {
        Ok(surface) => return run_dashboard(&config, surface, one_shot),
        Err(err) => {
            error!("Can't load font {}, logging screens instead: {}", config.font_path, err);
            return run_dashboard(&config, display::LogSurface::new(), one_shot);
        },
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let opts = options();

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{}\n{}", err, opts.usage("Usage: bartdash [options]"));
            std::process::exit(2);
        },
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage("Usage: bartdash [options]"));
        return;
    }

    let log_dir = matches.opt_str("log-dir").unwrap_or(".".to_string());
    let log_level = matches.opt_str("log-level").unwrap_or("info".to_string());
    let _logger = match start_logging(&log_dir, &log_level) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        },
    };

    if let Err(err) = run(&matches) {
        error!("{}", err);
        std::process::exit(1);
    }
}
