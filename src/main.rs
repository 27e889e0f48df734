use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use filter_users::{run, Config, Logger, LoggerTrait};

/// Filter the users in a JSON file by name, age, or email
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// User data file (overrides data.file from the config)
    #[clap(long)]
    data: Option<PathBuf>,

    /// Config file (defaults to filter_users.toml next to the executable)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Write a debug log file to the configured log directory
    #[clap(long)]
    log: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 显式指定的配置文件必须存在，默认路径则可以缺省
    let (config_path, mut config) = match args.config {
        Some(path) => {
            let config = Config::load_from_file(&path)?;
            (path, config)
        }
        None => {
            let path = Config::default_config_path()?;
            let config = Config::load_or_default(&path)?;
            (path, config)
        }
    };

    if let Some(data) = args.data {
        config.data.file = data;
    }
    if args.log {
        config.logging.enabled = true;
    }
    config.validate()?;

    let logger = Logger::new(config.logging.enabled, &config.logging.directory)?;

    // 记录生效的配置
    if logger.is_enabled() {
        logger.log_message(&format!("config file: {}", config_path.display()))?;
        let effective = toml::to_string(&config).context("cannot serialize config")?;
        for line in effective.lines().filter(|line| !line.is_empty()) {
            logger.log_message(&format!("config: {}", line))?;
        }
    }

    let start_time = Instant::now();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run(&config.data.file, stdin.lock(), stdout.lock(), &logger)?;

    logger.finalize(&outcome, start_time.elapsed())?;

    Ok(())
}
