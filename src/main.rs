mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

const USAGE: &str = "Usage: extension-bridge [-c|--config <path>]

Options:
  -c, --config <path>  Config file path without extension (default: config)
  -h, --help           Print this help";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(config_path) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Requests are served one at a time, so a single thread is all the server needs
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(server::run(&cfg))
}

/// Returns the config path, or `None` when help was requested
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<String>, String> {
    let mut config_path = config::DEFAULT_CONFIG_PATH.to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config_path = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a path\n\n{USAGE}"))?;
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("Unknown argument: {other}\n\n{USAGE}")),
        }
    }

    Ok(Some(config_path))
}
