use altre_textarea::app::App;
use altre_textarea::logging::{self, LogLevel, Logger};
use altre_textarea::{TextAreaConfig, Theme};
use anyhow::{bail, Context};
use std::path::PathBuf;

/// コマンドライン引数
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<LogLevel>,
    theme: Option<String>,
    value: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    // rawモード中は端末へ書けないため、ログはファイルにだけ出す
    if let Some(path) = &options.log_file {
        let logger = Logger::new(options.log_level.unwrap_or(LogLevel::Info))
            .without_stderr()
            .with_file_output(path);
        logging::init(logger).context("failed to install logger")?;
    }

    let config = match &options.config {
        Some(path) => TextAreaConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TextAreaConfig::load_or_default().context("failed to load default config")?,
    };
    let theme = options.theme.as_deref().map(Theme::by_name).unwrap_or_default();

    let mut app = App::new(config, theme);
    if let Some(value) = &options.value {
        app.textarea_mut().set_value(value);
    }

    let value = app.run().context("text area session failed")?;
    println!("{}", value);
    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--log" => options.log_file = Some(PathBuf::from(value("--log")?)),
            "--log-level" => {
                let name = value("--log-level")?;
                match LogLevel::parse(&name) {
                    Some(level) => options.log_level = Some(level),
                    None => bail!("unknown log level: {}", name),
                }
            }
            "--theme" => options.theme = Some(value("--theme")?),
            "--value" => options.value = Some(value("--value")?),
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(options)
}

fn print_usage() {
    println!("altre-textarea {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE: altre-textarea [--config PATH] [--theme plain|light|dark] [--value TEXT]");
    println!("                      [--log PATH] [--log-level trace|debug|info|warn|error]");
}
