use clap::Parser;
use flatlay::logger::{self, LogLevel, LoggerConfig};
use flatlay::{codec, GeminiConfig, GeminiImageClient, OutfitGenerator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate Casual, Business and Night Out flat-lay outfits around one clothing item.
#[derive(Debug, Parser)]
#[command(name = "flatlay", version, about)]
struct Cli {
    /// Photo of a single clothing item (jpg, png, webp, gif, heic)
    #[arg(required_unless_present = "list_models")]
    image: Option<PathBuf>,

    /// Gemini image model to use
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Transport timeout for each Gemini request, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// List the supported image models and exit
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let logger_config = if cli.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::default()
    };
    let logger_config = if cli.json_logs {
        logger_config.with_json_output(true).with_colors(false)
    } else {
        logger_config
    };
    let logger_config = if cli.verbose {
        logger_config.with_level(LogLevel::Debug)
    } else {
        logger_config
    };
    let logging = match logger::init_with_config(logger_config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    };

    if dotenv_loaded {
        log::debug!(".env file loaded");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if logging {
                log::error!("Oh no, something went wrong! {}", e);
            } else {
                eprintln!("Oh no, something went wrong! {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> flatlay::Result<()> {
    if cli.list_models {
        for model in GeminiImageClient::supported_models() {
            println!("{}\t{} ({})", model.id, model.name, model.provider);
        }
        return Ok(());
    }

    let mut config = GeminiConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    logger::log_config_info(&config);

    let path = cli
        .image
        .ok_or_else(|| flatlay::OutfitError::DecodeError("no image file given".into()))?;
    let image = codec::read_image_file(&path).await?;
    let generator = OutfitGenerator::from_config(config)?;
    let outfits = generator.generate_outfits(&image).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&outfits)
    } else {
        serde_json::to_string(&outfits)
    }
    .map_err(|e| flatlay::OutfitError::SerializationError(e.to_string()))?;

    println!("{}", output);
    Ok(())
}
