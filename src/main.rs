use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rgb565::models::{AppConfig, OptionOverrides};
use rgb565::server::{self, ApiDoc};
use rgb565::services::{encode_image, ConversionService};
use rgb565_pipeline::{export_c_array, ExportOptions, PipelineConfig};

#[derive(Parser)]
#[command(name = "rgb565")]
#[command(about = "Convert PNG images to RGB565 for embedded displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a PNG to an RGB565-quantized PNG
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file (default: <input>_rgb565.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a C header to this path
        #[arg(long)]
        header: Option<PathBuf>,

        /// C array name for --header
        #[arg(long, default_value = rgb565_pipeline::export::DEFAULT_ARRAY_NAME)]
        array_name: String,

        #[command(flatten)]
        options: ConversionArgs,
    },
    /// Convert a PNG and write it as a C header
    Export {
        /// Input PNG file
        input: PathBuf,

        /// Output header file (default: <input>_rgb565.h)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// C array name
        #[arg(long, default_value = rgb565_pipeline::export::DEFAULT_ARRAY_NAME)]
        array_name: String,

        #[command(flatten)]
        options: ConversionArgs,
    },
}

/// Conversion flags shared by `convert` and `export`.
#[derive(Args, Debug, Default)]
struct ConversionArgs {
    /// Preset from the config file (default preset if omitted)
    #[arg(long)]
    preset: Option<String>,

    /// Dither algorithm: floyd-steinberg, ordered, atkinson, or none
    #[arg(long)]
    dither: Option<String>,

    /// Filter: none, grayscale, sepia, invert, brightness, contrast, edge-enhance
    #[arg(long)]
    filter: Option<String>,

    /// Filter intensity (0.0 to 1.0)
    #[arg(long)]
    intensity: Option<f32>,

    /// Resize by percentage
    #[arg(long, conflicts_with_all = ["width", "height"])]
    scale: Option<f64>,

    /// Target width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Keep the aspect ratio when both width and height are given
    #[arg(long)]
    aspect_lock: bool,

    /// Resampling algorithm: nearest, bilinear, bicubic
    #[arg(long)]
    resample: Option<String>,
}

impl ConversionArgs {
    fn pipeline_config(&self, config: &AppConfig) -> anyhow::Result<PipelineConfig> {
        let base = config.preset(self.preset.as_deref()).with_context(|| {
            format!(
                "Unknown preset '{}' (available: {})",
                self.preset.as_deref().unwrap_or_default(),
                config.preset_names().join(", ")
            )
        })?;
        let overrides = OptionOverrides {
            dither: self.dither.clone(),
            filter: self.filter.clone(),
            intensity: self.intensity,
            scale: self.scale,
            width: self.width,
            height: self.height,
            aspect_lock: self.aspect_lock.then_some(true),
            resample: self.resample.clone(),
        };
        Ok(overrides.apply(base).to_pipeline_config())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            header,
            array_name,
            options,
        }) => {
            init_cli_logging();
            run_convert_command(&input, output, header, &array_name, &options)
        }
        Some(Commands::Export {
            input,
            output,
            array_name,
            options,
        }) => {
            init_cli_logging();
            run_export_command(&input, output, &array_name, &options)
        }
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_logging() {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rgb565=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// `photo.png` -> `photo_rgb565.<extension>` in the same directory.
fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_rgb565.{extension}"))
}

/// Convert a PNG file (no server needed)
fn run_convert_command(
    input: &Path,
    output: Option<PathBuf>,
    header: Option<PathBuf>,
    array_name: &str,
    args: &ConversionArgs,
) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let pipeline = args.pipeline_config(&config)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let buffer = ConversionService::new()
        .process_png(&bytes, &pipeline)
        .map_err(|e| anyhow::anyhow!("Conversion error: {e}"))?;
    let image = encode_image(&buffer).map_err(|e| anyhow::anyhow!("Conversion error: {e}"))?;

    let output = output.unwrap_or_else(|| default_output(input, "png"));
    std::fs::write(&output, &image.png)?;
    println!(
        "Converted {} ({}x{}, {} bytes)",
        output.display(),
        image.width,
        image.height,
        image.png.len()
    );

    if let Some(header) = header {
        let options = ExportOptions::new().array_name(array_name);
        std::fs::write(&header, export_c_array(&buffer, &options))?;
        println!("Exported {} (array '{}')", header.display(), options.name());
    }

    Ok(())
}

/// Convert a PNG file to a C header
fn run_export_command(
    input: &Path,
    output: Option<PathBuf>,
    array_name: &str,
    args: &ConversionArgs,
) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let pipeline = args.pipeline_config(&config)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let options = ExportOptions::new().array_name(array_name);
    let text = ConversionService::new()
        .export_png(&bytes, &pipeline, &options)
        .map_err(|e| anyhow::anyhow!("Export error: {e}"))?;

    let output = output.unwrap_or_else(|| default_output(input, "h"));
    std::fs::write(&output, &text)?;
    println!(
        "Exported {} (array '{}', {} bytes)",
        output.display(),
        options.name(),
        text.len()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("rgb565 v{VERSION}");
    println!("PNG to RGB565 converter for embedded displays\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Presets section
    let config = match config_file.as_deref() {
        Some(path) if Path::new(path).exists() => AppConfig::load(Path::new(path)),
        _ => AppConfig::default(),
    };
    println!("\nPresets:");
    for name in config.preset_names() {
        let marker = if name == config.default_preset {
            " (default)"
        } else {
            ""
        };
        println!("  {name}{marker}");
    }

    // Commands section
    println!("\nCommands:");
    println!("  rgb565 serve     Start the HTTP server");
    println!("  rgb565 convert   Convert a PNG to an RGB565 PNG");
    println!("  rgb565 export    Convert a PNG to a C header");
    println!("\nRun 'rgb565 --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rgb565=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();
    tracing::info!(
        config = ?std::env::var("CONFIG_FILE").unwrap_or_else(|_| "built-in".to_string()),
        presets = config.presets.len(),
        "Configuration loaded"
    );

    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "rgb565 server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
