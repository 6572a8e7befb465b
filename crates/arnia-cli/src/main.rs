//! Arnia CLI — submit beehive tray photos to the SferoWeb image API.
//!
//! Set SFEROWEB_USERNAME and SFEROWEB_PASSWORD (see `UploaderConfig` for the
//! full list of env vars). `upload` runs the pipeline; `fields` is a dry run
//! that prints the form that would be sent, credentials redacted.

use anyhow::Context;
use arnia_cli::{build_context, init_tracing};
use arnia_client::UploadPipeline;
use arnia_core::{MeasurementType, PhotoCapture, UploadGate, UploaderConfig};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "arnia", about = "SferoWeb tray-photo uploader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CaptureArgs {
    /// Photo source: a file path, file:// URI, or provider reference
    source: String,
    /// Hive identifier (defaults to SFEROWEB_ARNIA_ID)
    #[arg(long)]
    arnia_id: Option<String>,
    /// Scale factor applied server-side (defaults to SFEROWEB_SCALE)
    #[arg(long)]
    scale: Option<f64>,
    /// Days the monitoring tray stayed in place
    #[arg(long, default_value_t = 0)]
    days: u32,
    /// Measurement type: CadutaNaturale or Trattamento
    #[arg(long, default_value = "CadutaNaturale")]
    tipo: String,
    /// Filename suggested for the upload (inferred when omitted)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a tray photo
    Upload(CaptureArgs),
    /// Dry run: print the form fields that would be sent, without sending
    Fields(CaptureArgs),
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = UploaderConfig::from_env()
        .context("Failed to load config. Set SFEROWEB_USERNAME and SFEROWEB_PASSWORD")?;
    let pipeline = UploadPipeline::from_config(&config)?;

    let cli = Cli::parse();

    let (args, dry_run) = match cli.command {
        Commands::Upload(args) => (args, false),
        Commands::Fields(args) => (args, true),
    };

    let tipo: MeasurementType = args.tipo.parse().map_err(anyhow::Error::from)?;
    let context = build_context(&config, args.arnia_id, args.scale, args.days, tipo)
        .validate()
        .map_err(anyhow::Error::from)?;

    let capture = PhotoCapture {
        source_uri: args.source,
        suggested_filename: args.name,
        width: None,
        height: None,
    };

    if dry_run {
        let form = pipeline
            .prepare(&capture, &context)
            .await
            .map_err(anyhow::Error::from)?;
        print_json(&serde_json::json!({
            "fields": form.redacted_fields(),
            "file": {
                "name": form.file.name,
                "file_name": form.file.file_name,
                "mime": form.file.mime,
                "size_bytes": form.file.data.len(),
            },
        }))?;
        return Ok(());
    }

    // One upload per invocation; the guard still models the single-flight
    // contract the pipeline is written against.
    let gate = UploadGate::new();
    let _guard = gate
        .try_begin()
        .ok_or_else(|| anyhow::anyhow!("An upload is already in flight"))?;

    let outcome = pipeline.upload(&capture, &context).await;
    print_json(&outcome)?;

    if !outcome.is_success() {
        let n = outcome.notification();
        eprintln!("{}: {}", n.title, n.message);
        std::process::exit(1);
    }
    Ok(())
}
