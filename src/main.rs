use anyhow::Result;
use async_trait::async_trait;
use clap::{Arg, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};

use yt_scriptgen::transcript::srt::{export_srt, export_text, srt_filename, text_filename};
use yt_scriptgen::transcript::{extract_video_id, fetch_with_fallback};
use yt_scriptgen::{
    Config, HttpTranscriptSource, HttpTranslator, ScriptFormat, ScriptGenerator,
    TranscriptEntry, TranscriptSource, Translator,
};

/// Transcript source backed by a local JSON file of entries
struct FileTranscriptSource {
    path: PathBuf,
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    async fn fetch(
        &self,
        _video_id: &str,
        _language: &str,
    ) -> yt_scriptgen::Result<Vec<TranscriptEntry>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| yt_scriptgen::ScriptGenError::NotFound(e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| yt_scriptgen::ScriptGenError::Input(e.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("yt_scriptgen=info,warn")
        .init();

    let matches = Command::new("yt-scriptgen")
        .version("0.1.0")
        .about("Generate channel-styled script artifacts from video transcripts")
        .arg(
            Arg::new("video")
                .value_name("URL_OR_ID")
                .help("YouTube video URL or bare video id")
                .required(true),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format (default, youtube, movie, narration, summary, title, outline, full, hiroshi, opening, ending)")
                .default_value("default"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Output directory for generated files")
                .default_value("./output"),
        )
        .arg(
            Arg::new("transcript-file")
                .long("transcript-file")
                .value_name("FILE")
                .help("Read transcript entries from a JSON file instead of the caption API"),
        )
        .arg(
            Arg::new("transcript-endpoint")
                .long("transcript-endpoint")
                .value_name("URL")
                .help("Caption API endpoint"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("KIND")
                .help("Export the raw transcript (srt or txt) instead of generating a script"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUM")
                .help("Seed for template draws (reproducible output)"),
        )
        .get_matches();

    let video_input = matches.get_one::<String>("video").unwrap();
    let format = ScriptFormat::from_identifier(matches.get_one::<String>("format").unwrap());
    let output_dir = PathBuf::from(matches.get_one::<String>("output-dir").unwrap());

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::from_env().unwrap_or_default()
    });
    config.validate()?;

    let video_id = extract_video_id(video_input)?;
    info!("Video id: {}", video_id);
    info!("Format: {}", format.identifier());

    let source: Box<dyn TranscriptSource> = match (
        matches.get_one::<String>("transcript-file"),
        matches.get_one::<String>("transcript-endpoint"),
    ) {
        (Some(path), _) => Box::new(FileTranscriptSource {
            path: PathBuf::from(path),
        }),
        (None, Some(endpoint)) => Box::new(HttpTranscriptSource::new(endpoint.clone(), 30)?),
        (None, None) => {
            return Err(anyhow::anyhow!(
                "either --transcript-file or --transcript-endpoint is required"
            ));
        }
    };

    tokio::fs::create_dir_all(&output_dir).await?;

    if let Some(kind) = matches.get_one::<String>("export") {
        let fetched = fetch_with_fallback(
            source.as_ref(),
            &video_id,
            &config.languages.primary,
            &config.languages.fallback,
        )
        .await?;

        let (filename, content) = match kind.as_str() {
            "srt" => (srt_filename(&video_id), export_srt(&fetched.entries)),
            "txt" => (text_filename(&video_id), export_text(&fetched.entries)),
            other => {
                return Err(anyhow::anyhow!(
                    "unknown export kind '{}' (expected srt or txt)",
                    other
                ));
            }
        };

        let path = output_dir.join(filename);
        tokio::fs::write(&path, content).await?;
        info!("Raw transcript written to {}", path.display());
        return Ok(());
    }

    let mut rng = match matches.get_one::<String>("seed") {
        Some(seed) => StdRng::seed_from_u64(seed.parse()?),
        None => StdRng::from_entropy(),
    };

    let translator: Option<HttpTranslator> = if config.translator.endpoint.is_some() {
        Some(HttpTranslator::new(config.translator.clone())?)
    } else {
        None
    };

    let generator = ScriptGenerator::new(config);
    let document = generator
        .run(
            source.as_ref(),
            translator.as_ref().map(|t| t as &dyn Translator),
            &video_id,
            format,
            &mut rng,
        )
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let path = output_dir.join(&document.suggested_filename);
    tokio::fs::write(&path, &document.content).await?;
    info!("Generated {} artifact: {}", format.identifier(), path.display());

    Ok(())
}
