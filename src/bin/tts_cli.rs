//! tts-cli — synthesize speech and list voices from the command line
//!
//! Usage:
//!   tts-cli [--config <file.yaml>] synthesize <text> [--voice <id>] [--model <id>] [--out <file>]
//!   tts-cli [--config <file.yaml>] voices
//!
//! Reads ELEVENLABS_API_KEY (a .env file is loaded first if present).

use anyhow::{anyhow, bail, Context};
use elevenlabs_tts::{SynthesisRequest, SynthesisResult, TtsClient, TtsConfig, VoiceCatalog};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (config_path, args) = take_config_flag(std::env::args().collect())?;
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }
    let config_path = config_path.as_deref();

    match args[1].as_str() {
        "synthesize" | "say" => cmd_synthesize(&args[2..], config_path).await,
        "voices" => cmd_voices(config_path).await,
        "version" | "--version" | "-V" => {
            println!("tts-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"tts-cli — ElevenLabs text-to-speech

USAGE:
    tts-cli <COMMAND> [OPTIONS]

COMMANDS:
    synthesize <text>           Convert text to speech and save it
        --voice <id>            Voice id (default: configured voice)
        --model <id>            Model id (default: configured model)
        --out <file>            File name inside the output directory
    voices                      List voices available to the API key
    version                     Show version information
    help                        Show this help message

GLOBAL OPTIONS:
    --config <file.yaml>        Load configuration from a YAML file

ENVIRONMENT:
    ELEVENLABS_API_KEY          API key (required)
    ELEVENLABS_OUTPUT_DIR       Output directory (default: audio_output)
    ELEVENLABS_VOICE_ID         Default voice id
    ELEVENLABS_MODEL_ID         Default model id
    ELEVENLABS_TIMEOUT_SECS     Request timeout in seconds (default: 30)
    RUST_LOG                    Log filter (default: info)"#
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> anyhow::Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{flag} requires a value")),
        None => Ok(None),
    }
}

/// Remove `--config <file>` from anywhere on the command line so it works before or
/// after the command.
fn take_config_flag(mut args: Vec<String>) -> anyhow::Result<(Option<String>, Vec<String>)> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok((None, args));
    };
    if i + 1 >= args.len() {
        bail!("--config requires a value");
    }
    let path = args.remove(i + 1);
    args.remove(i);
    Ok((Some(path), args))
}

fn build_client(config_path: Option<&str>) -> anyhow::Result<TtsClient> {
    let config = match config_path {
        Some(path) => TtsConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => TtsConfig::from_env()?,
    };
    Ok(TtsClient::builder().config(config).build()?)
}

async fn cmd_synthesize(args: &[String], config_path: Option<&str>) -> anyhow::Result<()> {
    let mut text = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--voice" | "--model" | "--out" => {
                iter.next();
            }
            other if other.starts_with("--") => bail!("Unknown option '{other}'"),
            other if text.is_none() => text = Some(other.to_string()),
            other => bail!("Unexpected argument '{other}'"),
        }
    }
    let Some(text) = text else {
        bail!("Usage: tts-cli synthesize <text> [--voice <id>] [--model <id>] [--out <file>]");
    };

    let client = build_client(config_path)?;
    let mut request = SynthesisRequest::new(text);
    request.voice_id = flag_value(args, "--voice")?.map(str::to_string);
    request.model_id = flag_value(args, "--model")?.map(str::to_string);
    request.filename = flag_value(args, "--out")?.map(str::to_string);

    match client.synthesize_with(&request).await {
        SynthesisResult::Success(ok) => {
            println!("Audio saved to: {}", ok.audio_path.display());
            println!(
                "  {} bytes, {}",
                ok.metadata.content_length,
                ok.metadata.content_type.as_deref().unwrap_or("unknown content type")
            );
            Ok(())
        }
        SynthesisResult::Failure(f) => {
            eprintln!("Synthesis failed ({}): {}", f.kind, f.error);
            if let Some(details) = f.details {
                eprintln!("  response: {details}");
            }
            std::process::exit(1);
        }
    }
}

async fn cmd_voices(config_path: Option<&str>) -> anyhow::Result<()> {
    let client = build_client(config_path)?;
    match client.list_voices().await {
        VoiceCatalog::Success { voices } => {
            println!("{} voices:", voices.len());
            for voice in voices {
                println!(
                    "  {:<24} {:<20} {}",
                    voice.voice_id,
                    voice.name,
                    voice.category.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        VoiceCatalog::Failure(f) => {
            eprintln!("Listing voices failed ({}): {}", f.kind, f.error);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_before_command() {
        let (path, rest) =
            take_config_flag(argv(&["tts-cli", "--config", "tts.yaml", "voices"])).unwrap();
        assert_eq!(path.as_deref(), Some("tts.yaml"));
        assert_eq!(rest, argv(&["tts-cli", "voices"]));
    }

    #[test]
    fn config_flag_after_command() {
        let (path, rest) = take_config_flag(argv(&[
            "tts-cli", "synthesize", "hello", "--config", "tts.yaml", "--voice", "v1",
        ]))
        .unwrap();
        assert_eq!(path.as_deref(), Some("tts.yaml"));
        assert_eq!(rest, argv(&["tts-cli", "synthesize", "hello", "--voice", "v1"]));
    }

    #[test]
    fn config_flag_without_value_is_rejected() {
        assert!(take_config_flag(argv(&["tts-cli", "voices", "--config"])).is_err());
    }

    #[test]
    fn no_config_flag_leaves_args_untouched() {
        let (path, rest) = take_config_flag(argv(&["tts-cli", "voices"])).unwrap();
        assert!(path.is_none());
        assert_eq!(rest, argv(&["tts-cli", "voices"]));
    }
}
