use std::path::PathBuf;

use clap::{Parser, Subcommand};
use neuroloc_lib::config::{self, EngineConfig};
use neuroloc_lib::localization::messages::GuidanceTemplates;
use neuroloc_lib::localization::{parse_responses, DefaultLocalizer, Localizer};
use neuroloc_lib::models::Symptom;
use serde_json::json;

#[derive(Parser)]
#[command(name = "neuroloc")]
#[command(version = config::APP_VERSION)]
#[command(about = "Rule-based neurological lesion localization")]
struct Cli {
    /// Engine config file (JSON). Overrides NEUROLOC_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Localize a set of symptoms
    Evaluate {
        /// Symptom label, exactly as listed by `symptoms` (repeatable)
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,
        /// Free-text chief complaint
        #[arg(short, long, default_value = "")]
        complaint: String,
    },
    /// List the recognised symptom labels
    Symptoms,
    /// Score the NIH Stroke Scale
    Nihss {
        /// Item response as key=value (repeatable); omit to list the items
        #[arg(short, long = "response")]
        responses: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    neuroloc_lib::init_tracing();
    let cli = Cli::parse();

    let engine_config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::from_env(),
    };
    let localizer = DefaultLocalizer::new(engine_config);

    match cli.command {
        Commands::Evaluate {
            symptoms,
            complaint,
        } => {
            let labels: Vec<&str> = symptoms.iter().map(String::as_str).collect();
            let assessment = localizer.evaluate(&labels, &complaint);
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        Commands::Symptoms => {
            for symptom in Symptom::ALL {
                println!("{}", symptom);
            }
        }
        Commands::Nihss { responses } if responses.is_empty() => {
            println!("{}", serde_json::to_string_pretty(localizer.scale().items())?);
        }
        Commands::Nihss { responses } => {
            let parsed = parse_responses(&responses)?;
            let score = localizer.score_severity(&parsed)?;
            let mut summary = vec![GuidanceTemplates::severity_total(
                "NIHSS",
                score.total,
                localizer.scale().max_total(),
            )];
            if !score.is_complete() {
                summary.push(GuidanceTemplates::missing_items(&score.missing_items));
            }
            let output = json!({
                "score": score,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
