//! Resume analyzer: entity extraction and job description compatibility scoring

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_analyzer::cli::{self, AnalyzeArgs, Cli, Commands, ConfigAction, ModelAction};
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::ner::bert::{select_device, BertNerModel};
use resume_analyzer::ner::gazetteer::SkillGazetteer;
use resume_analyzer::ner::model_manager::ModelManager;
use resume_analyzer::ner::{CompositeRecognizer, EntityRecognizer};
use resume_analyzer::output::{AnalysisReport, ReportGenerator, ReportMetadata};
use resume_analyzer::processing::scorer::scorer_for;
use resume_analyzer::{Config, ResumeAnalyzer, ResumeAnalyzerError};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze(args) => analyze(args, config).await,
        Commands::Models { action } => models(action, config).await,
        Commands::Config { action } => config_command(action, config),
    }
}

async fn analyze(args: AnalyzeArgs, config: Config) -> Result<()> {
    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeAnalyzerError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = args.detailed || config.output.detailed;
    let input_manager = InputManager::new(config.processing.max_document_bytes);

    let (job_description, job_source) = match (&args.job, &args.job_text) {
        (Some(path), _) => (
            input_manager
                .read_job_description(path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?,
            path.display().to_string(),
        ),
        (None, Some(text)) => (text.clone(), "inline".to_string()),
        (None, None) => {
            return Err(ResumeAnalyzerError::InvalidInput(
                "A job description is required (--job or --job-text)".to_string(),
            )
            .into())
        }
    };

    let document = input_manager
        .load_document(&args.resume)
        .await
        .with_context(|| format!("Failed to load resume {}", args.resume.display()))?;

    let recognizer = build_recognizer(&config, args.no_model)?;
    let analyzer = ResumeAnalyzer::new(recognizer, scorer_for(config.scoring.scorer));
    info!(
        "Analyzing {} with recognizer '{}' and scorer '{}'",
        document.source(),
        analyzer.recognizer_name(),
        analyzer.scorer_name()
    );

    let analysis = analyzer.analyze_document(&document, &job_description)?;
    let report = AnalysisReport::new(
        analysis,
        ReportMetadata {
            generated_at: Utc::now(),
            resume_file: document.source().to_string(),
            job_source,
            recognizer: analyzer.recognizer_name().to_string(),
            scorer: analyzer.scorer_name().to_string(),
            improvement_threshold: config.scoring.improvement_threshold,
        },
    );

    let generator = ReportGenerator::with_options(config.output.color_output, detailed);
    println!("{}", generator.generate_report(&report, &output_format)?);

    if let Some(path) = &args.save {
        let plain = ReportGenerator::with_options(false, detailed);
        let content = plain.generate_report(&report, &output_format)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        println!("💾 Report saved to {}", path.display());
    }

    Ok(())
}

/// Statistical model plus skill list. A configured model that cannot be loaded is fatal.
fn build_recognizer(config: &Config, no_model: bool) -> Result<Arc<dyn EntityRecognizer>> {
    let mut recognizers: Vec<Arc<dyn EntityRecognizer>> = Vec::new();

    if config.recognizer.use_statistical_model && !no_model {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message("Loading NER model...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let model = select_device(config.models.device).and_then(|device| {
            BertNerModel::load(&config.ner_model_dir(), device, config.processing.ner_window_tokens)
        });
        spinner.finish_and_clear();
        recognizers.push(Arc::new(model?));
    } else {
        warn!("Statistical NER disabled, organizations will not be detected");
    }

    if config.recognizer.use_skill_gazetteer {
        let gazetteer = SkillGazetteer::with_custom_skills(config.recognizer.extra_skills.clone())?;
        recognizers.push(Arc::new(gazetteer));
    }

    if recognizers.is_empty() {
        return Err(anyhow!(ResumeAnalyzerError::Configuration(
            "No entity recognizer enabled".to_string()
        )));
    }

    Ok(Arc::new(CompositeRecognizer::new(recognizers)))
}

async fn models(action: ModelAction, config: Config) -> Result<()> {
    let manager = ModelManager::new(config.models.ner_repo_id.clone(), config.ner_model_dir());

    match action {
        ModelAction::Download { force } => {
            println!("⬇️  Downloading model: {}", config.models.ner_repo_id);
            if force {
                println!("🔄 Force download enabled");
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
            spinner.set_message("Fetching model files...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let result = manager.download(force).await;
            spinner.finish_and_clear();

            let path = result?;
            println!("✅ Model downloaded successfully!");
            println!("📁 Location: {}", path.display());
        }

        ModelAction::Info => {
            let info = manager.info().await?;
            println!("📋 NER Model Information\n");
            println!("Repository: {}", info.repo_id);
            println!("Location: {}", info.path.display());
            println!("Size: {:.1} MB", info.size_bytes as f64 / (1024.0 * 1024.0));
            if info.is_complete() {
                println!("Status: ✅ Downloaded");
            } else {
                println!("Status: ⬇️  Missing {}", info.missing_files.join(", "));
                println!("\n💡 To download the model, run:");
                println!("   resume-analyzer models download");
            }
        }
    }

    Ok(())
}

fn config_command(action: Option<ConfigAction>, config: Config) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let content = toml::to_string_pretty(&config).context("Failed to render configuration")?;
            println!("⚙️  Current Configuration\n");
            println!("{}", content);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default().save()?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", Config::config_path().display());
        }
    }

    Ok(())
}
