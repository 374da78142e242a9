//! Command-line entry point for the preference-data pipeline.
//!
//! ```bash
//! action-prioritizer profiles --count 25
//! action-prioritizer generate --require-ghg-impact
//! action-prioritizer score
//! action-prioritizer mirror
//! action-prioritizer run
//! ```
//!
//! Settings come from `PRIORITIZER__*` environment variables (and `.env`);
//! path flags override the configured data directory per command.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::fmt;

use action_prioritizer::adapters::{
    JsonDatasetStore, LlmProfileSynthesizer, LlmScoringOracle, OpenAIConfig, OpenAIProvider,
};
use action_prioritizer::application::{
    ConcurrentScorer, GenerateCombinationsCommand, GenerateCombinationsHandler,
    MirrorScoresCommand, MirrorScoresHandler, PipelineError, RunPipelineCommand,
    RunPipelineHandler, ScoreCombinationsCommand, ScoreCombinationsHandler, ScoringReport,
    SynthesizeProfilesCommand, SynthesizeProfilesHandler,
};
use action_prioritizer::config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
use action_prioritizer::domain::generator::CombinationGenerator;
use action_prioritizer::ports::{AIError, AIProvider, DatasetStore, ScoringOracle};

#[derive(Parser)]
#[command(name = "action-prioritizer", version, about = "Builds pairwise climate-action preference data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize personas and write the profiles document
    Profiles(ProfilesArgs),

    /// Pair actions per persona and write the unscored work set
    Generate(GenerateArgs),

    /// Score the work set against the language model oracle
    Score(ScoreArgs),

    /// Write the symmetry-augmented scored set to a separate document
    Mirror(MirrorArgs),

    /// generate, score and mirror in one pass
    Run(RunArgs),
}

#[derive(Args)]
struct ProfilesArgs {
    /// Number of personas (defaults to pipeline.profile_count)
    #[arg(long)]
    count: Option<usize>,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Skip actions without GHG impact data
    #[arg(long)]
    require_ghg_impact: bool,

    /// Sampling seed (overrides pipeline.seed)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    actions: Option<PathBuf>,

    #[arg(long)]
    profiles: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Concurrent oracle calls (overrides pipeline.concurrency)
    #[arg(long)]
    concurrency: Option<usize>,

    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct MirrorArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    require_ghg_impact: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    concurrency: Option<usize>,

    /// Directory holding every document (overrides data.dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Provider(#[from] AIError),
}

impl From<action_prioritizer::config::ValidationError> for CliError {
    fn from(err: action_prioritizer::config::ValidationError) -> Self {
        Self::Config(err.into())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    match execute(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = fmt().with_env_filter(logging.env_filter()).with_target(false);
    match logging.format {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn execute(command: Commands, config: AppConfig) -> Result<(), CliError> {
    let store: Arc<dyn DatasetStore> = Arc::new(JsonDatasetStore::new());

    match command {
        Commands::Profiles(args) => {
            let provider = ai_provider(&config)?;
            let handler = SynthesizeProfilesHandler::new(
                store,
                Arc::new(LlmProfileSynthesizer::new(provider)),
            );
            let profiles = handler
                .handle(SynthesizeProfilesCommand {
                    count: args.count.unwrap_or(config.pipeline.profile_count),
                    output_path: args.output.unwrap_or_else(|| config.data.profiles_path()),
                })
                .await?;
            println!("Generated {} profiles", profiles.len());
        }

        Commands::Generate(args) => {
            let result = generate_handler(&config, store, args.seed)
                .handle(GenerateCombinationsCommand {
                    actions_path: args.actions.unwrap_or_else(|| config.data.actions_path()),
                    profiles_path: args.profiles.unwrap_or_else(|| config.data.profiles_path()),
                    output_path: args.output.unwrap_or_else(|| config.data.combinations_path()),
                    require_ghg_impact: args.require_ghg_impact,
                })
                .await?;
            println!(
                "Generated {} combinations ({} actions x {} profiles)",
                result.combinations, result.actions, result.profiles
            );
        }

        Commands::Score(args) => {
            let handler = score_handler(&config, store, args.concurrency)?;
            let report = handler
                .handle(ScoreCombinationsCommand {
                    input_path: args.input.unwrap_or_else(|| config.data.combinations_path()),
                    output_path: args.output.unwrap_or_else(|| config.data.scores_path()),
                })
                .await?;
            print_report(&report);
        }

        Commands::Mirror(args) => {
            let result = MirrorScoresHandler::new(store)
                .handle(MirrorScoresCommand {
                    input_path: args.input.unwrap_or_else(|| config.data.scores_path()),
                    output_path: args.output.unwrap_or_else(|| config.data.mirrored_path()),
                })
                .await?;
            println!("Original: {} pairs", result.original);
            println!("Mirrored: {} pairs", result.augmented);
        }

        Commands::Run(args) => {
            let mut data = config.data.clone();
            if let Some(dir) = args.data_dir {
                data.dir = dir;
            }
            let handler = RunPipelineHandler::new(
                generate_handler(&config, store.clone(), args.seed),
                score_handler(&config, store.clone(), args.concurrency)?,
                MirrorScoresHandler::new(store),
            );
            let result = handler
                .handle(RunPipelineCommand {
                    actions_path: data.actions_path(),
                    profiles_path: data.profiles_path(),
                    work_set_path: data.combinations_path(),
                    scored_path: data.scores_path(),
                    mirrored_path: data.mirrored_path(),
                    require_ghg_impact: args.require_ghg_impact,
                })
                .await?;
            println!("Generated {} combinations", result.generated.combinations);
            print_report(&result.scoring);
            println!("Mirrored: {} pairs", result.mirrored.augmented);
        }
    }

    Ok(())
}

fn ai_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, CliError> {
    let api_key = config.ai.require_api_key()?;
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let info = provider.provider_info();
    tracing::info!(
        provider = %info.name,
        model = %info.model,
        max_context_tokens = info.max_context_tokens,
        "Using AI provider"
    );
    Ok(Arc::new(provider))
}

fn generate_handler(
    config: &AppConfig,
    store: Arc<dyn DatasetStore>,
    seed: Option<u64>,
) -> GenerateCombinationsHandler {
    let generator = CombinationGenerator::new(config.pipeline.pairs_per_profile)
        .with_seed(seed.or(config.pipeline.seed));
    GenerateCombinationsHandler::new(store, generator)
}

fn score_handler(
    config: &AppConfig,
    store: Arc<dyn DatasetStore>,
    concurrency: Option<usize>,
) -> Result<ScoreCombinationsHandler, CliError> {
    let concurrency = concurrency.unwrap_or(config.pipeline.concurrency);
    if concurrency == 0 || concurrency > action_prioritizer::config::MAX_CONCURRENCY {
        return Err(action_prioritizer::config::ValidationError::InvalidConcurrency {
            value: concurrency,
            max: action_prioritizer::config::MAX_CONCURRENCY,
        }
        .into());
    }

    let oracle: Arc<dyn ScoringOracle> = Arc::new(LlmScoringOracle::new(ai_provider(config)?));
    let scorer = ConcurrentScorer::new(oracle, concurrency, config.ai.timeout());
    Ok(ScoreCombinationsHandler::new(store, scorer))
}

fn print_report(report: &ScoringReport) {
    println!(
        "Done! {} scored, {} failed (of {}). Run {}",
        report.completed, report.failed, report.total, report.run_id
    );
}
