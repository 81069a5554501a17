//! CLI entrypoint for LLM Sandbox
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod plan;
mod transcript;

use anyhow::{Context, Result, bail};
use clap::Parser;
use plan::RunPlan;
use sandbox_application::{
    AnalyzeConversationUseCase, ConversationLogger, NoConversationLogger, RunConversationUseCase,
};
use sandbox_domain::{AgentConfig, OutputFormat, SandboxConversation};
use sandbox_infrastructure::{ChatCompletionsGateway, ConfigLoader, FileConfig, JsonlConversationLogger};
use sandbox_presentation::cli::commands::RunArgs;
use sandbox_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Shared per-invocation state
struct App {
    config: FileConfig,
    output: OutputFormat,
    quiet: bool,
    verbose: u8,
    logger: Arc<dyn ConversationLogger>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting LLM Sandbox");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    let output = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let logger: Arc<dyn ConversationLogger> =
        match cli.log.as_ref().or(config.logging.conversation_log.as_ref()) {
            Some(path) => {
                let logger = JsonlConversationLogger::open(path)
                    .with_context(|| format!("Failed to open conversation log {}", path.display()))?;
                info!("Logging conversation events to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        };

    let app = App {
        config,
        output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        logger,
    };

    match cli.command {
        Some(Command::Run(args)) => run(&app, &args).await,
        Some(Command::Analyze { file, threshold }) => analyze(&app, &file, threshold),
        Some(Command::Query { file, query, model }) => {
            query_transcript(&app, &file, &query, model).await
        }
        Some(Command::Presets) => {
            println!("{}", ConsoleFormatter::format_presets());
            Ok(())
        }
        None => bail!("No command given. Try `llm-sandbox --help`."),
    }
}

async fn run(app: &App, args: &RunArgs) -> Result<()> {
    let plan = RunPlan::resolve(args, &app.config)?;

    // === Dependency Injection ===
    let gateway = Arc::new(ChatCompletionsGateway::from_config(&app.config.provider)?);
    let settings = app
        .config
        .conversation_settings()
        .with_default_model(plan.model.clone())
        .with_temperature(plan.temperature);
    let mut use_case = RunConversationUseCase::new(gateway, settings).with_logger(app.logger.clone());

    if !app.quiet {
        eprintln!(
            "Topic: {}\nAgents: {}\n",
            plan.topic,
            plan.agents
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut conversation = use_case
        .start(
            plan.agents.clone(),
            &plan.topic,
            &plan.objective,
            plan.system_prompt.clone(),
        )
        .await?;

    // The opening turn was generated by start()
    let remaining = plan.turns - 1;
    let result = if app.quiet {
        use_case.run(&mut conversation, remaining).await
    } else if app.verbose > 0 {
        // log lines would tear a progress bar
        use_case
            .run_with_progress(&mut conversation, remaining, &SimpleProgress)
            .await
    } else {
        use_case
            .run_with_progress(&mut conversation, remaining, &ProgressReporter::new())
            .await
    };

    if let Some(path) = &args.save {
        transcript::save(path, &conversation)?;
        info!("Transcript saved to {}", path.display());
    }

    print_results(app, &conversation, use_case.agents(), app.config.analytics.shift_threshold);

    if let Err(e) = result {
        warn!("Conversation stopped early after {} messages", conversation.messages.len());
        return Err(e.into());
    }
    Ok(())
}

fn analyze(app: &App, file: &Path, threshold: Option<f64>) -> Result<()> {
    let conversation = transcript::load(file)?;
    let threshold = threshold.unwrap_or(app.config.analytics.shift_threshold);
    if !(threshold > 0.0) {
        bail!("--threshold must be positive, got {}", threshold);
    }

    let agents = conversation.agents();
    print_results(app, &conversation, &agents, threshold);
    Ok(())
}

async fn query_transcript(
    app: &App,
    file: &Path,
    query: &str,
    model: Option<String>,
) -> Result<()> {
    let conversation = transcript::load(file)?;

    let gateway = Arc::new(ChatCompletionsGateway::from_config(&app.config.provider)?);
    let mut settings = app.config.conversation_settings();
    if let Some(model) = model {
        settings = settings.with_default_model(model);
    }
    let use_case = RunConversationUseCase::new(gateway, settings).with_logger(app.logger.clone());

    let answer = use_case.query_conversation(&conversation, query).await?;

    if app.output == OutputFormat::Json {
        let value = serde_json::json!({
            "conversation_id": conversation.id,
            "query": query,
            "answer": answer,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", ConsoleFormatter::format_answer(query, &answer));
    }
    Ok(())
}

/// Print a conversation in the selected output format
fn print_results(
    app: &App,
    conversation: &SandboxConversation,
    agents: &[AgentConfig],
    shift_threshold: f64,
) {
    let analyzer = AnalyzeConversationUseCase::new(shift_threshold);
    let output = match app.output {
        OutputFormat::Transcript => ConsoleFormatter::format_transcript(conversation, agents),
        OutputFormat::Full => {
            let report = analyzer.execute(conversation);
            ConsoleFormatter::format_full(conversation, agents, &report)
        }
        OutputFormat::Json => {
            let report = analyzer.execute(conversation);
            ConsoleFormatter::format_json(conversation, Some(&report))
        }
    };

    println!("{}", output);
}
