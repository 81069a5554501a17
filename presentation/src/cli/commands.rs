//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use sandbox_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for sandbox results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Transcript followed by the analytics report
    Full,
    /// Transcript only
    Transcript,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Transcript => OutputFormat::Transcript,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-sandbox
#[derive(Parser, Debug)]
#[command(name = "llm-sandbox")]
#[command(author, version, about = "Multi-agent LLM conversation sandbox with heuristic analytics")]
#[command(long_about = r#"
LLM Sandbox runs a round-robin conversation between several LLM personas and
analyzes the transcript with deterministic heuristics (sentiment, emergent
leadership, information flow and cognitive dimensions).

Configuration files are loaded from (in priority order):
1. SANDBOX_* environment variables (SANDBOX_PROVIDER__DEFAULT_MODEL=...)
2. --config <path>     Explicit config file
3. ./sandbox.toml      Project-level config
4. ~/.config/llm-sandbox/config.toml   Global config

Example:
  llm-sandbox run --template ethical-dilemma --turns 6 --save transcript.json
  llm-sandbox run -a critical-thinker -a devil-advocate --topic "Free will" --objective "Find common ground"
  llm-sandbox analyze transcript.json --output json
  llm-sandbox query transcript.json "Who changed their mind?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append conversation events to this JSONL file (overrides [logging].conversation_log)
    #[arg(long, value_name = "PATH", global = true)]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a conversation between agents
    Run(RunArgs),

    /// Analyze a saved transcript
    Analyze {
        /// Transcript JSON written by `run --save`
        file: PathBuf,

        /// Shift detection threshold (overrides [analytics].shift_threshold)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Ask an analyst model a question about a saved transcript
    Query {
        /// Transcript JSON written by `run --save`
        file: PathBuf,

        /// The question
        query: String,

        /// Model to ask (overrides [provider].default_model)
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// List agent presets, interaction styles and conversation templates
    Presets,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Agent preset ids (can be specified multiple times)
    #[arg(short, long = "agent", value_name = "PRESET")]
    pub agents: Vec<String>,

    /// Conversation template id; supplies topic, objective, system prompt
    /// and agents unless given explicitly
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Conversation topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Conversation objective
    #[arg(long)]
    pub objective: Option<String>,

    /// Extra framing appended to every agent's directive
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Total number of turns, including the opening one
    #[arg(long)]
    pub turns: Option<usize>,

    /// Model for every agent (overrides [provider].default_model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Interaction style id (sets the sampling temperature)
    #[arg(long)]
    pub style: Option<String>,

    /// Write the transcript JSON to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "llm-sandbox",
            "-vv",
            "run",
            "-a",
            "critical-thinker",
            "-a",
            "creative-explorer",
            "--topic",
            "Free will",
            "--turns",
            "4",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputArg::Json));
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.agents, vec!["critical-thinker", "creative-explorer"]);
                assert_eq!(args.topic.as_deref(), Some("Free will"));
                assert_eq!(args.turns, Some(4));
                assert!(args.template.is_none());
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from(["llm-sandbox", "query", "t.json", "Who led?"]).unwrap();
        match cli.command {
            Some(Command::Query { file, query, model }) => {
                assert_eq!(file, PathBuf::from("t.json"));
                assert_eq!(query, "Who led?");
                assert!(model.is_none());
            }
            other => panic!("expected query, got {:?}", other),
        }
    }

    #[test]
    fn test_output_arg_maps_to_domain_format() {
        assert_eq!(OutputFormat::from(OutputArg::Transcript), OutputFormat::Transcript);
        assert_eq!(OutputFormat::from(OutputArg::Full), OutputFormat::Full);
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["llm-sandbox", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
