use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hearsay")]
#[command(version)]
#[command(about = "Interview transcript analysis with token-budgeted LLM summarization")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze interview transcripts and write a Markdown report
    Analyze(AnalyzeArgs),

    /// Convert a transcript CSV into JSON
    Convert {
        /// Source CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Destination JSON path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Score transcript relevance without calling the text-generation service
    Score(ScoreArgs),

    /// Print version information
    Version,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Messages CSV (falls back to MESSAGES_CSV_PATH)
    #[arg(long)]
    pub messages_file: Option<PathBuf>,

    /// Sessions CSV (falls back to SESSIONS_CSV_PATH)
    #[arg(long)]
    pub sessions_file: Option<PathBuf>,

    /// Report output path (falls back to REPORT_OUTPUT_PATH)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Cap on the number of sessions analyzed
    #[arg(long)]
    pub limit_sessions: Option<usize>,

    /// Randomly sample sessions instead of taking the first ones
    #[arg(long)]
    pub sample: bool,

    /// Text-generation model name (falls back to OPENAI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Relevance score cut-off
    #[arg(long, default_value_t = hearsay_core::DEFAULT_RELEVANCE_THRESHOLD)]
    pub threshold: f64,

    /// Token budget per analysis chunk
    #[arg(long, default_value_t = hearsay_core::DEFAULT_MAX_TOKENS_PER_CHUNK)]
    pub max_chunk_tokens: usize,

    /// Token budget for the final synthesis prompt
    #[arg(long, default_value_t = hearsay_core::DEFAULT_GLOBAL_PROMPT_BUDGET)]
    pub global_budget: usize,

    /// Upper bound on compression rounds
    #[arg(long, default_value_t = hearsay_core::DEFAULT_MAX_COMPRESSION_ROUNDS)]
    pub max_rounds: usize,

    /// Summaries merged per compression batch
    #[arg(long, default_value_t = hearsay_core::DEFAULT_COMPRESSION_BATCH_SIZE)]
    pub batch_size: usize,

    /// Directory of .txt/.md reference materials for the synthesis prompt
    #[arg(long)]
    pub references_dir: Option<PathBuf>,

    /// Markdown list of external sources used for report citations
    #[arg(long)]
    pub sources_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Messages CSV (falls back to MESSAGES_CSV_PATH)
    #[arg(long)]
    pub messages_file: Option<PathBuf>,

    /// Relevance score cut-off
    #[arg(long, default_value_t = hearsay_core::DEFAULT_RELEVANCE_THRESHOLD)]
    pub threshold: f64,
}
