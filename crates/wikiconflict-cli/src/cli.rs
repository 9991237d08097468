use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "wikiconflict")]
#[command(about = "Measure editorial conflict and token survival on a Wikipedia article")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// WikiWho "all content" export of the article (JSON)
    #[arg(long, value_name = "PATH")]
    pub actions: PathBuf,

    /// Revision table of the article (JSON)
    #[arg(long, value_name = "PATH")]
    pub revisions: PathBuf,

    /// Analysis config file (defaults to $WIKICONFLICT_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stopword language code
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Keep stopword tokens in the conflict analysis
    #[arg(long)]
    pub include_stopwords: bool,

    /// Stopword list for a language, e.g. `en=data/stopword_list.txt` (repeatable)
    #[arg(long = "stopwords", value_name = "LANG=PATH")]
    pub stopwords: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Page conflict score and the most conflicting editors
    Conflicts {
        /// Number of editors to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edits undone by an editor and the editors they clashed with
    Editor {
        /// Editor id as it appears in the revision table
        editor: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Most touched token strings with their 48-hour survival
    Survival {
        /// Number of token strings ranked per action category
        #[arg(long, value_name = "N")]
        max_words: Option<usize>,
        /// Show survival counts instead of ratios
        #[arg(long)]
        counts: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Conflict totals per time period
    Timeline {
        /// Period width
        #[arg(long, value_enum, default_value_t = Granularity::Monthly)]
        granularity: Granularity,
        /// Break totals down for one editor
        #[arg(long)]
        editor: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Share of the article's tokens owned by an editor over time
    Owned {
        /// Editor id as it appears in the action log
        editor: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a combined conflict and survival report
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for wikiconflict_core::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<Granularity> for wikiconflict_core::Granularity {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => Self::Daily,
            Granularity::Weekly => Self::Weekly,
            Granularity::Monthly => Self::Monthly,
            Granularity::Yearly => Self::Yearly,
        }
    }
}
