use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mkvflags", version)]
#[command(
    about = "Set default/forced audio and subtitle tracks of MKV files and strip their titles"
)]
pub struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to mkvmerge, overrides the config file
    #[arg(long, global = true)]
    pub mkvmerge: Option<PathBuf>,

    /// Path to mkvpropedit, overrides the config file
    #[arg(long, global = true)]
    pub mkvpropedit: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose tracks for every .mkv file below a directory
    Edit {
        /// Directory containing MKV files
        directory: PathBuf,

        /// Read the track numbers from a file, one per line, instead of the terminal
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Rename the files of a directory after a list of names
    Rename {
        /// Text file with one new name per line
        #[arg(short = 'f', long)]
        names: PathBuf,

        /// Folder containing the files to rename
        #[arg(short, long)]
        directory: PathBuf,

        /// Number of seasons in the names file, each introduced by a line `s<season #>`
        #[arg(short, long, default_value_t = 0)]
        num_seasons: usize,

        /// Only print the planned renames
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract episode titles from a Wikipedia episode table into a names file
    Scrape {
        /// Text of the heading the episode table follows, e.g. "Season 1"
        #[arg(long)]
        table_heading: String,

        /// Wikipedia page to fetch, only en.wikipedia.org is allowed
        #[arg(long, required_unless_present = "from_html_file")]
        url: Option<String>,

        /// Saved HTML page to read instead of fetching
        #[arg(long, conflicts_with = "url")]
        from_html_file: Option<PathBuf>,

        /// Names file to write, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that mkvmerge and mkvpropedit can be run
    Doctor,
}
