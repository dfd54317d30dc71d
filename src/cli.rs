use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};

#[derive(Parser, Debug)]
#[command(name = "phantichdao", version, about = "Permutation-group frequency analysis of lottery result documents")]
pub struct Cli {
    #[arg(long, global = true, help = "Settings file (defaults to the per-user config directory)")]
    pub config: Option<PathBuf>,
    #[arg(long, short, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse the .docx files of a folder
    Analyze {
        folder: PathBuf,
        #[arg(long, help = "Print the result as JSON instead of the text report")]
        json: bool,
        #[arg(long, help = "Print the comparison table instead of the full report")]
        table: bool,
        #[arg(long, value_name = "PATH", help = "Save the report as CSV (file or directory)")]
        csv: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Save the report as an Excel workbook (file or directory)")]
        xlsx: Option<PathBuf>,
    },
}
