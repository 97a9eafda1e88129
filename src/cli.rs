use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitcal")]
#[command(about = "Contribution calendar for your local git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to the repository store database")]
    pub store: Option<PathBuf>,
}

impl CommonArgs {
    /// `--store`, or `~/.gitcal/repos.db`.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store {
            Some(path) => Ok(path.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".gitcal").join("repos.db"))
                .ok_or_else(|| anyhow::anyhow!("No home directory; pass --store")),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find git repositories below a folder and remember them
    Scan {
        #[arg(help = "Folder to search for repositories")]
        folder: PathBuf,
    },
    /// Show the last six months of commits by one author
    Stats {
        #[arg(long, help = "Author email, matched exactly")]
        email: String,

        #[arg(long, help = "Draw the calendar as of this moment (RFC3339, YYYY-MM-DD, or a duration ago like 3weeks)")]
        as_of: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Disable colors")]
        no_color: bool,
    },
    /// List remembered repositories
    Repos,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { folder } => crate::scan::exec(&self.common, &folder),
            Commands::Stats {
                email,
                as_of,
                json,
                no_color,
            } => crate::calendar::exec(&self.common, &email, as_of.as_deref(), json, no_color),
            Commands::Repos => crate::store::exec(&self.common),
        }
    }
}
