use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'table' or 'json'",
                s
            )),
        }
    }
}

/// List module versions, compilers, packages and dependencies from an
/// HPC module catalog
#[derive(Parser, Debug)]
#[command(name = "modcat")]
#[command(version)]
#[command(about = "Query an HPC module catalog for versions, compilers, packages and dependencies", long_about = None)]
pub struct Args {
    /// Path to the catalog TOML file
    #[arg(short = 'd', long = "catalog")]
    pub catalog: Option<String>,

    /// Collections to list, comma-separated (e.g. "Python,MPI").
    /// Defaults to every collection in the catalog.
    #[arg(short, long = "collections", value_delimiter = ',')]
    pub collections: Vec<String>,

    /// Case-insensitive text filter applied to versions, compilers,
    /// packages and dependencies
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format: table or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to a config file (defaults to ./modcat.config.yml if present)
    #[arg(long)]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
