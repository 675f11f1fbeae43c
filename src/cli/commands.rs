use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitescope", version, about = "AI-assisted website analysis report service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Run one analysis headless and print the final report
    Analyze(AnalyzeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Report database path
    #[arg(long, default_value = "./data/sitescope.db")]
    pub db: String,

    /// YAML configuration file (provider credentials, or use env vars)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Website URL to analyze
    #[arg(short, long)]
    pub url: String,

    /// Contact email for report delivery
    #[arg(long)]
    pub email: Option<String>,

    /// Business industry
    #[arg(long)]
    pub industry: Option<String>,

    /// Business location
    #[arg(long)]
    pub location: Option<String>,

    /// Company name
    #[arg(long)]
    pub company_name: Option<String>,

    /// AI service to enable, repeatable (default: all supported)
    #[arg(long = "service")]
    pub services: Vec<String>,

    /// YAML configuration file (provider credentials, or use env vars)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seconds to wait for the report to complete
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: String,
}
