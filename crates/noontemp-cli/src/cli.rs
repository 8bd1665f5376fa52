use clap::{Parser, Subcommand};

/// Daily noon-temperature estimation tool
#[derive(Parser, Debug)]
#[command(name = "noontemp")]
#[command(version, about = "Daily noon-temperature estimation tool")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute one target-time temperature per day
    Estimate(EstimateArgs),
    /// Show how every date in the input was resolved
    Explain(ExplainArgs),
}

#[derive(clap::Args, Debug)]
pub struct AnchorArgs {
    /// Early anchor time of day (HH:MM)
    #[arg(long, default_value = "06:00")]
    pub early: String,

    /// Late anchor time of day (HH:MM)
    #[arg(long, default_value = "12:00")]
    pub late: String,

    /// Target time of day (HH:MM)
    #[arg(long, default_value = "11:00")]
    pub target: String,

    /// Decimal digits kept for interpolated values
    #[arg(long, default_value_t = 1)]
    pub precision: u32,

    /// Rounding mode: half_away_from_zero, half_even
    #[arg(long, default_value = "half_away_from_zero")]
    pub rounding: String,

    /// Retention policy: bracketed, exact_or_bracketed
    #[arg(long, default_value = "bracketed")]
    pub retention: String,
}

#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub anchors: AnchorArgs,

    /// Input format: metno, observations
    #[arg(short = 'f', long, default_value = "metno")]
    pub input_format: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,
}

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub anchors: AnchorArgs,

    /// IANA timezone used to display the target time (e.g., Europe/Moscow)
    #[arg(short, long, default_value = "UTC")]
    pub tz: String,

    /// Input format: metno, observations
    #[arg(short = 'f', long, default_value = "metno")]
    pub input_format: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,
}
