use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pvl",
    about = "ProvLine — custody provenance ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the chain segment file
    #[arg(long, global = true, default_value = "provline.chain")]
    pub ledger: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show recorded custody events
    Log(LogArgs),
    /// Verify chain integrity
    Verify(VerifyArgs),
    /// Show the custody trail of one batch
    History(HistoryArgs),
    /// Show a single record in detail
    Show(ShowArgs),
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct VerifyArgs {}

#[derive(Args)]
pub struct HistoryArgs {
    pub batch_id: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub sequence: u64,
}
