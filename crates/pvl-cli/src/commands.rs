use std::path::Path;

use colored::Colorize;

use pvl_ledger::Ledger;
use pvl_store::FileChainStore;
use pvl_types::ChainRecord;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = FileChainStore::open(Path::new(&cli.ledger))?;
    let ledger = Ledger::new(store);

    match cli.command {
        Command::Log(args) => cmd_log(&ledger, args),
        Command::Verify(_) => cmd_verify(&ledger),
        Command::History(args) => cmd_history(&ledger, args),
        Command::Show(args) => cmd_show(&ledger, args),
    }
}

fn cmd_log(ledger: &Ledger<FileChainStore>, args: LogArgs) -> anyhow::Result<()> {
    let records = ledger.read_all()?;
    if records.is_empty() {
        println!("Ledger is empty.");
        return Ok(());
    }

    let skip = records.len().saturating_sub(args.limit);
    for record in records.iter().skip(skip) {
        if args.oneline {
            print_oneline(record);
        } else {
            print_record(record);
        }
    }
    Ok(())
}

fn cmd_verify(ledger: &Ledger<FileChainStore>) -> anyhow::Result<()> {
    let report = ledger.verify_integrity()?;
    if report.is_valid() {
        println!(
            "{} chain valid ({} records)",
            "✓".green().bold(),
            report.records_checked
        );
        return Ok(());
    }

    println!(
        "{} chain INVALID, first broken at sequence {}",
        "✗".red().bold(),
        report
            .first_broken_at
            .map(|s| s.to_string())
            .unwrap_or_default()
            .yellow()
    );
    for violation in &report.violations {
        println!("  seq {}: {}", violation.sequence, violation.description);
    }
    std::process::exit(1);
}

fn cmd_history(ledger: &Ledger<FileChainStore>, args: HistoryArgs) -> anyhow::Result<()> {
    let trail = ledger.find_by_subject(&args.batch_id)?;
    if trail.is_empty() {
        println!("No records for batch {}.", args.batch_id.yellow());
        return Ok(());
    }
    for record in &trail {
        print_record(record);
    }
    Ok(())
}

fn cmd_show(ledger: &Ledger<FileChainStore>, args: ShowArgs) -> anyhow::Result<()> {
    let records = ledger.read_all()?;
    let Some(record) = records.iter().find(|r| r.sequence == args.sequence) else {
        anyhow::bail!("no record with sequence {}", args.sequence);
    };

    print_record(record);
    println!("  content: {}", record.content_fingerprint.to_string().dimmed());
    println!("  prev:    {}", record.previous_link_hash.to_string().dimmed());
    println!("  link:    {}", record.link_hash.to_string().dimmed());
    Ok(())
}

fn print_oneline(record: &ChainRecord) {
    println!(
        "{} {} {} {}",
        format!("r#{}", record.sequence).yellow(),
        record.link_hash.short().dimmed(),
        record.kind.to_string().cyan(),
        record.subject_ref()
    );
}

fn print_record(record: &ChainRecord) {
    println!(
        "{}  {}  {}",
        format!("r#{}", record.sequence).yellow().bold(),
        record.link_hash.short().dimmed(),
        record.kind.to_string().cyan()
    );
    println!("  subject: {}", record.subject_ref());
    println!("  time:    {}", record.timestamp);
}
