use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use kai_odds::commitment::{validate_commitment, CommitmentRequest};
use kai_odds::config::Config;
use kai_odds::format::{format_odds, format_percentage, format_signed, format_tokens};
use kai_odds::logging;
use kai_odds::odds::{calculate_odds, calculate_payout, preview_odds_impact, OddsTable};
use kai_odds::snapshot::load_snapshot;
use kai_odds::state::Market;

#[derive(Parser)]
#[command(name = "kai-odds", about = "Pari-mutuel odds for KAI market snapshots")]
struct Cli {
    /// Path to config.toml (defaults are used if it doesn't exist)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current odds for every option
    Odds {
        /// Market snapshot JSON
        market: PathBuf,
    },
    /// Show how a stake would move the odds
    Preview {
        market: PathBuf,
        option: String,
        stake: u64,
    },
    /// Estimate the payout of a stake at current odds
    Payout {
        market: PathBuf,
        option: String,
        stake: u64,
    },
    /// Validate a commitment against a wallet balance and quote it
    Commit {
        market: PathBuf,
        option: String,
        stake: u64,
        balance: u64,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    logging::init(&cfg.general.log_level);
    tracing::debug!(?cfg, "loaded config");

    match cli.command {
        Command::Odds { market } => {
            let market = load_snapshot(&market)?;
            print_header(&market);
            print_table(&market, &calculate_odds(&market, &cfg.policy));
        }
        Command::Preview {
            market,
            option,
            stake,
        } => {
            let market = load_snapshot(&market)?;
            let impact = preview_odds_impact(stake, &option, &market, &cfg.policy)?;
            let projected = market.with_stake(&option, stake)?;
            print_header(&market);
            println!("Stake {} on '{}'", format_tokens(stake), option);
            println!("\nNow:");
            print_table(&market, &impact.current);
            println!("\nAfter:");
            print_table(&projected, &impact.projected);
            println!(
                "\nImpact: {} ({} points)",
                impact.level,
                impact.percentage_shift.round_dp(2)
            );
        }
        Command::Payout {
            market,
            option,
            stake,
        } => {
            let market = load_snapshot(&market)?;
            let payout = calculate_payout(stake, &option, &market, &cfg.policy)?;
            println!("Stake:  {}", format_tokens(stake));
            println!("Odds:   {}", format_odds(payout.odds));
            println!("Payout: {:.2}", payout.gross_payout.round_dp(2));
            println!("Profit: {}", format_signed(payout.net_profit));
            println!("ROI:    {}", format_percentage(payout.roi));
        }
        Command::Commit {
            market,
            option,
            stake,
            balance,
        } => {
            let market = load_snapshot(&market)?;
            let request = CommitmentRequest::new(option, stake, balance);
            let quote = validate_commitment(&market, &request, &cfg.limits, &cfg.policy, Utc::now())?;
            println!(
                "OK: {} tokens on '{}' at {}",
                format_tokens(quote.stake),
                quote.option_id,
                format_odds(quote.payout.odds)
            );
            println!(
                "Potential payout {:.2} ({})",
                quote.payout.gross_payout.round_dp(2),
                format_signed(quote.payout.net_profit)
            );
            println!("Impact: {}", quote.impact.level);
            println!("Balance after: {}", format_tokens(quote.remaining_balance));
        }
    }

    Ok(())
}

fn print_header(market: &Market) {
    println!("{} [{}]", market.title, market.status);
    println!(
        "Pool: {} tokens, {} participants",
        format_tokens(market.total_tokens()),
        format_tokens(market.total_participants)
    );
}

fn print_table(market: &Market, table: &OddsTable) {
    for option in market.options() {
        if let Some(odds) = table.get(&option.id) {
            println!(
                "  {:<24} {:>8} {:>7} {:>10}",
                option.text,
                format_odds(odds.odds),
                format_percentage(odds.percentage),
                format_tokens(option.total_tokens)
            );
        }
    }
}
