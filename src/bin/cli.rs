use clap::{Parser, Subcommand};
use rank_resolver_engine::{parse_name_list, Mode, RankEngine, ResolveRequest, WebSource};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rank-resolver-cli")]
#[command(about = "Rank Resolver CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a list of names against the published rankings
    Resolve {
        /// Names, separated by comma, pipe, or newline
        names: String,

        /// Ranking list: singles or doubles
        #[arg(short, long, default_value = "doubles")]
        mode: String,
    },

    /// Dump the extracted canonical record list
    Records {
        /// Ranking list: singles or doubles
        #[arg(short, long, default_value = "doubles")]
        mode: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let engine = RankEngine::new(Arc::new(WebSource::new()?));

    match cli.command {
        Commands::Resolve { names, mode } => {
            let names = parse_name_list(&names);
            if names.is_empty() {
                anyhow::bail!("Provide at least one name");
            }
            let mode = Mode::parse(&mode);

            println!("🔍 Resolving {} names ({} rankings)", names.len(), mode);

            let response = engine.resolve(ResolveRequest { names, mode }).await?;

            println!(
                "\n📅 Fetched: {} via {} ({:.1}ms)",
                response.fetched_at.format("%Y-%m-%d"),
                response.extractor,
                response.latency_ms
            );
            println!("{:<6} {:<30} {:<10} {}", "Rank", "Player", "Rating", "Input");
            for row in &response.rows {
                let rank = row
                    .sort_index
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let rating = row
                    .rating
                    .map(|r| format!("{:.3}", r))
                    .unwrap_or_else(|| "n/a".to_string());
                println!("{:<6} {:<30} {:<10} {}", rank, row.player, rating, row.original);
            }

            let unmatched = response.rows.len() - response.matched_count();
            if unmatched > 0 {
                println!("\n⚠️ {} name(s) could not be matched", unmatched);
            }
        }

        Commands::Records { mode } => {
            let mode = Mode::parse(&mode);

            println!("📋 Extracting {} rankings", mode);

            let records = engine.records(mode).await?;

            println!("\n{} canonical records:", records.len());
            for record in &records {
                println!("   {:<30} {:.3}", record.name, record.rating);
            }
        }
    }

    Ok(())
}
