//! Bakehouse administration CLI

use std::process;

use bakehouse_app::{
    database::{self, Db},
    domain::promotions::{PgPromotionsService, PromotionsService, data::NewPromotion},
};
use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;

#[derive(Debug, Parser)]
#[command(name = "bakehouse-app", about = "Bakehouse admin CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Manage promotion banners
    Promotion(PromotionCommand),
}

#[derive(Debug, Args)]
struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    /// Publish a new banner
    Create(CreatePromotionArgs),

    /// List every banner, newest first
    List,
}

#[derive(Debug, Args)]
struct CreatePromotionArgs {
    /// Banner text
    #[arg(long)]
    message: String,

    /// Optional expiry, e.g. `2026-12-31T23:59:59Z`
    #[arg(long)]
    expires_at: Option<Timestamp>,

    /// Create the banner switched off
    #[arg(long)]
    inactive: bool,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if cli.database_url.is_empty() {
        return Err("DATABASE_URL is required".to_string());
    }

    let pool = database::connect(&cli.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Migrate => {
            database::migrate(&pool)
                .await
                .map_err(|error| format!("failed to run migrations: {error}"))?;

            println!("migrations applied");
        }
        Commands::Promotion(PromotionCommand { command }) => {
            let service = PgPromotionsService::new(Db::new(pool));

            match command {
                PromotionSubcommand::Create(args) => create_promotion(&service, args).await?,
                PromotionSubcommand::List => list_promotions(&service).await?,
            }
        }
    }

    Ok(())
}

async fn create_promotion(
    service: &PgPromotionsService,
    args: CreatePromotionArgs,
) -> Result<(), String> {
    let promotion = service
        .create_promotion(NewPromotion {
            active: !args.inactive,
            expires_at: args.expires_at,
            ..NewPromotion::new(args.message)
        })
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))?;

    println!("promotion_uuid: {}", promotion.uuid);
    println!("message: {}", promotion.message);
    println!("active: {}", promotion.active);

    Ok(())
}

async fn list_promotions(service: &PgPromotionsService) -> Result<(), String> {
    let promotions = service
        .list_promotions()
        .await
        .map_err(|error| format!("failed to list promotions: {error}"))?;

    let now = Timestamp::now();

    for promotion in promotions {
        let state = if promotion.is_visible(now) { "shown" } else { "hidden" };

        println!("{}\t{state}\t{}", promotion.uuid, promotion.message);
    }

    Ok(())
}
