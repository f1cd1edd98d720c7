//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use cricbuzz_livestats::{
    cli::{types::StatKind, AnalyticsCmd, Cli, Commands, DbCmd, PlayerCmd},
    commands::{
        admin::handle_admin,
        analytics::{handle_analytics_list, handle_analytics_run, handle_analytics_show},
        db::{handle_db_import, handle_db_init, handle_db_tables},
        home::handle_home,
        live_matches::handle_live_matches,
        player_stats::{
            handle_player_career, handle_player_profile, handle_player_search,
            handle_player_stats,
        },
        CommandContext,
    },
    core::Config,
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(app: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    let ctx = CommandContext::new(config);

    match app.command {
        Commands::Home => handle_home(&ctx)?,

        Commands::Live { refresh, output } => handle_live_matches(&ctx, refresh, &output).await?,

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Search { name, raw, json } => {
                handle_player_search(&ctx, &name, raw, json).await?
            }
            PlayerCmd::Profile { id, raw } => handle_player_profile(&ctx, id, raw).await?,
            PlayerCmd::Batting { id, raw, output } => {
                handle_player_stats(&ctx, id, StatKind::Batting, raw, &output).await?
            }
            PlayerCmd::Bowling { id, raw, output } => {
                handle_player_stats(&ctx, id, StatKind::Bowling, raw, &output).await?
            }
            PlayerCmd::Career { id, raw, output } => {
                handle_player_career(&ctx, id, raw, &output).await?
            }
        },

        Commands::Analytics { cmd } => match cmd {
            AnalyticsCmd::List => handle_analytics_list()?,
            AnalyticsCmd::Show { id } => handle_analytics_show(id)?,
            AnalyticsCmd::Run { id, output } => handle_analytics_run(&ctx, id, &output)?,
        },

        Commands::Admin { cmd } => handle_admin(&ctx, cmd)?,

        Commands::Db { cmd } => match cmd {
            DbCmd::Init => handle_db_init(&ctx)?,
            DbCmd::Tables => handle_db_tables(&ctx)?,
            DbCmd::Import { path } => handle_db_import(&ctx, &path)
                .with_context(|| format!("importing {}", path.display()))?,
        },
    }

    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() {
    // .env.local wins over .env; neither is required.
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let app = Cli::parse();
    init_logging(app.verbose);

    if let Err(e) = run(app).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
