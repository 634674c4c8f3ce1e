pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ladder;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}

pub fn handle_ladder() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let conn = database::get_connection(&pool)?;
    let players = database::players::list_by_rank(&conn)?;

    if players.is_empty() {
        println!("{}", "No players registered yet.".yellow());
        return Ok(());
    }

    println!(
        "{:>4}  {:<30} {:>5} {:>8} {:>4} {:>4}",
        "Rank".bold(),
        "Player".bold(),
        "Lvl".bold(),
        "Rating".bold(),
        "W".bold(),
        "L".bold()
    );
    for player in players {
        let rank = match player.ladder_rank {
            1 => format!("{:>4}", player.ladder_rank).green().bold(),
            2 | 3 => format!("{:>4}", player.ladder_rank).cyan(),
            _ => format!("{:>4}", player.ladder_rank).normal(),
        };
        println!(
            "{}  {:<30} {:>5} {:>8.0} {:>4} {:>4}",
            rank, player.name, player.level, player.rating, player.wins, player.losses
        );
    }
    Ok(())
}

fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "tennis_ladder.db".to_string())
}
