//! Headless TetrECS runner (default binary).
//!
//! Reads one command per line from stdin (`place X Y`, `rotate`,
//! `rotate-left`, `swap`, `quit`) and runs a single-player game against the
//! real turn timer. When the game ends the score is offered to the local
//! ledger, then the final snapshot and the top ten are printed to stdout as
//! one JSON document.
//!
//! Logs go to stderr; set `RUST_LOG` to change the filter.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tetrecs::core::{GameConfig, GameEngine};
use tetrecs::ledger::{ScoreLedger, DEFAULT_LEDGER_PATH, TOP_SCORES};
use tetrecs::multiplayer::{run_session, SessionInput};
use tetrecs::types::GameCommand;

fn load_config() -> Result<GameConfig> {
    match env::var("TETRECS_CONFIG") {
        Ok(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))
        }
        Err(_) => Ok(GameConfig::from_env()),
    }
}

async fn forward_stdin(tx: mpsc::Sender<SessionInput>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let input = if trimmed.eq_ignore_ascii_case("quit") {
            SessionInput::Shutdown
        } else if let Some(command) = GameCommand::parse(trimmed) {
            SessionInput::Command(command)
        } else {
            tracing::warn!(line = trimmed, "unrecognised command");
            continue;
        };

        if tx.send(input).await.is_err() {
            break;
        }
    }

    // Stdin closed: end the session rather than play on with no input.
    let _ = tx.send(SessionInput::Shutdown).await;
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("tetrecs=info".parse()?)
                .add_directive("tetrecs_core=info".parse()?)
                .add_directive("tetrecs_multiplayer=info".parse()?)
                .add_directive("tetrecs_ledger=info".parse()?),
        )
        .init();

    let config = load_config()?;
    let ledger_path =
        env::var("TETRECS_SCORES_PATH").unwrap_or_else(|_| DEFAULT_LEDGER_PATH.to_string());
    let player = env::var("TETRECS_PLAYER").unwrap_or_else(|_| "Player".to_string());

    let mut engine = GameEngine::single_player(config).context("invalid game config")?;
    engine.start()?;

    let (tx, rx) = mpsc::channel::<SessionInput>(64);
    tokio::spawn(forward_stdin(tx));

    let snapshot = run_session(engine, rx).await;

    let mut ledger = ScoreLedger::load_or_seed(&ledger_path);
    if ledger.is_high_score(snapshot.score) {
        ledger.insert(player.as_str(), snapshot.score);
        match ledger.save(&ledger_path) {
            Ok(()) => tracing::info!(player = %player, score = snapshot.score, "new high score saved"),
            Err(err) => tracing::warn!(path = %ledger_path, error = %err, "could not save scores"),
        }
    }

    let report = serde_json::json!({
        "game": snapshot,
        "high_scores": ledger.top(TOP_SCORES),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
