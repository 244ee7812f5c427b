//! Demo: one coordinated move selection over an in-process worker pool.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cluster::{
    CoordinatorConfig, DistributedCoordinator, InMemoryBus, StaticRegistry, WorkerId, WorkerNode,
};
use engine::{evaluate, Position};

#[derive(Parser, Debug)]
#[command(name = "swarm", about = "Pick one move with a pool of in-process search workers")]
struct Args {
    /// Number of in-process workers to spawn
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Maximum iterative-deepening depth per worker
    #[arg(long, default_value_t = 6)]
    depth: u32,

    /// Wait budget in milliseconds before collecting results
    #[arg(long, default_value_t = 1500)]
    wait_ms: u64,

    /// 65-character position string to move from (defaults to the initial
    /// position)
    #[arg(long)]
    board: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let root = match &args.board {
        Some(encoded) => Position::from_board_string(encoded).context("invalid --board")?,
        None => Position::initial(),
    };

    let bus = InMemoryBus::new();
    let ids: Vec<WorkerId> = (0..args.workers).map(|i| format!("worker-{i}")).collect();
    for id in &ids {
        let node = WorkerNode::new(id.clone(), bus.clone(), args.depth);
        tokio::spawn(node.run());
    }

    let config = CoordinatorConfig {
        wait_budget: Duration::from_millis(args.wait_ms),
        ..CoordinatorConfig::default()
    };
    let coordinator = DistributedCoordinator::new(StaticRegistry::new(ids), bus, config);

    let maximizing = root.side_to_move;
    let chosen = coordinator.choose_move(&root).await?;
    println!(
        "chosen move: {} (static value {})",
        chosen.last_move,
        evaluate(&chosen, maximizing)
    );
    Ok(())
}
