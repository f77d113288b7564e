//! Run the default 8×8 mesh and print the final grid as an ASCII map.
//!
//! ```text
//! cargo run -p heatmesh-engine --example heat -- [steps] [--cooperative]
//! RUST_LOG=heatmesh_engine=debug cargo run -p heatmesh-engine --example heat
//! ```

use std::time::Instant;

use heatmesh_engine::{CooperativeMesh, MeshConfig, MeshOutput, ThreadedMesh};
use tracing::info;
use tracing_subscriber::EnvFilter;

const RAMP: &[u8] = b" .:-=+*#%@";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = MeshConfig::default();
    let mut cooperative = false;
    for arg in std::env::args().skip(1) {
        if arg == "--cooperative" {
            cooperative = true;
        } else {
            config.steps = arg.parse()?;
        }
    }
    config.validate()?;

    info!(
        nodes = config.node_count(),
        edge_len = config.edge_len(),
        steps = config.steps,
        cooperative,
        "starting run"
    );
    let start = Instant::now();
    let out: MeshOutput = if cooperative {
        CooperativeMesh::new(&config, 0)?.run()?
    } else {
        ThreadedMesh::new(config.clone())?.run()?
    };
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        words = out.words.len(),
        "run finished"
    );

    let (lo, hi) = (config.cold.integer_part(), config.hot.integer_part());
    let span = hi.saturating_sub(lo).max(1) as usize;
    for row in out.grid(config.global_extent()) {
        let line: String = row
            .iter()
            .map(|&t| {
                let level = (t as usize).saturating_sub(lo as usize) * (RAMP.len() - 1) / span;
                RAMP[level.min(RAMP.len() - 1)] as char
            })
            .collect();
        println!("{line}");
    }

    let sent: u64 = out.metrics.iter().map(|(_, m)| m.messages_sent).sum();
    let early: u64 = out.metrics.iter().map(|(_, m)| m.early_buffered).sum();
    info!(sent, early, "exchange totals");
    Ok(())
}
