//! `levelgen` - dump generated chunks as JSON
//!
//! Usage: `levelgen [PRESET|CONFIG.json] [CHUNKS]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use runner_levelgen::{ChunkContent, ChunkGenerator, LevelConfig, level};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_CHUNKS: u32 = 6;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let source = args.first().map(String::as_str).unwrap_or("runner");
    let config = if source.ends_with(".json") {
        LevelConfig::load(source)?
    } else {
        LevelConfig::preset(source)?
    };
    let chunks = match args.get(1) {
        Some(n) => n.parse::<u32>().map_err(|e| format!("invalid chunk count {n:?}: {e}"))?,
        None => DEFAULT_CHUNKS,
    };

    let generator = ChunkGenerator::new(config)?;
    let content: Vec<ChunkContent> = generator.generate_range(0..chunks).collect();

    let platforms: Vec<_> = content.iter().flat_map(|c| c.platforms.iter().cloned()).collect();
    log::info!(
        "{} chunks from {:?}: {} platforms, {} decorations, {} pickups, {} spawns",
        chunks,
        source,
        platforms.len(),
        content.iter().map(|c| c.decorations.len()).sum::<usize>(),
        content.iter().map(|c| c.pickups.len()).sum::<usize>(),
        content.iter().map(|c| c.spawns.len()).sum::<usize>(),
    );

    let stranded = level::unreachable(&platforms, &generator.envelope());
    for &i in &stranded {
        let p = &platforms[i];
        log::warn!(
            "unreachable {:?} platform in chunk {} at ({:.0}, {:.0})",
            p.kind,
            p.chunk_index,
            p.x,
            p.y
        );
    }
    if stranded.is_empty() {
        log::info!("every platform reachable from the ground");
    }

    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
