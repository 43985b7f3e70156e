//! Bridge export - builds the reference bridge and dumps it
//!
//! Usage: `bridge-export [params.json] [output dir]`
//!
//! Without arguments the reference bridge is generated with a uniform
//! downward deck load and written to the current directory.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use bridge_fem::prelude::*;

/// Nodal deck load used by the demo (N)
const DECK_NODE_LOAD: f64 = 1.0e5;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let params = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read parameters from {}", path))?;
            BridgeParams::from_json_str(&json)?
        }
        None => BridgeParams::default(),
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    println!("=== Bridge export ===\n");
    println!(
        "main span {} m, side spans {} m, towers {} m, panels {} m",
        params.main_span, params.side_span, params.tower_height, params.segment_length
    );

    let model = BridgeModel::new(
        &UniformDeckLoad::downward(DECK_NODE_LOAD),
        params,
        &AssemblyOptions::bar(),
    )?;

    let system = model.system();
    println!("  Nodes:    {}", model.mesh().node_count());
    println!("  Elements: {}", model.mesh().element_count());
    println!("  Blocks:   {}", system.matrix.nnzb());
    if !system.is_consistent() {
        println!("  {} assembly diagnostics:", system.diagnostics.len());
        for diagnostic in &system.diagnostics {
            println!("    {}", diagnostic);
        }
    }

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    model.export_to_dir(&out_dir)?;
    println!("\nWrote nodes, forces, elements and bridge.vtk to {}", out_dir.display());

    Ok(())
}
