mod script;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use canvas::config::EditorConfig;
use canvas::engine::Engine;
use clap::Parser;

use crate::script::ReplayError;

#[derive(Parser, Debug)]
#[command(name = "wireframe-replay", about = "Replay canvas input scripts and print the resulting frame")]
struct Cli {
    /// Newline-delimited JSON events. Reads stdin when omitted.
    #[arg(long, env = "WIREFRAME_SCRIPT")]
    script: Option<PathBuf>,

    /// Viewport width in screen pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in screen pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Print the document store instead of the scene.
    #[arg(long)]
    document: bool,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let mut engine = Engine::with_config(EditorConfig::from_env()?);
    engine.set_viewport(cli.width, cli.height);

    let stats = match &cli.script {
        Some(path) => script::replay(BufReader::new(File::open(path)?), &mut engine)?,
        None => script::replay(io::stdin().lock(), &mut engine)?,
    };
    tracing::info!(
        events = stats.events,
        actions = stats.actions,
        traces = engine.doc.traces().len(),
        components = engine.doc.components().len(),
        "replay finished"
    );

    let rendered = if cli.document {
        serde_json::to_string_pretty(&engine.doc)
    } else {
        serde_json::to_string_pretty(&engine.scene())
    }
    .map_err(ReplayError::Output)?;
    println!("{rendered}");
    Ok(())
}
