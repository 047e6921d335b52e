//! WebAssembly bindings for seqpng

use seqpng_core::{Config, Engine, Rasterizer};
use serde::Serialize;
use wasm_bindgen::prelude::*;

thread_local! {
    static ENGINE: Engine = Engine::from_parts(Config::default(), Rasterizer::bundled());
}

/// Render a sequence diagram to PNG
///
/// # Arguments
/// * `input` - The sequence diagram source text
///
/// # Returns
/// The PNG bytes, or an error message
#[wasm_bindgen]
pub fn render_png(input: &str) -> Result<Vec<u8>, String> {
    ENGINE.with(|engine| engine.render_png(input).map_err(|e| e.to_string()))
}

/// Render a sequence diagram to SVG
#[wasm_bindgen]
pub fn render_svg(input: &str) -> Result<String, String> {
    ENGINE.with(|engine| engine.render_svg(input).map_err(|e| e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    actors: Vec<String>,
    event_count: usize,
    block_count: usize,
    activation_count: usize,
    width: f64,
    height: f64,
}

/// Parse and lay out a sequence diagram and return a JSON summary
///
/// # Returns
/// `{"actors":[...],"eventCount":n,"blockCount":n,"activationCount":n,"width":w,"height":h}`,
/// or an error message
#[wasm_bindgen]
pub fn parse_to_json(input: &str) -> Result<String, String> {
    let diagram = ENGINE
        .with(|engine| engine.layout(input))
        .map_err(|e| e.to_string())?;

    let canvas = diagram.layout().canvas;
    let summary = Summary {
        actors: diagram.actors().iter().map(|a| a.name.clone()).collect(),
        event_count: diagram.events().len(),
        block_count: diagram.blocks().len(),
        activation_count: diagram.activations().len(),
        width: canvas.width,
        height: canvas.height,
    };
    serde_json::to_string(&summary).map_err(|e| e.to_string())
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
