use wasm_bindgen::prelude::*;
use kekule_engine::InputEvent;

// Model
pub mod elements;
pub mod molecule;
pub mod geometry;

// Interaction and rendering
pub mod config;
pub mod interaction;
pub mod renderer;
pub mod toolbar;

// Main editor controller
pub mod game;

pub use game::MoleculeSketch;

kekule_web::export_game!(MoleculeSketch, "molecule-editor");
