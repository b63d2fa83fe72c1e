// Reusable library API — visible to both CLI and WASM builds
pub mod checker;
pub mod counts;
pub mod errors;
pub mod log;
pub mod matching;
pub mod storage;
pub mod tiles;
pub mod wrap;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
