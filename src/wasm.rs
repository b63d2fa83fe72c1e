use crate::checker::{check, CheckOutcome};
use crate::counts::LabelCounts;
use crate::errors::CheckError;
use crate::log::init_logger;
use crate::storage;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "C001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<CheckError> for WasmError {
    fn from(e: CheckError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // Format a comprehensive error message
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

/// Initialize tilecheck logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    // 1. Set up panic hook
    console_error_panic_hook::set_once();

    // 2. Initialize logging with the provided debug setting
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
    if !debug_enabled {
        log::info!("Debug logging disabled");
    }
}

/// Grouped counts cross the boundary as `[label, count]` pair arrays so
/// first-occurrence order survives; a JS object built from them keeps it.
fn count_pairs(counts: &LabelCounts) -> Vec<(String, usize)> {
    counts.iter().map(|(label, n)| (label.to_string(), n)).collect()
}

#[derive(serde::Serialize)]
struct WasmCheckResult {
    /// "satisfied", "unsatisfiable", or "row_overflow"
    status: String,
    rows: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Vec<(String, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    needed: Option<Vec<(String, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignments: Option<Vec<Vec<Option<String>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    leftover_total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    leftover: Option<Vec<(String, usize)>>,
}

impl From<CheckOutcome> for WasmCheckResult {
    fn from(outcome: CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::RowOverflow { required_rows, available_rows, rows } => WasmCheckResult {
                status: "row_overflow".to_string(),
                rows,
                required_rows: Some(required_rows),
                available_rows: Some(available_rows),
                missing: None,
                needed: None,
                assignments: None,
                leftover_total: None,
                leftover: None,
            },
            CheckOutcome::Unsatisfiable { rows, missing } => WasmCheckResult {
                status: "unsatisfiable".to_string(),
                rows,
                required_rows: None,
                available_rows: None,
                missing: Some(count_pairs(&missing)),
                needed: None,
                assignments: None,
                leftover_total: None,
                leftover: None,
            },
            CheckOutcome::Satisfied { rows, needed, assignments, leftover } => WasmCheckResult {
                status: "satisfied".to_string(),
                rows,
                required_rows: None,
                available_rows: None,
                missing: None,
                needed: Some(count_pairs(&needed)),
                assignments: Some(assignments),
                leftover_total: leftover.as_ref().map(|l| l.total),
                leftover: leftover.map(|l| count_pairs(&l.by_label)),
            },
        }
    }
}

/// JS entry: run one check against an inventory spec and phrase.
///
/// Returns an object with a `status` discriminant and the fields of the
/// matching outcome shape.
#[wasm_bindgen]
pub fn check_phrase(
    inventory: &str,
    phrase: &str,
    row_width: usize,
    row_budget: usize,
    include_leftover: bool,
) -> Result<JsValue, JsValue> {
    let outcome = check(inventory, phrase, row_width, row_budget, include_leftover)
        .map_err(WasmError::from)?;

    serde_wasm_bindgen::to_value(&WasmCheckResult::from(outcome)).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize result".to_string(),
            details: "The check result could not be converted to JavaScript format.".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}

/// Persist the raw inventory text (localStorage, cookie fallback).
/// Best-effort; storage being unavailable is not an error.
#[wasm_bindgen]
pub fn save_inventory(text: &str) {
    storage::save_inventory(text);
}

/// Load the inventory text saved by a previous session, if any.
#[wasm_bindgen]
#[must_use]
pub fn load_saved_inventory() -> Option<String> {
    storage::load_inventory()
}

/// Generate a debug report for troubleshooting.
///
/// This function creates a formatted debug report that users can copy/paste
/// when reporting issues. It includes the error message, the inputs, and
/// environment information.
#[wasm_bindgen]
pub fn get_debug_info(
    inventory: &str,
    phrase: &str,
    row_width: usize,
    row_budget: usize,
    error_message: &str,
) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails; `let _ =` ignores the Result
    let _ = writeln!(&mut report, "=== TILECHECK DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(&mut report, "Generated: {}", js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string()));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Inventory: {inventory}");
    let _ = writeln!(&mut report, "Phrase: {phrase}");
    let _ = writeln!(&mut report, "Row Width: {row_width}");
    let _ = writeln!(&mut report, "Row Budget: {row_budget}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(&mut report, "Location: {}", window.location().href().unwrap_or_else(|_| "unknown".to_string()));
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
