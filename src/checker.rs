//! The check operation: can this tile inventory spell that phrase?
//!
//! This is the crate's single public entry point. It runs the whole
//! pipeline synchronously (parse the inventory, wrap the phrase, verify
//! the row budget, compute the maximum assignment, aggregate) and returns
//! a [`CheckOutcome`] value. Data-dependent failures such as too many rows
//! or not enough tiles are outcomes, not errors; [`CheckError`] is reserved
//! for caller bugs and the defensive input caps.
//!
//! # Examples
//!
//! ```
//! use tilecheck::checker::{check, CheckOutcome};
//!
//! let outcome = check("H E L:3 O:2 W R D", "HELLO WORLD", 11, 2, false)?;
//! match outcome {
//!     CheckOutcome::Satisfied { needed, .. } => {
//!         assert_eq!(needed.get("L"), 3);
//!     }
//!     other => panic!("expected Satisfied, got {other:?}"),
//! }
//! # Ok::<(), tilecheck::errors::CheckError>(())
//! ```
//!
//! ## Failure outcomes are values
//!
//! ```
//! use tilecheck::checker::{check, CheckOutcome};
//!
//! match check("A", "AB", 10, 1, false)? {
//!     CheckOutcome::Unsatisfiable { missing, .. } => {
//!         assert_eq!(missing.get("B"), 1);
//!     }
//!     other => panic!("expected Unsatisfiable, got {other:?}"),
//! }
//! # Ok::<(), tilecheck::errors::CheckError>(())
//! ```

use instant::Instant;
use log::debug;

use crate::counts::LabelCounts;
use crate::errors::CheckError;
use crate::matching::{assign_tiles, collect_positions, Matching, Position};
use crate::tiles::{parse_inventory, Tile};
use crate::wrap::wrap_phrase;

/// Defensive cap on non-blank character positions per check.
pub const MAX_POSITIONS: usize = 10_000;
/// Defensive cap on parsed tiles per check.
pub const MAX_TILES: usize = 100_000;

/// Leftover-tile summary, present only when the caller asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftoverSummary {
    /// Total number of unconsumed tiles.
    pub total: usize,
    /// Unconsumed tiles grouped by value label, in inventory order.
    pub by_label: LabelCounts,
}

/// Result of one check, in one of three disjoint shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The phrase needs more rows than the budget allows. Matching is not
    /// attempted; this shape wins even when the tiles would also fall short.
    RowOverflow {
        required_rows: usize,
        available_rows: usize,
        rows: Vec<String>,
    },

    /// The tiles cannot cover every position. `missing` counts the
    /// unmatched characters as displayed (case-sensitive), in scan order of
    /// first occurrence.
    Unsatisfiable {
        rows: Vec<String>,
        missing: LabelCounts,
    },

    /// Every position got a tile. `needed` counts the consumed tiles by
    /// value label; `assignments` holds the consumed tile identity per grid
    /// cell (None on blanks).
    Satisfied {
        rows: Vec<String>,
        needed: LabelCounts,
        assignments: Vec<Vec<Option<String>>>,
        leftover: Option<LeftoverSummary>,
    },
}

/// Check whether `inventory` can spell `phrase` wrapped at `row_width`
/// within `row_budget` rows.
///
/// Set `include_leftover` to also report unconsumed tiles on success.
///
/// # Errors
///
/// Returns a [`CheckError`] only for zero `row_width`/`row_budget` or
/// inputs beyond [`MAX_POSITIONS`]/[`MAX_TILES`]. Malformed inventory
/// syntax and insufficient tiles never error.
pub fn check(
    inventory: &str,
    phrase: &str,
    row_width: usize,
    row_budget: usize,
    include_leftover: bool,
) -> Result<CheckOutcome, CheckError> {
    if row_width == 0 {
        return Err(CheckError::ZeroRowWidth);
    }
    if row_budget == 0 {
        return Err(CheckError::ZeroRowBudget);
    }

    let tiles = parse_inventory(inventory);
    if tiles.len() > MAX_TILES {
        return Err(CheckError::TooManyTiles {
            count: tiles.len(),
            limit: MAX_TILES,
        });
    }

    let rows = wrap_phrase(phrase, row_width);
    if rows.len() > row_budget {
        return Ok(CheckOutcome::RowOverflow {
            required_rows: rows.len(),
            available_rows: row_budget,
            rows,
        });
    }

    let positions = collect_positions(&rows);
    if positions.len() > MAX_POSITIONS {
        return Err(CheckError::TooManyPositions {
            count: positions.len(),
            limit: MAX_POSITIONS,
        });
    }

    let started = Instant::now();
    let matching = assign_tiles(&positions, &tiles);
    debug!(
        "assignment over {} positions / {} tiles took {:?}",
        positions.len(),
        tiles.len(),
        started.elapsed()
    );

    if matching.is_complete() {
        Ok(satisfied_outcome(
            rows,
            &positions,
            &tiles,
            &matching,
            include_leftover,
        ))
    } else {
        Ok(CheckOutcome::Unsatisfiable {
            rows,
            missing: missing_by_char(&positions, &matching),
        })
    }
}

/// Group unmatched positions by their displayed character.
fn missing_by_char(positions: &[Position], matching: &Matching) -> LabelCounts {
    let mut missing = LabelCounts::new();
    for &i in &matching.unmatched {
        missing.add(&positions[i].ch.to_string());
    }
    missing
}

fn satisfied_outcome(
    rows: Vec<String>,
    positions: &[Position],
    tiles: &[Tile],
    matching: &Matching,
    include_leftover: bool,
) -> CheckOutcome {
    // consumed tiles grouped by label, in position scan order
    let mut needed = LabelCounts::new();
    let mut assignments: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|row| vec![None; row.chars().count()])
        .collect();

    let mut used = vec![false; tiles.len()];
    for (pos, assigned) in positions.iter().zip(&matching.position_to_tile) {
        if let Some(tile_idx) = assigned {
            let tile = &tiles[*tile_idx];
            needed.add(&tile.value);
            assignments[pos.row][pos.col] = Some(tile.identity.clone());
            used[*tile_idx] = true;
        }
    }

    let leftover = include_leftover.then(|| {
        let mut by_label = LabelCounts::new();
        for (tile, consumed) in tiles.iter().zip(&used) {
            if !consumed {
                by_label.add(&tile.value);
            }
        }
        LeftoverSummary {
            total: by_label.total(),
            by_label,
        }
    });

    CheckOutcome::Satisfied {
        rows,
        needed,
        assignments,
        leftover,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfied_basic() {
        let outcome = check("A A B", "AB", 10, 1, false).unwrap();
        match outcome {
            CheckOutcome::Satisfied { rows, needed, leftover, .. } => {
                assert_eq!(rows, vec!["AB"]);
                assert_eq!(needed.get("A"), 1);
                assert_eq!(needed.get("B"), 1);
                assert!(leftover.is_none());
            }
            other => panic!("expected Satisfied, got {other:?}"),
        }
    }

    #[test]
    fn test_leftover_toggle() {
        let outcome = check("A A B", "AB", 10, 1, true).unwrap();
        match outcome {
            CheckOutcome::Satisfied { leftover: Some(leftover), .. } => {
                assert_eq!(leftover.total, 1);
                assert_eq!(leftover.by_label.get("A"), 1);
                assert_eq!(leftover.by_label.get("B"), 0);
            }
            other => panic!("expected Satisfied with leftover, got {other:?}"),
        }
    }

    #[test]
    fn test_unsatisfiable_missing_counts() {
        let outcome = check("A", "AB", 10, 1, false).unwrap();
        match outcome {
            CheckOutcome::Unsatisfiable { missing, .. } => {
                assert_eq!(missing.get("B"), 1);
                assert_eq!(missing.len(), 1);
            }
            other => panic!("expected Unsatisfiable, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_grouped_case_sensitively() {
        // tiles match case-insensitively, but the report shows characters
        // as they appear in the phrase
        let outcome = check("", "aA", 10, 1, false).unwrap();
        match outcome {
            CheckOutcome::Unsatisfiable { missing, .. } => {
                assert_eq!(missing.get("a"), 1);
                assert_eq!(missing.get("A"), 1);
            }
            other => panic!("expected Unsatisfiable, got {other:?}"),
        }
    }

    #[test]
    fn test_row_overflow_precedes_matching() {
        // no tiles at all, but the row budget fails first
        let outcome = check("", "AAAA BBBB", 4, 1, false).unwrap();
        match outcome {
            CheckOutcome::RowOverflow { required_rows, available_rows, rows } => {
                assert_eq!(required_rows, 2);
                assert_eq!(available_rows, 1);
                assert_eq!(rows, vec!["AAAA", "BBBB"]);
            }
            other => panic!("expected RowOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_case_insensitive_assignment() {
        let outcome = check("a", "A", 5, 1, false).unwrap();
        assert!(matches!(outcome, CheckOutcome::Satisfied { .. }));
    }

    #[test]
    fn test_blanks_need_no_tiles() {
        let outcome = check("A B", "A B", 5, 1, false).unwrap();
        match outcome {
            CheckOutcome::Satisfied { needed, assignments, .. } => {
                assert_eq!(needed.total(), 2);
                // the space cell carries no assignment
                assert_eq!(assignments[0][1], None);
                assert!(assignments[0][0].is_some());
                assert!(assignments[0][2].is_some());
            }
            other => panic!("expected Satisfied, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_phrase_is_satisfied() {
        let outcome = check("", "", 5, 1, false).unwrap();
        match outcome {
            CheckOutcome::Satisfied { rows, needed, .. } => {
                assert!(rows.is_empty());
                assert!(needed.is_empty());
            }
            other => panic!("expected Satisfied, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_row_width_is_hard_error() {
        assert_eq!(check("A", "A", 0, 1, false), Err(CheckError::ZeroRowWidth));
    }

    #[test]
    fn test_zero_row_budget_is_hard_error() {
        assert_eq!(check("A", "A", 5, 0, false), Err(CheckError::ZeroRowBudget));
    }

    #[test]
    fn test_position_cap() {
        let phrase = "A".repeat(MAX_POSITIONS + 1);
        let err = check("A", &phrase, MAX_POSITIONS + 1, 1, false).unwrap_err();
        assert!(matches!(err, CheckError::TooManyPositions { .. }));
    }

    #[test]
    fn test_tile_cap() {
        let spec = format!("A:{}", MAX_TILES + 1);
        let err = check(&spec, "A", 5, 1, false).unwrap_err();
        assert!(matches!(err, CheckError::TooManyTiles { .. }));
    }

    #[test]
    fn test_needed_counts_in_first_occurrence_order() {
        let outcome = check("B A:2", "ABA", 5, 1, false).unwrap();
        match outcome {
            CheckOutcome::Satisfied { needed, .. } => {
                let ordered: Vec<_> = needed.iter().collect();
                assert_eq!(ordered, vec![("A", 2), ("B", 1)]);
            }
            other => panic!("expected Satisfied, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_identities_are_distinct() {
        let outcome = check("L:3 H E O", "HELLO", 5, 1, false).unwrap();
        match outcome {
            CheckOutcome::Satisfied { assignments, .. } => {
                let mut ids: Vec<String> =
                    assignments.iter().flatten().flatten().cloned().collect();
                assert_eq!(ids.len(), 5);
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 5, "each tile is consumed at most once");
            }
            other => panic!("expected Satisfied, got {other:?}"),
        }
    }
}
