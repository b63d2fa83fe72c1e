//! `matching` — Maximum bipartite assignment of phrase positions to tiles.
//!
//! Left nodes are the non-blank character positions of the wrapped rows, in
//! row-major scan order. Right nodes are tile instances. A position and a
//! tile are connected when the tile's value equals the position's character
//! ignoring case. The engine finds a maximum-cardinality matching with
//! Kuhn's augmenting-path algorithm: one depth-first search per position,
//! each with a fresh visited set, reassigning tiles along an alternating
//! path whenever the search reaches a free tile.
//!
//! The exact pairing can depend on scan order; the matching *size* is always
//! the true maximum. Candidate tiles are pre-grouped by lowercased value so
//! edge enumeration is a lookup instead of a scan over every tile.

use std::collections::HashMap;

use log::debug;

use crate::tiles::Tile;

/// One non-blank character of the wrapped phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub ch: char,
}

/// Result of the assignment computation.
#[derive(Debug, Clone)]
pub struct Matching {
    /// For each position (scan order), the index of the tile assigned to it.
    pub position_to_tile: Vec<Option<usize>>,
    /// Indices of positions no tile could be found for, in scan order.
    pub unmatched: Vec<usize>,
}

impl Matching {
    /// True when every position received a tile.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.position_to_tile.iter().flatten().count()
    }
}

/// Collect the non-blank positions of the wrapped rows in row-major order.
///
/// The blank is exactly the ASCII space the wrapper inserts between words;
/// any other character is a position that needs a tile.
#[must_use]
pub fn collect_positions(rows: &[String]) -> Vec<Position> {
    rows.iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, ch)| ch != ' ')
                .map(move |(col, ch)| Position { row, col, ch })
        })
        .collect()
}

/// Case-insensitive lookup key for a tile value or phrase character.
fn fold_key(s: &str) -> String {
    s.to_lowercase()
}

/// Compute a maximum matching from positions to tiles.
#[must_use]
pub fn assign_tiles(positions: &[Position], tiles: &[Tile]) -> Matching {
    // Group tile indices by folded value so each position's candidate list
    // is a single map lookup.
    let mut tiles_by_value: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, tile) in tiles.iter().enumerate() {
        tiles_by_value
            .entry(fold_key(&tile.value))
            .or_default()
            .push(idx);
    }

    let empty: Vec<usize> = Vec::new();
    let candidates: Vec<&[usize]> = positions
        .iter()
        .map(|p| {
            tiles_by_value
                .get(&fold_key(&p.ch.to_string()))
                .unwrap_or(&empty)
                .as_slice()
        })
        .collect();

    let mut tile_to_position: Vec<Option<usize>> = vec![None; tiles.len()];
    let mut matched = 0usize;
    for pos in 0..positions.len() {
        let mut visited = vec![false; positions.len()];
        if augment(pos, &candidates, &mut tile_to_position, &mut visited) {
            matched += 1;
        }
    }
    debug!(
        "matched {matched}/{} positions against {} tiles",
        positions.len(),
        tiles.len()
    );

    // Invert the tile-side matching into the per-position view.
    let mut position_to_tile: Vec<Option<usize>> = vec![None; positions.len()];
    for (tile, assigned) in tile_to_position.iter().enumerate() {
        if let Some(pos) = assigned {
            position_to_tile[*pos] = Some(tile);
        }
    }

    let unmatched = position_to_tile
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_none())
        .map(|(i, _)| i)
        .collect();

    Matching {
        position_to_tile,
        unmatched,
    }
}

/// One augmenting-path search from `pos`. Tries each candidate tile: a free
/// tile ends the path; an occupied tile is stolen if its current position
/// can be re-routed elsewhere. Recursion depth is bounded by the number of
/// positions.
fn augment(
    pos: usize,
    candidates: &[&[usize]],
    tile_to_position: &mut Vec<Option<usize>>,
    visited: &mut Vec<bool>,
) -> bool {
    if visited[pos] {
        return false;
    }
    visited[pos] = true;

    for &tile in candidates[pos] {
        let free = match tile_to_position[tile] {
            None => true,
            Some(occupant) => augment(occupant, candidates, tile_to_position, visited),
        };
        if free {
            tile_to_position[tile] = Some(pos);
            return true;
        }
    }
    false
}
