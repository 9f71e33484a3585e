//! Per-entity-kind art, ported from `art_encoder.py`'s `ART` table.

use crate::ansi::{self, BLUE, GREEN, YELLOW};
use factoriocalc_layout::{kind, Entity, Orientation};

/// An N x N box with border drawing characters and `fill` repeated
/// through the interior.
pub fn boxed(fill: char, n: usize) -> Vec<Vec<String>> {
    let interior = n - 2;
    let mut rows = Vec::with_capacity(n);
    rows.push(std::iter::once("┌".to_string()).chain(std::iter::repeat("─".to_string()).take(interior)).chain(std::iter::once("┐".to_string())).collect());
    for _ in 0..interior {
        rows.push(
            std::iter::once("│".to_string())
                .chain(std::iter::repeat(fill.to_string()).take(interior))
                .chain(std::iter::once("│".to_string()))
                .collect(),
        );
    }
    rows.push(std::iter::once("└".to_string()).chain(std::iter::repeat("─".to_string()).take(interior)).chain(std::iter::once("┘".to_string())).collect());
    rows
}

fn single(cell: &str) -> Vec<Vec<String>> {
    vec![vec![cell.to_string()]]
}

fn belt_glyph(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Up => "^",
        Orientation::Right => ">",
        Orientation::Down => "v",
        Orientation::Left => "<",
    }
}

fn underground_glyph(orientation: Orientation, is_input: bool) -> &'static str {
    let code = (orientation as u8 + if is_input { 2 } else { 0 }) % 4;
    match code {
        0 => "∪",
        1 => "⊂",
        2 => "∩",
        _ => "⊃",
    }
}

fn splitter_glyph(entity: &Entity) -> Vec<Vec<String>> {
    let priority = entity.attrs.get("output_priority").and_then(|v| v.as_str()).unwrap_or("");
    let (a, b) = match priority {
        "left" => ('S', 's'),
        "right" => ('s', 'S'),
        _ => ('s', 's'),
    };
    let orientation = entity.orientation.unwrap_or(Orientation::Up);
    let mut cells = if (orientation as u8) % 2 == 0 {
        vec![vec![a.to_string(), b.to_string()]]
    } else {
        vec![vec![a.to_string()], vec![b.to_string()]]
    };
    if (orientation as u8) / 2 > 0 {
        cells.reverse();
    }
    ansi::colorize_grid(cells, BLUE, false)
}

fn pump_glyph(orientation: Orientation) -> Vec<Vec<String>> {
    let rows: Vec<Vec<char>> = match orientation {
        Orientation::Up => vec![vec!['P'], vec!['p']],
        Orientation::Right => vec![vec!['p', 'P']],
        Orientation::Down => vec![vec!['p'], vec!['P']],
        Orientation::Left => vec![vec!['P', 'p']],
    };
    let grid = rows.into_iter().map(|row| row.into_iter().map(|c| c.to_string()).collect()).collect();
    ansi::colorize_grid(grid, GREEN, false)
}

/// Render `entity`'s art, falling back to a bold `?` for unknown kinds.
pub fn art_for(entity: &Entity) -> Vec<Vec<String>> {
    let orientation = entity.orientation.unwrap_or(Orientation::Up);
    match entity.name.as_str() {
        k if k == kind::INSERTER => ansi::colorize_grid(single("i"), GREEN, false),
        k if k == kind::ASSEMBLER => ansi::colorize_grid(boxed('A', 3), YELLOW, false),
        k if k == kind::FURNACE => ansi::colorize_grid(boxed('F', 3), BLUE, false),
        k if k == kind::CHEMICAL_PLANT => ansi::colorize_grid(boxed('C', 3), YELLOW, false),
        k if k == kind::REFINERY => ansi::colorize_grid(boxed('R', 5), YELLOW, false),
        k if k == kind::ROCKET_SILO => ansi::colorize_grid(boxed('X', 4), YELLOW, false),
        k if k == kind::LAB => ansi::colorize_grid(boxed('L', 3), YELLOW, false),
        k if k == kind::BELT => ansi::colorize_grid(single(belt_glyph(orientation)), BLUE, false),
        k if k == kind::UNDERGROUND_BELT => {
            let is_input = entity.attrs.get("type").and_then(|v| v.as_str()) == Some("input");
            ansi::colorize_grid(single(underground_glyph(orientation, is_input)), BLUE, false)
        }
        k if k == kind::SPLITTER => splitter_glyph(entity),
        k if k == kind::MEDIUM_POLE => single("o"),
        k if k == kind::BIG_POLE => vec![vec!["\\".to_string(), "/".to_string()], vec!["/".to_string(), "\\".to_string()]],
        k if k == kind::BEACON => boxed('B', 3),
        k if k == kind::ROBOPORT => boxed('R', 4),
        k if k == kind::PIPE => ansi::colorize_grid(single("="), GREEN, false),
        k if k == kind::UNDERGROUND_PIPE => ansi::colorize_grid(single(underground_glyph(orientation, false)), GREEN, false),
        k if k == kind::PUMP => pump_glyph(orientation),
        _ => vec![vec![ansi::bold("?")]],
    }
}
