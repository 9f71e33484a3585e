//! ANSI foreground color helpers, ported from `art_encoder.py`'s
//! `forecolor` family. Each grid cell is colored individually (matching
//! the original, which recurses into nested art lists one leaf at a
//! time), so a cell's string already carries its own escape/reset pair.

pub const BLACK: u8 = 0;
pub const RED: u8 = 1;
pub const GREEN: u8 = 2;
pub const YELLOW: u8 = 3;
pub const BLUE: u8 = 4;
pub const PURPLE: u8 = 5;
pub const CYAN: u8 = 6;
pub const WHITE: u8 = 7;

/// Wrap a single glyph in a foreground color escape, resetting after.
pub fn colorize(glyph: &str, color: u8, bold: bool) -> String {
    let code = if bold { format!("{};1", 30 + color) } else { format!("{}", 30 + color) };
    format!("\x1b[{code}m{glyph}\x1b[m")
}

/// Apply [`colorize`] to every cell of a glyph grid.
pub fn colorize_grid(grid: Vec<Vec<String>>, color: u8, bold: bool) -> Vec<Vec<String>> {
    grid.into_iter().map(|row| row.into_iter().map(|cell| colorize(&cell, color, bold)).collect()).collect()
}

pub fn bold(glyph: &str) -> String {
    format!("\x1b[0;1m{glyph}\x1b[m")
}
