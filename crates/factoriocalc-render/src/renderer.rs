//! Grid blit, ported from `art_encoder.py`'s `ArtEncoder`.

use crate::error::RenderError;
use crate::glyphs::art_for;
use factoriocalc_layout::Entity;

const EMPTY: &str = " ";

/// Renders a flattened entity list to a multi-line ANSI string.
///
/// `error_on_conflict` mirrors the original's constructor flag: when
/// `true`, overlapping art is a hard error; when `false`, the offending
/// cell is overwritten with a bold red `!`.
pub fn render(entities: &[Entity], error_on_conflict: bool) -> Result<String, RenderError> {
    if entities.is_empty() {
        return Ok(String::new());
    }
    let width = entities.iter().map(|e| e.position.x).max().unwrap_or(0) + 5;
    let height = entities.iter().map(|e| e.position.y).max().unwrap_or(0) + 5;
    let mut grid = vec![vec![EMPTY.to_string(); width as usize]; height as usize];

    for entity in entities {
        if entity.position.x < 0 || entity.position.y < 0 {
            return Err(RenderError::OutOfBounds { x: entity.position.x, y: entity.position.y });
        }
        let art = art_for(entity);
        blit(&mut grid, entity.position.x, entity.position.y, &art, error_on_conflict)?;
    }

    Ok(grid.into_iter().map(|row| row.concat()).collect::<Vec<_>>().join("\n"))
}

fn blit(grid: &mut [Vec<String>], x: i64, y: i64, art: &[Vec<String>], error_on_conflict: bool) -> Result<(), RenderError> {
    for (dy, row) in art.iter().enumerate() {
        for (dx, cell) in row.iter().enumerate() {
            let (tx, ty) = ((x + dx as i64) as usize, (y + dy as i64) as usize);
            let existing = &grid[ty][tx];
            if existing != EMPTY {
                if error_on_conflict {
                    return Err(RenderError::Conflict {
                        x: tx as i64,
                        y: ty as i64,
                        existing: existing.chars().last().unwrap_or(' '),
                        new: cell.chars().last().unwrap_or(' '),
                    });
                }
                grid[ty][tx] = crate::ansi::colorize("!", crate::ansi::RED, true);
                continue;
            }
            grid[ty][tx] = cell.clone();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_layout::kind;

    #[test]
    fn renders_a_single_assembler_as_a_boxed_a() {
        let entities = vec![Entity::new(0, 0, kind::ASSEMBLER)];
        let art = render(&entities, true).unwrap();
        assert!(art.contains('A'));
        assert!(art.contains('┌'));
    }

    #[test]
    fn overlapping_entities_error_by_default() {
        let entities = vec![Entity::new(0, 0, kind::ASSEMBLER), Entity::new(0, 0, kind::FURNACE)];
        assert!(matches!(render(&entities, true), Err(RenderError::Conflict { .. })));
    }

    #[test]
    fn overlap_is_tolerated_with_error_on_conflict_disabled() {
        let entities = vec![Entity::new(0, 0, kind::ASSEMBLER), Entity::new(0, 0, kind::FURNACE)];
        let art = render(&entities, false).unwrap();
        assert!(art.contains('!'));
    }
}
