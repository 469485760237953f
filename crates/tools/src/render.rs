//! ASCII preview of a generated floor. North is up and east is right.

use basement_core::{GeneratedDungeon, InteractableKind, Pos};

pub fn ascii(dungeon: &GeneratedDungeon) -> String {
    let grid = &dungeon.grid;
    let mut out = String::with_capacity((grid.rows() + 1) * grid.cols());
    for y in (0..grid.cols() as i32).rev() {
        for x in 0..grid.rows() as i32 {
            out.push(glyph(dungeon, Pos::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn glyph(dungeon: &GeneratedDungeon, pos: Pos) -> char {
    if pos == dungeon.player_start {
        return '@';
    }
    if let Some(spawn) = dungeon.interactable_spawns.iter().find(|spawn| spawn.pos == pos) {
        return match spawn.kind {
            InteractableKind::Stairs => '>',
            InteractableKind::Merchant => 'M',
            InteractableKind::TreasureChest => '$',
        };
    }
    if dungeon.grid.is_floor(pos) { '.' } else { '#' }
}

#[cfg(test)]
mod tests {
    use basement_core::GameConfig;
    use basement_core::mapgen::generate_dungeon;

    use super::*;

    #[test]
    fn preview_has_one_line_per_column_and_marks_specials() {
        let config = GameConfig::default();
        let dungeon = generate_dungeon(&config.dungeon, &config.interactables, 3, 0);
        let preview = ascii(&dungeon);

        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), dungeon.grid.cols());
        assert!(lines.iter().all(|line| line.chars().count() == dungeon.grid.rows()));
        assert_eq!(preview.matches('@').count(), 1);
        assert_eq!(preview.matches('>').count(), usize::from(dungeon.stairs.is_some()));
        let floor_glyphs = preview.chars().filter(|glyph| !matches!(glyph, '#' | '\n')).count();
        assert_eq!(floor_glyphs, dungeon.grid.floor_positions().count());
    }
}
