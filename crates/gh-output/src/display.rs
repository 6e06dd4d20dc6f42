//! ASCII board rendering for `--display` runs.

use gh_core::Pos;
use gh_grid::Grid;

/// Render the board, one row per line, origin at the top-left.
///
/// | Glyph | Meaning                                |
/// |-------|----------------------------------------|
/// | `1-9` | Number of agents on the cell (9 = 9+)  |
/// | `#`   | Obstacle                               |
/// | `P`   | Pickup station                         |
/// | `D`   | Delivery station                       |
/// | `.`   | Empty                                  |
///
/// Agents win the cell: a courier standing on a station hides it, matching
/// what matters during a congestion run.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Pos::new(x, y);
            let agents = grid.agents.iter().filter(|a| a.pos == pos).count();
            let glyph = if agents > 0 {
                char::from_digit(agents.min(9) as u32, 10).unwrap_or('9')
            } else if grid.is_obstacle(pos) {
                '#'
            } else if grid.pickup_at(pos).is_some() {
                'P'
            } else if grid.delivery_at(pos).is_some() {
                'D'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
