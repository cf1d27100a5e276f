use mineboard_core::{BoardEngine, Cell, CellIndex, Notification, Snapshot};

fn digits(mut value: usize) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

pub(crate) fn glyph(cell: Cell, triggered: bool) -> char {
    match cell {
        Cell::Hidden => '#',
        Cell::Flagged => 'F',
        Cell::Revealed(0) => '.',
        Cell::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Cell::RevealedMine if triggered => 'X',
        Cell::RevealedMine => '*',
    }
}

/// Draws the grid with row and column headers, one board row per line.
pub(crate) fn board(snapshot: &Snapshot, triggered_mine: Option<CellIndex>) -> String {
    let width = digits(snapshot.rows.max(snapshot.cols).saturating_sub(1));
    let mut out = " ".repeat(width);
    for col in 0..snapshot.cols {
        out.push_str(&format!(" {col:>width$}"));
    }
    out.push('\n');

    for (row, cells) in snapshot.iter_rows().enumerate() {
        out.push_str(&format!("{row:>width$}"));
        for (col, &cell) in cells.iter().enumerate() {
            let triggered = triggered_mine == Some(row * snapshot.cols + col);
            out.push_str(&format!(" {:>width$}", glyph(cell, triggered)));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn status_line(engine: &BoardEngine) -> String {
    format!(
        "Mines left: {} | Flags: {} | {:?}",
        engine.mines_left(),
        engine.flags_placed(),
        engine.status()
    )
}

pub(crate) fn notification_text(notification: Notification) -> &'static str {
    match notification {
        Notification::GameOver => "Game Over!",
        Notification::Victory => "You win!",
    }
}
