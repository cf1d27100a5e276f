use std::io::{BufRead, Write};

use anyhow::Context;
use mineboard_core::{BoardEngine, CellIndex, GameConfig, GameError, Notification};

use crate::command::{Command, HELP, Target};
use crate::{render, settings};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One terminal player driving one board.
pub(crate) struct Session {
    engine: BoardEngine,
}

impl Session {
    pub(crate) fn new(engine: BoardEngine) -> Self {
        Self { engine }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub(crate) fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.draw(out)?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    log::debug!("command: {:?}", command);
                    if self.execute(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Reveal(target) => {
                if let Some(index) = self.resolve(target, out)? {
                    match self.engine.reveal(index) {
                        Ok(outcome) => {
                            if outcome.has_update() {
                                self.draw(out)?;
                            }
                            if let Some(notification) = outcome.notification() {
                                self.notify(notification, out)?;
                            }
                        }
                        Err(err) => self.reject(err, out)?,
                    }
                }
            }
            Command::Flag(target) => {
                if let Some(index) = self.resolve(target, out)? {
                    match self.engine.toggle_flag(index) {
                        Ok(outcome) if outcome.has_update() => self.draw(out)?,
                        Ok(_) => {}
                        Err(err) => self.reject(err, out)?,
                    }
                }
            }
            Command::Restart => {
                self.engine.restart(None)?;
                self.draw(out)?;
            }
            Command::Configure { rows, cols, mines } => match GameConfig::new(rows, cols, mines) {
                Ok(config) => self.reconfigure(settings::clamp_mines(config, mines), out)?,
                Err(err) => self.reject(err, out)?,
            },
            Command::Mines(count) => {
                let config = settings::clamp_mines(self.engine.config(), count);
                self.reconfigure(config, out)?;
            }
            Command::Snapshot => {
                let json = serde_json::to_string(&self.engine.snapshot())?;
                writeln!(out, "{json}")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn reconfigure(&mut self, config: GameConfig, out: &mut impl Write) -> anyhow::Result<()> {
        log::info!(
            "New settings: {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mine_count
        );
        self.engine.restart(Some(config))?;
        self.draw(out)
    }

    /// Turns a command target into an index, reporting coordinates off the board.
    fn resolve(&self, target: Target, out: &mut impl Write) -> anyhow::Result<Option<CellIndex>> {
        let config = self.engine.config();
        match target {
            Target::Index(index) => Ok(Some(index)),
            Target::Coords((row, col)) if row < config.rows && col < config.cols => {
                Ok(Some(config.index((row, col))))
            }
            Target::Coords((row, col)) => {
                writeln!(
                    out,
                    "Cell ({row}, {col}) is outside the {}x{} board",
                    config.rows, config.cols
                )?;
                Ok(None)
            }
        }
    }

    fn reject(&self, err: GameError, out: &mut impl Write) -> anyhow::Result<()> {
        log::debug!("rejected: {err}");
        writeln!(out, "Ignored: {err}")?;
        Ok(())
    }

    fn notify(&self, notification: Notification, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} Type `n` to play again.",
            render::notification_text(notification)
        )?;
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let snapshot = self.engine.snapshot();
        write!(out, "{}", render::board(&snapshot, self.engine.triggered_mine()))?;
        writeln!(out, "{}", render::status_line(&self.engine))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineboard_core::{GameStatus, MineSet};

    fn session(rows: usize, cols: usize, mines: &[usize]) -> Session {
        let config = GameConfig::new(rows, cols, mines.len()).unwrap();
        let engine =
            BoardEngine::with_mines(config, MineSet::from_indices(config, mines).unwrap()).unwrap();
        Session::new(engine)
    }

    fn play(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn losing_game_prints_game_over() {
        let mut session = session(2, 2, &[0]);

        let out = play(&mut session, "r 0 0\nr 1 1\n");

        assert!(out.contains("0 X #"));
        assert!(out.contains("Game Over! Type `n` to play again."));
        assert!(out.contains("Ignored: Game already ended"));
        assert_eq!(session.engine().status(), GameStatus::Lost);
    }

    #[test]
    fn winning_game_prints_victory() {
        let mut session = session(2, 2, &[0]);

        let out = play(&mut session, "f 0\nr 1\nr 2\nr 3\n");

        assert!(out.contains("You win! Type `n` to play again."));
        assert_eq!(session.engine().status(), GameStatus::Won);
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = session(2, 2, &[0]);

        play(&mut session, "q\nr 0\n");

        assert_eq!(session.engine().status(), GameStatus::Playing);
    }

    #[test]
    fn bad_commands_and_coordinates_are_reported() {
        let mut session = session(2, 2, &[0]);

        let out = play(&mut session, "dig\nr 5 0\nr 9\n");

        assert!(out.contains("Unknown command `dig`"));
        assert!(out.contains("Cell (5, 0) is outside the 2x2 board"));
        assert!(out.contains("Ignored: Cell 9 is out of range for a board of 4 cells"));
        assert_eq!(session.engine().snapshot().revealed_count(), 0);
    }

    #[test]
    fn config_commands_restart_with_new_board() {
        let mut session = session(2, 2, &[0]);

        play(&mut session, "r 0\nconfig 4 6 99\n");

        let config = session.engine().config();
        assert_eq!(config, GameConfig::new(4, 6, 20).unwrap());
        assert_eq!(session.engine().status(), GameStatus::Playing);

        play(&mut session, "mines 7\n");
        assert_eq!(session.engine().config(), GameConfig::new(4, 6, 7).unwrap());
        assert_eq!(session.engine().mines().len(), 7);
    }

    #[test]
    fn invalid_config_keeps_current_board() {
        let mut session = session(2, 2, &[0]);

        let out = play(&mut session, "config 0 5 10\n");

        assert!(out.contains("Ignored: Invalid board configuration"));
        assert_eq!(session.engine().size(), (2, 2));
    }

    #[test]
    fn oversized_config_keeps_current_board() {
        let mut session = session(2, 2, &[0]);

        let out = play(&mut session, "config 9223372036854775807 2 5
config 300 300 5
");

        assert_eq!(out.matches("Ignored: Invalid board configuration").count(), 2);
        assert_eq!(session.engine().size(), (2, 2));
        assert_eq!(session.engine().status(), GameStatus::Playing);
    }

    #[test]
    fn snapshot_prints_json() {
        let mut session = session(1, 2, &[0]);

        let out = play(&mut session, "snapshot\n");

        assert!(out.contains(r#"{"rows":1,"cols":2,"cells":["Hidden","Hidden"],"status":"Playing"}"#));
    }
}
