use std::collections::VecDeque;
use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Effect, Message, Model, update};
use crate::input::message_for_event;
use crate::perf;
use crate::ui::LayoutConfig;
use crate::ui::compose::{goodbye_lines, plain_text};

impl App {
    /// Run the main event loop until the user quits.
    ///
    /// The goodbye message is printed again after the terminal is restored
    /// so it stays on screen.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, drawing, or reading
    /// events fails.
    pub fn run(self) -> Result<()> {
        let _run_scope = perf::scope("app.run.total");
        let Self { model, layout } = self;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, folio requires an interactive terminal")?;
        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, model, &layout));

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        let model = result?;
        if model.quitting {
            println!("{}", plain_text(&goodbye_lines(&layout)));
        }
        Ok(())
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        mut model: Model,
        layout: &LayoutConfig,
    ) -> Result<Model> {
        // The terminal does not report its size on its own.
        let size = terminal.size()?;
        let mut pending = VecDeque::from([Message::Resize(size.width, size.height)]);
        let mut frame_idx: u64 = 0;

        loop {
            while let Some(msg) = pending.pop_front() {
                perf::log_event("event.apply", format!("frame={frame_idx} msg={msg:?}"));
                let (next, effects) = update(model, msg);
                model = next;
                for effect in effects {
                    match effect {
                        Effect::RerenderViewport => {}
                        Effect::ClearScreen => terminal.clear()?,
                        Effect::Quit => {
                            terminal.draw(|frame| crate::ui::render(&model, layout, frame))?;
                            return Ok(model);
                        }
                    }
                }
            }

            let draw_scope = perf::scope("app.draw");
            terminal.draw(|frame| crate::ui::render(&model, layout, frame))?;
            drop(draw_scope);
            frame_idx += 1;

            // Block for the next event, then drain a burst without waiting.
            pending.extend(message_for_event(&event::read()?));
            while event::poll(Duration::ZERO)? {
                pending.extend(message_for_event(&event::read()?));
            }
        }
    }
}
