// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::time::{Duration, Instant};

use habitual_core::Habitual;
use habitual_dnd::DragConfig;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::tui::drag_view::{DragView, Message};

const FRAME: Duration = Duration::from_millis(16);

/// The list an arrange screen reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrangeTarget {
    Routines,
    Tasks { routine_id: i64 },
}

impl ArrangeTarget {
    async fn title(self, habitual: &Habitual) -> Result<String, Box<dyn Error>> {
        Ok(match self {
            ArrangeTarget::Routines => "Arrange routines".to_string(),
            ArrangeTarget::Tasks { routine_id } => {
                let routine = habitual.get_routine(routine_id).await?;
                format!("Arrange {}", routine.name)
            }
        })
    }

    async fn labels(self, habitual: &Habitual) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(match self {
            ArrangeTarget::Routines => {
                let routines = habitual.list_routines().await?;
                routines.into_iter().map(|a| a.name).collect()
            }
            ArrangeTarget::Tasks { routine_id } => {
                let tasks = habitual.list_tasks(routine_id).await?;
                tasks.into_iter().map(|a| a.name).collect()
            }
        })
    }

    /// Persists a drop and returns the names in their stored order.
    async fn apply_move(
        self,
        habitual: &Habitual,
        start: usize,
        end: usize,
    ) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(match self {
            ArrangeTarget::Routines => {
                let routines = habitual.move_routine(start, end).await?;
                routines.into_iter().map(|a| a.name).collect()
            }
            ArrangeTarget::Tasks { routine_id } => {
                let tasks = habitual.move_task(routine_id, start, end).await?;
                tasks.into_iter().map(|a| a.name).collect()
            }
        })
    }
}

/// Opens the arrange screen and persists every drop until the user quits.
pub async fn arrange(
    habitual: &Habitual,
    target: ArrangeTarget,
    config: DragConfig,
) -> Result<(), Box<dyn Error>> {
    let title = target.title(habitual).await?;
    let labels = target.labels(habitual).await?;
    if labels.is_empty() {
        return Err("Nothing to arrange".into());
    }

    let mut view = DragView::new(title, config, labels);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut view, habitual, target).await;
    ratatui::restore();
    view.teardown();
    result
}

async fn run(
    terminal: &mut DefaultTerminal,
    view: &mut DragView,
    habitual: &Habitual,
    target: ArrangeTarget,
) -> Result<(), Box<dyn Error>> {
    let mut last_frame = Instant::now();
    loop {
        // two rows go to the border
        view.resize(terminal.size()?.height.saturating_sub(2));
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(&*view, area);
        })?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if view.handle_key(key.code) == Some(Message::Exit) {
                        break Ok(());
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        view.tick(now - last_frame);
        last_frame = now;

        for (start, end) in view.take_drops() {
            if start == end {
                continue;
            }

            let labels = match target.apply_move(habitual, start, end).await {
                Ok(labels) => labels,
                Err(err) => {
                    // show the order as stored
                    tracing::error!(start, end, %err, "failed to persist drop");
                    target.labels(habitual).await?
                }
            };
            view.set_labels(labels);
            view.focus(end);
        }
    }
}

