// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, mem, rc::Rc, time::Duration};

use habitual_dnd::{
    DragCallbacks, DragConfig, DragItem, DragList, DragPhase, FrameClock, GestureState,
    NoopSurface,
};
use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::Block;

/// Extent of one row. The engine measures the list in terminal rows.
const ROW: f32 = 1.0;

/// A row dragged upwards changes slot only once it is past a full row, so an
/// upward keyboard step overshoots by this much.
const NUDGE: f32 = 0.01;

#[derive(Debug, PartialEq, Eq)]
pub enum Message {
    Handled,
    Exit,
}

/// Keyboard host of a reorderable list: the highlighted row is picked up with
/// a key press, and the arrow keys move a virtual touch point one row at a
/// time.
pub struct DragView {
    title: String,
    clock: FrameClock,
    list: DragList,
    items: Vec<DragItem>,
    labels: Vec<String>,
    drops: Rc<RefCell<Vec<(usize, usize)>>>,
    cursor: usize,
    touch: Option<Touch>,
    viewport: u16,
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    index: usize,
    /// Position of the touch in the viewport when the row was picked up.
    y0: f32,
    steps: i32,
}

impl Touch {
    fn dy(&self) -> f32 {
        match self.steps {
            s if s < 0 => s as f32 * ROW - NUDGE,
            s => s as f32 * ROW,
        }
    }
}

/// A row as it should appear on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub label: &'a str,
    /// Top of the row, relative to the viewport.
    pub y: f32,
    pub dragged: bool,
    pub cursor: bool,
}

impl DragView {
    pub fn new(title: String, config: DragConfig, labels: Vec<String>) -> Self {
        let clock = FrameClock::new();
        let list = DragList::new(config, &clock, NoopSurface);
        let mut view = Self {
            title,
            clock,
            list,
            items: Vec::new(),
            labels: Vec::new(),
            drops: Rc::default(),
            cursor: 0,
            touch: None,
            viewport: 0,
        };
        view.set_labels(labels);
        view
    }

    /// Replaces the rows, e.g. with the order re-fetched after a drop. Every
    /// row gets a fresh controller, so nothing is left displaced.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        let count = labels.len();
        self.labels = labels;
        self.items = (0..count)
            .map(|i| {
                let item = self.list.item(i, self.callbacks());
                item.on_layout(ROW);
                item
            })
            .collect();

        self.list.set_item_count(count);
        self.list.on_content_size_change(count as f32 * ROW);
        self.cursor = self.cursor.min(count.saturating_sub(1));
        self.keep_cursor_visible();
    }

    /// Reports the number of rows the list can show.
    pub fn resize(&mut self, viewport: u16) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.list.on_layout(f32::from(viewport) * ROW);
            self.keep_cursor_visible();
        }
    }

    pub fn focus(&mut self, index: usize) {
        self.cursor = index.min(self.labels.len().saturating_sub(1));
        self.keep_cursor_visible();
    }

    /// Advances animations and edge scrolling by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.clock.tick(dt);
    }

    /// Drops that finished since the last call, as `(start, end)` indices.
    pub fn take_drops(&self) -> Vec<(usize, usize)> {
        mem::take(&mut *self.drops.borrow_mut())
    }

    pub fn is_dragging(&self) -> bool {
        self.touch.is_some()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<Message> {
        if key == KeyCode::Char('q') {
            self.cancel();
            return Some(Message::Exit);
        }

        if self.touch.is_some() {
            self.on_dragging_key(key)
        } else if self.list.phase() == DragPhase::Idle {
            self.on_idle_key(key)
        } else {
            None // the released row is still snapping
        }
    }

    /// Rows in drawing order: the dragged row, until it has snapped into its
    /// slot, comes last so it stays on top.
    pub fn rows(&self) -> Vec<RowView<'_>> {
        let scroll = self.list.scroll_offset();
        let dragged = self.list.session().map(|s| s.start_index);
        let mut rows: Vec<RowView<'_>> = self
            .items
            .iter()
            .zip(&self.labels)
            .enumerate()
            .map(|(i, (item, label))| RowView {
                label,
                y: i as f32 * ROW + item.offset().y - scroll,
                dragged: dragged == Some(i),
                cursor: dragged.is_none() && i == self.cursor,
            })
            .collect();
        rows.sort_by_key(|row| row.dragged);
        rows
    }

    /// Cancels any drag and stops the engine.
    pub fn teardown(&mut self) {
        self.cancel();
        self.list.teardown();
    }

    fn callbacks(&self) -> DragCallbacks {
        let drops = self.drops.clone();
        DragCallbacks::new()
            .on_drag_started(|index| tracing::debug!(index, "row picked up"))
            .on_drag_finished(move |start, end| drops.borrow_mut().push((start, end)))
    }

    fn on_idle_key(&mut self, key: KeyCode) -> Option<Message> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.focus(self.cursor.saturating_sub(1));
                Some(Message::Handled)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.focus(self.cursor + 1);
                Some(Message::Handled)
            }
            KeyCode::Char(' ') => self.pick_up(),
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        }
    }

    fn on_dragging_key(&mut self, key: KeyCode) -> Option<Message> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.step(-1),
            KeyCode::Down | KeyCode::Char('j') => self.step(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.release(),
            KeyCode::Esc => {
                self.cancel();
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn pick_up(&mut self) -> Option<Message> {
        let item = self.items.get(self.cursor)?;
        if !item.start_drag() {
            return None;
        }
        item.on_grant();

        let y0 = self.cursor as f32 * ROW - self.list.scroll_offset() + ROW / 2.0;
        self.touch = Some(Touch {
            index: self.cursor,
            y0,
            steps: 0,
        });
        Some(Message::Handled)
    }

    fn step(&mut self, delta: i32) -> Option<Message> {
        let mut touch = self.touch?;
        // the touch never leaves the viewport
        let lo = (-touch.y0).ceil() as i32;
        let hi = ((f32::from(self.viewport) * ROW - touch.y0) / ROW).floor() as i32;
        touch.steps = (touch.steps + delta).clamp(lo, hi.max(lo));
        self.touch = Some(touch);

        self.items.get(touch.index)?.on_move(GestureState {
            dx: 0.0,
            dy: touch.dy(),
            y0: touch.y0,
        });
        Some(Message::Handled)
    }

    fn release(&mut self) -> Option<Message> {
        let touch = self.touch.take()?;
        if let Some(session) = self.list.session() {
            self.cursor = session.current_index;
        }
        self.items.get(touch.index)?.on_release();
        Some(Message::Handled)
    }

    fn cancel(&mut self) {
        if let Some(touch) = self.touch.take() {
            if let Some(item) = self.items.get(touch.index) {
                item.cancel_drag();
            }
            self.cursor = touch.index;
        }
    }

    fn keep_cursor_visible(&mut self) {
        if self.touch.is_some() || self.viewport == 0 {
            return;
        }

        let geometry = self.list.geometry();
        let top = self.cursor as f32 * ROW;
        let bottom = top + ROW;
        let mut offset = geometry.current_offset;
        if top < offset {
            offset = top;
        } else if bottom > offset + geometry.viewport_extent {
            offset = bottom - geometry.viewport_extent;
        }
        self.list.on_scroll(geometry.clamp(offset));
    }

    fn instructions(&self) -> Line<'static> {
        let keys = if self.is_dragging() {
            [
                (" Move ", "<Up/Down>"),
                (" Drop ", "<Space>"),
                (" Cancel ", "<Esc> "),
            ]
        } else {
            [
                (" Select ", "<Up/Down>"),
                (" Pick up ", "<Space>"),
                (" Quit ", "<q> "),
            ]
        };

        let spans: Vec<Span<'static>> = keys
            .into_iter()
            .flat_map(|(label, key)| [Span::raw(label), key.blue().bold()])
            .collect();
        Line::from(spans)
    }
}

impl Widget for &DragView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(format!(" {} ", self.title).bold());
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(title.centered())
            .title_bottom(self.instructions().centered());

        let inner = block.inner(area);
        block.render(area, buf);

        for row in self.rows() {
            let y = row.y.round();
            if y < 0.0 || y >= f32::from(inner.height) {
                continue;
            }
            let y = inner.y + y as u16;

            let (marker, style) = match (row.dragged, row.cursor) {
                (true, _) => ("≡ ", Style::new().yellow().bold().reversed()),
                (false, true) => ("> ", Style::new().bold()),
                (false, false) => ("  ", Style::new()),
            };
            let width = usize::from(inner.width);
            buf.set_stringn(inner.x, y, " ".repeat(width), width, style);
            buf.set_stringn(inner.x, y, format!("{marker}{}", row.label), width, style);
        }
    }
}
