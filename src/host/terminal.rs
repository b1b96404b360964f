//! Terminal host: draws the shown surface with `ratatui` and turns
//! `crossterm` mouse and key input into host events.
//!
//! Below the panel sits a one-row inventory that belongs to no panel, so
//! bottom-surface clicks and shift-clicks can be tried out. Vetoed events
//! are dropped; everything else gets the default handling of a container
//! (pick up / put down with a cursor item).

use std::io;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthChar;

use crate::component::Icon;
use crate::event::{ActorId, ClickEvent, CloseEvent, DragEvent, HostEvent};
use crate::grid::GRID_WIDTH;
use crate::host::headless::HeadlessHost;
use crate::host::{Host, Surface};
use crate::panel::id::SurfaceId;
use crate::router::EventBus;

const CELL_W: u16 = 7;
const CELL_H: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hit {
    Top(usize),
    Bottom(usize),
}

#[derive(Clone, Copy, Debug)]
struct GridArea {
    top: Rect,
    top_size: usize,
    bottom: Rect,
}

#[derive(Debug)]
struct PendingPress {
    shift: bool,
    touched: Vec<Hit>,
}

pub struct TerminalHost {
    store: HeadlessHost,
    viewer: ActorId,
    open: Option<SurfaceId>,
    inventory: Vec<Option<Icon>>,
    cursor: Option<Icon>,
    grid: Option<GridArea>,
    pending: Option<PendingPress>,
    status: String,
}

impl TerminalHost {
    pub fn new(viewer: ActorId) -> Self {
        Self {
            store: HeadlessHost::new(),
            viewer,
            open: None,
            inventory: vec![None; GRID_WIDTH],
            cursor: None,
            grid: None,
            pending: None,
            status: String::from("click to interact, shift-click to move, esc to close"),
        }
    }

    pub fn viewer(&self) -> ActorId {
        self.viewer
    }

    pub fn put_in_inventory(&mut self, slot: usize, icon: Icon) {
        if let Some(cell) = self.inventory.get_mut(slot) {
            *cell = Some(icon);
        }
    }

    /// Runs until the viewer closes the shown surface.
    pub fn run(&mut self, bus: &mut EventBus) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        while self.open.is_some() {
            terminal.draw(|frame| self.draw(frame))?;
            let Some(mut event) = self.translate(event::read()?) else {
                continue;
            };
            bus.dispatch(&mut event);
            self.apply_default(&event);
        }
        Ok(())
    }

    fn translate(&mut self, input: Event) -> Option<HostEvent> {
        let surface = self.open?;
        match input {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    Some(HostEvent::Close(CloseEvent::new(Some(surface), self.viewer)))
                }
                _ => None,
            },
            Event::Mouse(me) => {
                let hit = self.hit(me.column, me.row);
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pending = hit.map(|hit| PendingPress {
                            shift: me.modifiers.contains(KeyModifiers::SHIFT),
                            touched: vec![hit],
                        });
                        None
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let (Some(pending), Some(hit)) = (self.pending.as_mut(), hit) {
                            if !pending.touched.contains(&hit) {
                                pending.touched.push(hit);
                            }
                        }
                        None
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        let pending = self.pending.take()?;
                        if pending.touched.len() > 1 {
                            let top_size = self.grid.map(|g| g.top_size).unwrap_or_default();
                            let raw = pending.touched.iter().map(|hit| match *hit {
                                Hit::Top(slot) => slot,
                                Hit::Bottom(slot) => top_size + slot,
                            });
                            return Some(HostEvent::Drag(DragEvent::new(
                                raw,
                                Some(surface),
                                self.viewer,
                            )));
                        }
                        let click = match pending.touched.first()? {
                            Hit::Top(slot) => ClickEvent::new(*slot, Some(surface), self.viewer),
                            Hit::Bottom(slot) => {
                                ClickEvent::in_bottom(*slot, Some(surface), None, self.viewer)
                            }
                        };
                        Some(HostEvent::Click(if pending.shift {
                            click.with_shift()
                        } else {
                            click
                        }))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn apply_default(&mut self, event: &HostEvent) {
        if event.is_cancelled() {
            self.status = String::from("vetoed");
            return;
        }
        match event {
            HostEvent::Click(click) => {
                let hit = if click.clicked.is_some() {
                    Hit::Top(click.slot)
                } else {
                    Hit::Bottom(click.slot)
                };
                if click.shift {
                    self.move_across(hit);
                } else {
                    let held = self.cursor.take();
                    self.cursor = self.replace(hit, held);
                }
                self.status = format!("clicked {:?}", hit);
            }
            HostEvent::Drag(drag) => {
                let top_size = self.grid.map(|g| g.top_size).unwrap_or_default();
                let target = drag
                    .slots
                    .iter()
                    .map(|&raw| {
                        if raw < top_size {
                            Hit::Top(raw)
                        } else {
                            Hit::Bottom(raw - top_size)
                        }
                    })
                    .find(|&hit| self.get(hit).is_none());
                if let Some(target) = target {
                    let held = self.cursor.take();
                    self.replace(target, held);
                }
                self.status = format!("dragged over {} slots", drag.slots.len());
            }
            HostEvent::Close(_) => {
                self.open = None;
            }
        }
    }

    fn move_across(&mut self, from: Hit) {
        let Some(id) = self.open else {
            return;
        };
        let to = match from {
            Hit::Top(_) => self.inventory.iter().position(Option::is_none).map(Hit::Bottom),
            Hit::Bottom(_) => self
                .store
                .buffer(id)
                .and_then(|b| b.first_empty())
                .map(Hit::Top),
        };
        if let Some(to) = to {
            let icon = self.replace(from, None);
            self.replace(to, icon);
        }
    }

    fn get(&self, hit: Hit) -> Option<Icon> {
        match hit {
            Hit::Top(slot) => self.store.slot(self.open?, slot),
            Hit::Bottom(slot) => self.inventory.get(slot)?.clone(),
        }
    }

    fn replace(&mut self, hit: Hit, icon: Option<Icon>) -> Option<Icon> {
        match hit {
            Hit::Top(slot) => {
                let id = self.open?;
                self.store
                    .with_buffer_mut(id, |b| {
                        let old = b.cell(slot).cloned();
                        b.set(slot, icon);
                        old
                    })
                    .flatten()
            }
            Hit::Bottom(slot) => std::mem::replace(self.inventory.get_mut(slot)?, icon),
        }
    }

    fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let grid = self.grid?;
        if let Some(slot) = slot_at(grid.top, column, row) {
            return (slot < grid.top_size).then_some(Hit::Top(slot));
        }
        slot_at(grid.bottom, column, row).map(Hit::Bottom)
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let Some(buffer) = self.open.and_then(|id| self.store.buffer(id)) else {
            return;
        };
        let rows = (buffer.size() / GRID_WIDTH) as u16;
        let width = CELL_W * GRID_WIDTH as u16 + 2;

        let top_outer = Rect::new(area.x, area.y, width, rows * CELL_H + 2).intersection(area);
        frame.render_widget(Block::bordered().title(buffer.title().to_string()), top_outer);
        let top = Rect::new(
            top_outer.x + 1,
            top_outer.y + 1,
            CELL_W * GRID_WIDTH as u16,
            rows * CELL_H,
        );
        for slot in 0..buffer.size() {
            draw_cell(frame, cell_rect(top, slot).intersection(area), buffer.cell(slot));
        }

        let bottom_outer =
            Rect::new(area.x, top_outer.bottom(), width, CELL_H + 2).intersection(area);
        frame.render_widget(Block::bordered().title("inventory"), bottom_outer);
        let bottom = Rect::new(
            bottom_outer.x + 1,
            bottom_outer.y + 1,
            CELL_W * GRID_WIDTH as u16,
            CELL_H,
        );
        for (slot, icon) in self.inventory.iter().enumerate() {
            draw_cell(frame, cell_rect(bottom, slot).intersection(area), icon.as_ref());
        }

        let held = self
            .cursor
            .as_ref()
            .map(|icon| icon.symbol.to_string())
            .unwrap_or_else(|| String::from("-"));
        let status = Rect::new(area.x, bottom_outer.bottom(), area.width, 1).intersection(area);
        frame.render_widget(
            Paragraph::new(format!("holding: {}  |  {}", held, self.status))
                .style(Style::default().fg(Color::DarkGray)),
            status,
        );

        self.grid = Some(GridArea {
            top,
            top_size: buffer.size(),
            bottom,
        });
    }
}

impl Host for TerminalHost {
    fn create_surface(&mut self, id: SurfaceId, title: &str, size: usize) -> Box<dyn Surface> {
        self.store.create_surface(id, title, size)
    }

    fn show(&mut self, id: SurfaceId, actor: ActorId) {
        self.store.show(id, actor);
        if actor == self.viewer {
            self.open = Some(id);
        }
    }
}

fn cell_rect(grid: Rect, slot: usize) -> Rect {
    let x = (slot % GRID_WIDTH) as u16;
    let y = (slot / GRID_WIDTH) as u16;
    Rect::new(grid.x + x * CELL_W, grid.y + y * CELL_H, CELL_W, CELL_H)
}

fn slot_at(grid: Rect, column: u16, row: u16) -> Option<usize> {
    if column < grid.x || row < grid.y || column >= grid.right() || row >= grid.bottom() {
        return None;
    }
    let x = ((column - grid.x) / CELL_W) as usize;
    let y = ((row - grid.y) / CELL_H) as usize;
    Some(y * GRID_WIDTH + x)
}

fn draw_cell(frame: &mut Frame<'_>, rect: Rect, icon: Option<&Icon>) {
    if rect.is_empty() {
        return;
    }
    let text = match icon {
        Some(icon) if icon.amount > 1 => format!("{}{}", icon.symbol, icon.amount),
        Some(icon) => icon.symbol.to_string(),
        None => String::new(),
    };
    let style = match icon {
        Some(_) => Style::default().add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    };
    let inner = CELL_W.saturating_sub(2) as usize;
    frame.render_widget(
        Paragraph::new(Line::from(fit(&text, inner)))
            .style(style)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
        rect,
    );
}

/// Truncates `s` to at most `width` terminal columns.
fn fit(s: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Raw mode, alternate screen and mouse capture for the lifetime of the guard.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort restore: try every step even if one fails.
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(error = %err, "disable_raw_mode failed");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            tracing::warn!(error = %err, "terminal restore failed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/terminal.rs"]
mod tests;
