//! In-memory host for tests and embedding.

use std::cell::RefCell;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::component::Icon;
use crate::event::ActorId;
use crate::host::{Host, Surface};
use crate::panel::id::SurfaceId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceBuffer {
    title: CompactString,
    cells: Vec<Option<Icon>>,
}

impl SurfaceBuffer {
    fn new(title: &str, size: usize) -> Self {
        Self {
            title: title.into(),
            cells: vec![None; size],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, slot: usize) -> Option<&Icon> {
        self.cells.get(slot)?.as_ref()
    }

    pub fn set(&mut self, slot: usize, icon: Option<Icon>) {
        if let Some(cell) = self.cells.get_mut(slot) {
            *cell = icon;
        }
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }
}

type SharedBuffers = Rc<RefCell<FxHashMap<SurfaceId, SurfaceBuffer>>>;

#[derive(Debug, Default)]
pub struct HeadlessHost {
    buffers: SharedBuffers,
    shown: Vec<(SurfaceId, ActorId)>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, id: SurfaceId, slot: usize) -> Option<Icon> {
        self.buffers.borrow().get(&id)?.cell(slot).cloned()
    }

    pub fn buffer(&self, id: SurfaceId) -> Option<SurfaceBuffer> {
        self.buffers.borrow().get(&id).cloned()
    }

    pub fn with_buffer_mut<R>(
        &self,
        id: SurfaceId,
        f: impl FnOnce(&mut SurfaceBuffer) -> R,
    ) -> Option<R> {
        self.buffers.borrow_mut().get_mut(&id).map(f)
    }

    pub fn shown(&self) -> &[(SurfaceId, ActorId)] {
        &self.shown
    }

    /// The surface most recently shown to `actor`.
    pub fn viewing(&self, actor: ActorId) -> Option<SurfaceId> {
        self.shown
            .iter()
            .rev()
            .find(|(_, a)| *a == actor)
            .map(|(id, _)| *id)
    }
}

impl Host for HeadlessHost {
    fn create_surface(&mut self, id: SurfaceId, title: &str, size: usize) -> Box<dyn Surface> {
        self.buffers
            .borrow_mut()
            .insert(id, SurfaceBuffer::new(title, size));
        Box::new(HeadlessSurface {
            id,
            buffers: Rc::clone(&self.buffers),
        })
    }

    fn show(&mut self, id: SurfaceId, actor: ActorId) {
        self.shown.push((id, actor));
    }
}

struct HeadlessSurface {
    id: SurfaceId,
    buffers: SharedBuffers,
}

impl Surface for HeadlessSurface {
    fn set_slot(&mut self, slot: usize, icon: Option<&Icon>) {
        if let Some(buffer) = self.buffers.borrow_mut().get_mut(&self.id) {
            buffer.set(slot, icon.cloned());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
