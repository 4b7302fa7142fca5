//! Presentation index
//!
//! Maps entity ids to whatever the host uses to draw them. The index is fed
//! the simulation's event stream and is the only thing that ever touches a
//! visual handle. A backend that cannot build a model (asset still loading,
//! headless host) gets a placeholder instead, which is tracked and removed
//! exactly like a real handle.

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{EntityId, EntityKind, GameEvent};

/// Host rendering capability
pub trait VisualBackend {
    type Handle;

    /// Build a visual. `None` means no model is available for `kind`.
    fn create(&mut self, kind: EntityKind, pos: Vec2) -> Option<Self::Handle>;
    fn move_to(&mut self, handle: &mut Self::Handle, pos: Vec2);
    /// Fade out (used gates)
    fn dim(&mut self, handle: &mut Self::Handle);
    fn flash(&mut self, _handle: &mut Self::Handle) {}
    fn destroy(&mut self, handle: Self::Handle);
}

/// What the index holds per entity
#[derive(Debug, Clone, PartialEq)]
pub enum VisualHandle<H> {
    Model(H),
    /// Stand-in the host can draw as a plain marker
    Placeholder {
        kind: EntityKind,
        pos: Vec2,
        dimmed: bool,
    },
}

impl<H> VisualHandle<H> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, VisualHandle::Placeholder { .. })
    }
}

/// Entity id -> visual handle
pub struct VisualIndex<B: VisualBackend> {
    backend: B,
    handles: HashMap<EntityId, VisualHandle<B::Handle>>,
}

impl<B: VisualBackend> VisualIndex<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handles: HashMap::new(),
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Apply one event. Non-visual events are ignored.
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SpawnVisual { entity, kind, pos } => self.spawn(*entity, *kind, *pos),
            GameEvent::MoveVisual { entity, pos } => match self.handles.get_mut(entity) {
                Some(VisualHandle::Model(h)) => self.backend.move_to(h, *pos),
                Some(VisualHandle::Placeholder { pos: p, .. }) => *p = *pos,
                None => log::debug!("Move for unknown visual {:?}", entity),
            },
            GameEvent::DimVisual { entity } => match self.handles.get_mut(entity) {
                Some(VisualHandle::Model(h)) => self.backend.dim(h),
                Some(VisualHandle::Placeholder { dimmed, .. }) => *dimmed = true,
                None => log::debug!("Dim for unknown visual {:?}", entity),
            },
            GameEvent::Flash { entity } => {
                if let Some(VisualHandle::Model(h)) = self.handles.get_mut(entity) {
                    self.backend.flash(h);
                }
            }
            GameEvent::RemoveVisual { entity } => self.remove(*entity),
            _ => {}
        }
    }

    fn spawn(&mut self, entity: EntityId, kind: EntityKind, pos: Vec2) {
        if self.handles.contains_key(&entity) {
            log::warn!("Visual {:?} spawned twice, replacing", entity);
            self.remove(entity);
        }
        let handle = match self.backend.create(kind, pos) {
            Some(h) => VisualHandle::Model(h),
            None => {
                log::warn!("No model for {:?}, using placeholder", kind);
                VisualHandle::Placeholder {
                    kind,
                    pos,
                    dimmed: false,
                }
            }
        };
        self.handles.insert(entity, handle);
    }

    fn remove(&mut self, entity: EntityId) {
        if let Some(VisualHandle::Model(h)) = self.handles.remove(&entity) {
            self.backend.destroy(h);
        }
    }

    /// Drop every visual (run abandoned without a destroy batch)
    pub fn clear(&mut self) {
        for (_, handle) in self.handles.drain() {
            if let VisualHandle::Model(h) = handle {
                self.backend.destroy(h);
            }
        }
    }

    pub fn get(&self, entity: EntityId) -> Option<&VisualHandle<B::Handle>> {
        self.handles.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.handles.values().filter(|h| h.is_placeholder()).count()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
