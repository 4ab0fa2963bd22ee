//! Channels: one row of non-overlapping modules, sorted by position
use crate::error::TimelineError;

use super::module::Module;
use super::{ChannelId, ModuleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    modules: Vec<Module>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId) -> Self {
        Self {
            id,
            modules: Vec::new(),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Modules in ascending position order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn has_collision(&self, position: usize, length: usize) -> bool {
        self.modules.iter().any(|m| m.overlaps(position, length))
    }

    /// Insert unless the module's span collides. Returns the stored module.
    pub(crate) fn add_module(&mut self, module: Module) -> Option<&Module> {
        if self.has_collision(module.position(), module.length()) {
            return None;
        }

        let id = module.id();
        self.modules.push(module);
        self.modules.sort_by_key(Module::position);
        self.modules.iter().find(|m| m.id() == id)
    }

    pub(crate) fn remove_module(&mut self, module_id: ModuleId) -> bool {
        match self.modules.iter().position(|m| m.id() == module_id) {
            Some(index) => {
                self.modules.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id() == module_id)
    }

    /// Crop a module, refusing to grow it into the module that follows.
    pub(crate) fn crop_module(
        &mut self,
        module_id: ModuleId,
        new_length: usize,
    ) -> Result<(), TimelineError> {
        let index = self
            .modules
            .iter()
            .position(|m| m.id() == module_id)
            .ok_or(TimelineError::ModuleNotFound {
                channel_id: self.id,
                module_id,
            })?;

        let module = &self.modules[index];
        module.check_crop(new_length)?;

        // Sorted and non-overlapping, so only the next module can be in the way
        let end = module.end();
        let grown_end = module.position() + new_length;
        if let Some(next) = self.modules.get(index + 1) {
            if grown_end > next.position() {
                return Err(TimelineError::Collision {
                    channel_id: self.id,
                    position: end,
                    length: grown_end - end,
                });
            }
        }

        self.modules[index].crop(new_length)
    }

    pub fn module_at(&self, position: usize) -> Option<&Module> {
        self.modules.iter().find(|m| m.contains(position))
    }

    /// Largest module end, or 0 when empty.
    pub fn rightmost_position(&self) -> usize {
        self.modules.iter().map(Module::end).max().unwrap_or(0)
    }
}
