//! Modules: fixed-length items placed on a channel
use std::fmt;

use uuid::Uuid;

use crate::config::Palette;
use crate::error::TimelineError;

use super::ModuleId;

/// Shared by every placement stamped from the same source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What to place: everything about a module except where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTemplate {
    pub length: usize,
    pub original_length: usize,
    pub color_index: usize,
    pub symbol_index: usize,
    /// Minted on placement when absent.
    pub instance_id: Option<InstanceId>,
}

impl ModuleTemplate {
    pub fn new(length: usize, color_index: usize, symbol_index: usize) -> Self {
        Self {
            length,
            original_length: length,
            color_index,
            symbol_index,
            instance_id: None,
        }
    }

    pub fn with_original_length(mut self, original_length: usize) -> Self {
        self.original_length = original_length;
        self
    }

    pub fn with_instance(mut self, instance_id: InstanceId) -> Self {
        self.instance_id = Some(instance_id);
        self
    }

    pub(crate) fn validate(&self, palette: &Palette) -> Result<(), TimelineError> {
        let reason = if self.length < 1 {
            "length must be at least 1".to_string()
        } else if self.original_length < self.length {
            format!(
                "original length {} is shorter than length {}",
                self.original_length, self.length
            )
        } else if !palette.contains(self.color_index, self.symbol_index) {
            format!(
                "color {} / symbol {} outside palette of {} colors and {} symbols",
                self.color_index, self.symbol_index, palette.colors, palette.symbols
            )
        } else {
            return Ok(());
        };
        Err(TimelineError::InvalidTemplate { reason })
    }
}

impl Default for ModuleTemplate {
    fn default() -> Self {
        Self::new(2, 0, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    instance_id: InstanceId,
    position: usize,
    length: usize,
    original_length: usize,
    color_index: usize,
    symbol_index: usize,
}

impl Module {
    pub(crate) fn new(
        id: ModuleId,
        position: usize,
        instance_id: InstanceId,
        template: &ModuleTemplate,
    ) -> Self {
        Self {
            id,
            instance_id,
            position,
            length: template.length,
            original_length: template.original_length,
            color_index: template.color_index,
            symbol_index: template.symbol_index,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn original_length(&self) -> usize {
        self.original_length
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn symbol_index(&self) -> usize {
        self.symbol_index
    }

    /// Exclusive upper bound of the occupied span.
    pub fn end(&self) -> usize {
        self.position + self.length
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= self.position && position < self.end()
    }

    /// Whether `[position, position + length)` intersects this module.
    pub fn overlaps(&self, position: usize, length: usize) -> bool {
        position < self.end() && position.saturating_add(length) > self.position
    }

    pub(crate) fn check_crop(&self, new_length: usize) -> Result<(), TimelineError> {
        if new_length < 1 || new_length > self.original_length {
            return Err(TimelineError::InvalidCrop {
                new_length,
                original_length: self.original_length,
            });
        }
        Ok(())
    }

    /// Change the visible length within `1..=original_length`.
    pub(crate) fn crop(&mut self, new_length: usize) -> Result<(), TimelineError> {
        self.check_crop(new_length)?;
        self.length = new_length;
        Ok(())
    }

    /// Eyedropper copy: full original length, same look, same instance.
    pub fn template(&self) -> ModuleTemplate {
        ModuleTemplate::new(self.original_length, self.color_index, self.symbol_index)
            .with_instance(self.instance_id)
    }
}
