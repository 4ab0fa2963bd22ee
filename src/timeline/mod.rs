//! Core timeline logic - channels of slot-indexed modules
//! Every mutation goes through `Timeline`; channels and modules are read-only outside it.
use std::ops::Range;

use tracing::{debug, warn};

use crate::config::{Palette, TimelineConfig};
use crate::error::TimelineError;

pub mod channel;
pub mod connections;
pub mod fill;
pub mod module;

pub use channel::Channel;
pub use connections::{Connector, InstanceGroup, Placement};
pub use fill::FillPlan;
pub use module::{InstanceId, Module, ModuleTemplate};

pub type ChannelId = usize;

/// Unique across the whole timeline, not only within a channel.
pub type ModuleId = u64;

#[derive(Debug, Clone)]
pub struct Timeline {
    channels: Vec<Channel>,
    next_channel_id: ChannelId,
    next_module_id: ModuleId,
    palette: Palette,
}

impl Timeline {
    pub fn new(config: &TimelineConfig) -> Self {
        let mut timeline = Self {
            channels: Vec::with_capacity(config.initial_channel_count),
            next_channel_id: 0,
            next_module_id: 0,
            palette: config.palette,
        };
        for _ in 0..config.initial_channel_count {
            timeline.add_channel();
        }
        timeline
    }

    /// Timeline with `count` empty channels and the default palette.
    pub fn with_channels(count: usize) -> Self {
        Self::new(&TimelineConfig {
            initial_channel_count: count,
            ..TimelineConfig::default()
        })
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn add_channel(&mut self) -> &Channel {
        let id = self.next_channel_id;
        self.next_channel_id += 1;
        self.channels.push(Channel::new(id));
        debug!(channel_id = id, "Channel added");
        &self.channels[self.channels.len() - 1]
    }

    /// Channels in display order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id() == channel_id)
    }

    fn channel_index(&self, channel_id: ChannelId) -> Result<usize, TimelineError> {
        self.channels
            .iter()
            .position(|c| c.id() == channel_id)
            .ok_or(TimelineError::ChannelNotFound { channel_id })
    }

    /// Place a module built from `template` at `position`.
    ///
    /// The module gets the next timeline-wide id and the template's instance
    /// id, or a fresh one if the template has none. A rejected placement still
    /// consumes the id. The module's full original span must fit below
    /// `usize::MAX`, so a later crop can always grow it back.
    pub fn add_module(
        &mut self,
        channel_id: ChannelId,
        position: usize,
        template: &ModuleTemplate,
    ) -> Result<&Module, TimelineError> {
        let index = self.channel_index(channel_id)?;
        template.validate(&self.palette)?;
        if position.checked_add(template.original_length).is_none() {
            return Err(TimelineError::OutOfRange {
                position,
                length: template.original_length,
            });
        }

        let id = self.next_module_id;
        self.next_module_id += 1;
        let instance_id = template.instance_id.unwrap_or_else(InstanceId::new);
        let module = Module::new(id, position, instance_id, template);

        match self.channels[index].add_module(module) {
            Some(module) => {
                debug!(
                    channel_id,
                    module_id = id,
                    position,
                    length = module.length(),
                    "Module placed"
                );
                Ok(module)
            }
            None => Err(TimelineError::Collision {
                channel_id,
                position,
                length: template.length,
            }),
        }
    }

    pub fn remove_module(
        &mut self,
        channel_id: ChannelId,
        module_id: ModuleId,
    ) -> Result<(), TimelineError> {
        let index = self.channel_index(channel_id)?;
        if !self.channels[index].remove_module(module_id) {
            return Err(TimelineError::ModuleNotFound {
                channel_id,
                module_id,
            });
        }
        debug!(channel_id, module_id, "Module removed");
        Ok(())
    }

    pub fn crop_module(
        &mut self,
        channel_id: ChannelId,
        module_id: ModuleId,
        new_length: usize,
    ) -> Result<(), TimelineError> {
        let index = self.channel_index(channel_id)?;
        self.channels[index].crop_module(module_id, new_length)?;
        debug!(channel_id, module_id, new_length, "Module cropped");
        Ok(())
    }

    /// Look up a module by id within one channel.
    pub fn module(&self, channel_id: ChannelId, module_id: ModuleId) -> Option<&Module> {
        self.channel(channel_id)?.module(module_id)
    }

    /// The module covering `position` on a channel.
    pub fn module_at(&self, channel_id: ChannelId, position: usize) -> Option<&Module> {
        self.channel(channel_id)?.module_at(position)
    }

    /// Largest module end across all channels, 0 when there are none.
    pub fn rightmost_position(&self) -> usize {
        self.channels
            .iter()
            .map(Channel::rightmost_position)
            .max()
            .unwrap_or(0)
    }

    pub fn module_count(&self) -> usize {
        self.channels.iter().map(|c| c.modules().len()).sum()
    }

    /// Whether a module of `length` could be placed at `position`.
    pub fn can_place(&self, channel_id: ChannelId, position: usize, length: usize) -> bool {
        length > 0
            && position.checked_add(length).is_some()
            && self
                .channel(channel_id)
                .is_some_and(|c| !c.has_collision(position, length))
    }

    pub fn plan_fill(
        &self,
        channel_id: ChannelId,
        start: usize,
        visible: Range<usize>,
        length: usize,
    ) -> Result<FillPlan, TimelineError> {
        let channel = self
            .channel(channel_id)
            .ok_or(TimelineError::ChannelNotFound { channel_id })?;
        Ok(fill::plan_fill(channel, start, visible, length))
    }

    /// Tile the empty run around `start` with copies of `template`.
    ///
    /// All tiles share one instance id: the template's, or one minted for this
    /// fill. Returns the ids of the placed modules in position order.
    ///
    /// This differs from stamping with `add_module`, which mints a fresh
    /// instance per placement when the template has none.
    pub fn fill(
        &mut self,
        channel_id: ChannelId,
        start: usize,
        visible: Range<usize>,
        template: &ModuleTemplate,
    ) -> Result<Vec<ModuleId>, TimelineError> {
        template.validate(&self.palette)?;
        let plan = self.plan_fill(channel_id, start, visible, template.length)?;

        let template = template
            .clone()
            .with_instance(template.instance_id.unwrap_or_else(InstanceId::new));

        let mut placed = Vec::with_capacity(plan.positions.len());
        for position in plan.positions {
            match self.add_module(channel_id, position, &template) {
                Ok(module) => placed.push(module.id()),
                Err(err) => warn!(channel_id, position, %err, "Fill tile rejected"),
            }
        }

        debug!(
            channel_id,
            left = plan.bounds.start,
            right = plan.bounds.end,
            placed = placed.len(),
            "Fill complete"
        );
        Ok(placed)
    }

    pub fn instance_groups(&self) -> Vec<InstanceGroup<'_>> {
        connections::group_instances(self)
    }

    pub fn connections(&self) -> Vec<Connector> {
        connections::derive_connections(self)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}
