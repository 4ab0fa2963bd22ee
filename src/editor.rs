//! Editing session: the selected template, the active tool and the click
//! dispatch that turns grid clicks into timeline commands.

use std::ops::Range;

use tracing::debug;

use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::timeline::{ChannelId, ModuleId, ModuleTemplate, Timeline};
use crate::transport::Transport;

/// What a plain click on the grid does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Place,
    Remove,
    /// Copy the clicked module into the selected template.
    Eyedropper,
    /// Tile the empty run around the clicked slot.
    Fill,
}

impl EditMode {
    pub const ALL: [EditMode; 4] = [
        EditMode::Place,
        EditMode::Remove,
        EditMode::Eyedropper,
        EditMode::Fill,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditMode::Place => "Place",
            EditMode::Remove => "Remove",
            EditMode::Eyedropper => "Eyedropper",
            EditMode::Fill => "Fill",
        }
    }
}

/// Modifier keys held during a click. Ctrl removes and Alt fills whatever
/// the active mode is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Placed(ModuleId),
    Removed(ModuleId),
    Picked(ModuleTemplate),
    Filled(Vec<ModuleId>),
    /// The click landed somewhere the tool has nothing to do.
    Ignored,
}

pub struct Editor {
    timeline: Timeline,
    transport: Transport,
    mode: EditMode,
    template: ModuleTemplate,
}

impl Editor {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            timeline: Timeline::new(config),
            transport: Transport::new(),
            mode: EditMode::default(),
            template: ModuleTemplate::default(),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn template(&self) -> &ModuleTemplate {
        &self.template
    }

    pub fn set_template(&mut self, template: ModuleTemplate) {
        self.template = template;
    }

    pub fn add_channel(&mut self) -> ChannelId {
        self.timeline.add_channel().id()
    }

    pub fn click(
        &mut self,
        channel_id: ChannelId,
        position: usize,
        modifiers: ClickModifiers,
        visible: Range<usize>,
    ) -> Result<EditOutcome, TimelineError> {
        if modifiers.ctrl {
            return self.remove_at(channel_id, position);
        }
        if modifiers.alt {
            return self.fill_at(channel_id, position, visible);
        }

        match self.mode {
            EditMode::Place => self.place(channel_id, position),
            EditMode::Remove => self.remove_at(channel_id, position),
            EditMode::Eyedropper => Ok(self.pick(channel_id, position)),
            EditMode::Fill => self.fill_at(channel_id, position, visible),
        }
    }

    /// Place the selected template. Clicking an occupied slot does nothing.
    pub fn place(
        &mut self,
        channel_id: ChannelId,
        position: usize,
    ) -> Result<EditOutcome, TimelineError> {
        if self.timeline.module_at(channel_id, position).is_some() {
            return Ok(EditOutcome::Ignored);
        }
        let module = self.timeline.add_module(channel_id, position, &self.template)?;
        Ok(EditOutcome::Placed(module.id()))
    }

    pub fn remove_at(
        &mut self,
        channel_id: ChannelId,
        position: usize,
    ) -> Result<EditOutcome, TimelineError> {
        let Some(module_id) = self
            .timeline
            .module_at(channel_id, position)
            .map(|m| m.id())
        else {
            return Ok(EditOutcome::Ignored);
        };
        self.timeline.remove_module(channel_id, module_id)?;
        Ok(EditOutcome::Removed(module_id))
    }

    /// Eyedropper: later placements copy the clicked module and link to it.
    pub fn pick(&mut self, channel_id: ChannelId, position: usize) -> EditOutcome {
        match self.timeline.module_at(channel_id, position) {
            Some(module) => {
                self.template = module.template();
                debug!(module_id = module.id(), "Template picked");
                EditOutcome::Picked(self.template.clone())
            }
            None => EditOutcome::Ignored,
        }
    }

    pub fn fill_at(
        &mut self,
        channel_id: ChannelId,
        position: usize,
        visible: Range<usize>,
    ) -> Result<EditOutcome, TimelineError> {
        let placed = self
            .timeline
            .fill(channel_id, position, visible, &self.template)?;
        Ok(EditOutcome::Filled(placed))
    }

    /// Span of the placement shadow shown while hovering `position`.
    pub fn preview(&self, channel_id: ChannelId, position: usize) -> Option<Range<usize>> {
        let length = self.template.length;
        self.timeline
            .can_place(channel_id, position, length)
            .then(|| position..position + length)
    }

    /// Slots the grid should show: at least the viewport, and half a viewport
    /// past the rightmost module.
    pub fn total_slots(&self, viewport_slots: usize) -> usize {
        let half_view = viewport_slots.div_ceil(2);
        viewport_slots.max(self.timeline.rightmost_position().saturating_add(half_view))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MODS: ClickModifiers = ClickModifiers {
        ctrl: false,
        alt: false,
    };

    #[test]
    fn test_place_click() {
        let mut editor = Editor::default();
        let outcome = editor.click(0, 3, NO_MODS, 0..20).unwrap();
        assert!(matches!(outcome, EditOutcome::Placed(_)));

        // Occupied slot
        assert_eq!(editor.click(0, 4, NO_MODS, 0..20), Ok(EditOutcome::Ignored));
        // Would overlap the module at [3,5)
        assert!(editor.click(0, 2, NO_MODS, 0..20).is_err());
    }

    #[test]
    fn test_ctrl_click_removes_in_any_mode() {
        let mut editor = Editor::default();
        editor.place(1, 0).unwrap();
        editor.set_mode(EditMode::Fill);

        let ctrl = ClickModifiers {
            ctrl: true,
            ..NO_MODS
        };
        assert!(matches!(
            editor.click(1, 1, ctrl, 0..20),
            Ok(EditOutcome::Removed(_))
        ));
        assert_eq!(editor.timeline().module_count(), 0);
        assert_eq!(editor.click(1, 1, ctrl, 0..20), Ok(EditOutcome::Ignored));
    }

    #[test]
    fn test_eyedropper_links_new_placements() {
        let mut editor = Editor::default();
        editor.set_template(ModuleTemplate::new(3, 2, 4));
        editor.place(0, 0).unwrap();
        editor.timeline_mut().crop_module(0, 0, 1).unwrap();

        editor.set_mode(EditMode::Eyedropper);
        let EditOutcome::Picked(template) = editor.click(0, 0, NO_MODS, 0..20).unwrap() else {
            panic!("expected a picked template");
        };
        assert_eq!(template.length, 3);
        assert_eq!(template.color_index, 2);

        editor.set_mode(EditMode::Place);
        editor.click(0, 6, NO_MODS, 0..20).unwrap();

        let connectors = editor.timeline().connections();
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].span(), 1..6);
    }

    #[test]
    fn test_alt_click_fills() {
        let mut editor = Editor::default();
        let alt = ClickModifiers {
            alt: true,
            ..NO_MODS
        };
        let outcome = editor.click(2, 4, alt, 0..10).unwrap();
        assert!(matches!(outcome, EditOutcome::Filled(ref ids) if ids.len() == 5));
    }

    #[test]
    fn test_preview() {
        let mut editor = Editor::default();
        editor.place(0, 4).unwrap();

        assert_eq!(editor.preview(0, 0), Some(0..2));
        assert_eq!(editor.preview(0, 3), None);
        assert_eq!(editor.preview(0, 4), None);
        assert_eq!(editor.preview(0, 6), Some(6..8));
    }

    #[test]
    fn test_preview_past_last_slot() {
        let editor = Editor::default();
        assert_eq!(editor.preview(0, usize::MAX - 1), None);
        assert_eq!(editor.preview(0, usize::MAX - 2), Some(usize::MAX - 2..usize::MAX));
    }

    #[test]
    fn test_total_slots() {
        let mut editor = Editor::default();
        assert_eq!(editor.total_slots(20), 20);

        editor.place(0, 18).unwrap();
        assert_eq!(editor.total_slots(20), 30);
        assert_eq!(editor.total_slots(5), 23);
    }
}
