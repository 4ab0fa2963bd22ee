//! Fill planner - tiles the empty run around a slot with one template length
use std::ops::Range;

use super::channel::Channel;

/// Where a fill will place modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
    /// Empty run `[left, right)` found around the start slot.
    pub bounds: Range<usize>,
    /// Start slot of every tile that fits completely inside `bounds`.
    pub positions: Vec<usize>,
}

impl FillPlan {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Plan a fill of `channel` from `start`, searching only inside `visible`.
///
/// The left bound is one past the nearest occupied slot left of `start`, the
/// right bound the nearest occupied slot at or after `start`; either falls back
/// to the visible edge. Tiles of `length` are laid from the left bound and a
/// trailing tile that would cross the right bound is dropped, not shortened.
pub fn plan_fill(
    channel: &Channel,
    start: usize,
    visible: Range<usize>,
    length: usize,
) -> FillPlan {
    let left = (visible.start..start)
        .rev()
        .find(|&slot| channel.module_at(slot).is_some())
        .map_or(visible.start, |slot| slot + 1);

    let right = (start..visible.end)
        .find(|&slot| channel.module_at(slot).is_some())
        .unwrap_or(visible.end)
        .max(left);

    let positions = if length == 0 {
        Vec::new()
    } else {
        (left..right)
            .step_by(length)
            .take_while(|&pos| pos.checked_add(length).is_some_and(|end| end <= right))
            .collect()
    };

    FillPlan {
        bounds: left..right,
        positions,
    }
}
