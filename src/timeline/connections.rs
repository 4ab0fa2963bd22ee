//! Instance grouping and the connectors drawn between linked placements
use std::collections::HashMap;
use std::ops::Range;

use super::module::{InstanceId, Module};
use super::{ChannelId, Timeline};

/// One module together with the channel it sits on.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub channel_id: ChannelId,
    pub module: &'a Module,
}

/// All placements sharing one instance id, sorted by position.
#[derive(Debug, Clone)]
pub struct InstanceGroup<'a> {
    pub instance_id: InstanceId,
    pub members: Vec<Placement<'a>>,
}

/// Link between two consecutive same-channel placements of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub channel_id: ChannelId,
    pub color_index: usize,
    /// End of the earlier placement.
    pub span_start: usize,
    /// Start of the later placement.
    pub span_end: usize,
}

impl Connector {
    /// Adjacent placements leave nothing to draw.
    pub fn is_degenerate(&self) -> bool {
        self.span_start >= self.span_end
    }

    pub fn span(&self) -> Range<usize> {
        self.span_start..self.span_end
    }
}

/// Group every module by instance id, in order of first appearance.
pub fn group_instances(timeline: &Timeline) -> Vec<InstanceGroup<'_>> {
    let mut index: HashMap<InstanceId, usize> = HashMap::new();
    let mut groups: Vec<InstanceGroup<'_>> = Vec::new();

    for channel in timeline.channels() {
        for module in channel.modules() {
            let placement = Placement {
                channel_id: channel.id(),
                module,
            };
            match index.get(&module.instance_id()) {
                Some(&slot) => groups[slot].members.push(placement),
                None => {
                    index.insert(module.instance_id(), groups.len());
                    groups.push(InstanceGroup {
                        instance_id: module.instance_id(),
                        members: vec![placement],
                    });
                }
            }
        }
    }

    for group in &mut groups {
        // Stable, so equal positions keep channel order
        group.members.sort_by_key(|p| p.module.position());
    }
    groups
}

/// Connectors for consecutive members of each group that share a channel.
///
/// Consecutive members on different channels produce nothing, even when
/// members further apart share a channel.
pub fn derive_connections(timeline: &Timeline) -> Vec<Connector> {
    group_instances(timeline)
        .iter()
        .filter(|group| group.members.len() > 1)
        .flat_map(|group| group.members.windows(2))
        .filter(|pair| pair[0].channel_id == pair[1].channel_id)
        .map(|pair| Connector {
            channel_id: pair[0].channel_id,
            color_index: pair[0].module.color_index(),
            span_start: pair[0].module.end(),
            span_end: pair[1].module.position(),
        })
        .collect()
}
