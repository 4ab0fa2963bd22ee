use pretty_assertions::assert_eq;
use trax::{Connector, InstanceId, Module, ModuleTemplate, Timeline, TimelineError};

fn spans(timeline: &Timeline, channel_id: usize) -> Vec<(usize, usize)> {
    timeline
        .channel(channel_id)
        .unwrap()
        .modules()
        .iter()
        .map(|m| (m.position(), m.end()))
        .collect()
}

#[test]
fn place_on_empty_channel_extends_rightmost() {
    let mut timeline = Timeline::with_channels(1);
    timeline
        .add_module(0, 2, &ModuleTemplate::new(3, 0, 0))
        .unwrap();

    assert_eq!(timeline.rightmost_position(), 5);
}

#[test]
fn overlapping_placement_fails_and_changes_nothing() {
    let mut timeline = Timeline::with_channels(1);
    timeline
        .add_module(0, 2, &ModuleTemplate::new(3, 0, 0))
        .unwrap();

    let err = timeline
        .add_module(0, 4, &ModuleTemplate::new(2, 0, 0))
        .unwrap_err();
    assert!(matches!(err, TimelineError::Collision { position: 4, .. }));
    assert_eq!(spans(&timeline, 0), vec![(2, 5)]);
}

#[test]
fn crop_respects_original_length() {
    let mut timeline = Timeline::with_channels(1);
    let id = timeline
        .add_module(0, 2, &ModuleTemplate::new(3, 0, 0))
        .unwrap()
        .id();

    timeline.crop_module(0, id, 1).unwrap();
    assert_eq!(spans(&timeline, 0), vec![(2, 3)]);

    assert_eq!(
        timeline.crop_module(0, id, 4),
        Err(TimelineError::InvalidCrop {
            new_length: 4,
            original_length: 3
        })
    );
    assert!(timeline.crop_module(0, id, 0).is_err());
    assert_eq!(spans(&timeline, 0), vec![(2, 3)]);

    let module = timeline.module(0, id).unwrap();
    assert_eq!(module.original_length(), 3);
    assert_eq!(module.position(), 2);
}

#[test]
fn shared_instance_yields_one_connector() {
    let mut timeline = Timeline::with_channels(2);
    let template = ModuleTemplate::new(2, 1, 0).with_instance(InstanceId::new());
    timeline.add_module(0, 0, &template).unwrap();
    timeline.add_module(0, 5, &template).unwrap();
    // Unrelated module on another channel
    timeline
        .add_module(1, 0, &ModuleTemplate::new(1, 0, 0))
        .unwrap();

    assert_eq!(
        timeline.connections(),
        vec![Connector {
            channel_id: 0,
            color_index: 1,
            span_start: 2,
            span_end: 5,
        }]
    );
}

#[test]
fn fill_empty_channel_tiles_visible_window() {
    let mut timeline = Timeline::with_channels(1);
    let plan = timeline.plan_fill(0, 4, 0..10, 3).unwrap();
    assert_eq!(plan.bounds, 0..10);
    assert_eq!(plan.positions, vec![0, 3, 6]);

    let placed = timeline
        .fill(0, 4, 0..10, &ModuleTemplate::new(3, 0, 0))
        .unwrap();
    assert_eq!(placed.len(), 3);
    assert_eq!(spans(&timeline, 0), vec![(0, 3), (3, 6), (6, 9)]);
}

#[test]
fn fill_stops_at_existing_modules() {
    let mut timeline = Timeline::with_channels(1);
    let solo = ModuleTemplate::new(1, 0, 0);
    timeline.add_module(0, 1, &solo).unwrap();
    timeline.add_module(0, 8, &solo).unwrap();

    timeline
        .fill(0, 5, 0..20, &ModuleTemplate::new(2, 0, 0))
        .unwrap();

    assert_eq!(
        spans(&timeline, 0),
        vec![(1, 2), (2, 4), (4, 6), (6, 8), (8, 9)]
    );
}

#[test]
fn fill_on_missing_channel_fails() {
    let mut timeline = Timeline::with_channels(1);
    assert_eq!(
        timeline
            .fill(3, 0, 0..10, &ModuleTemplate::new(1, 0, 0))
            .unwrap_err(),
        TimelineError::ChannelNotFound { channel_id: 3 }
    );
}

#[test]
fn channels_are_enumerated_in_insertion_order() {
    let mut timeline = Timeline::with_channels(0);
    assert_eq!(timeline.rightmost_position(), 0);

    for _ in 0..3 {
        timeline.add_channel();
    }
    let ids: Vec<usize> = timeline.channels().iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    timeline
        .add_module(2, 7, &ModuleTemplate::new(1, 0, 0))
        .unwrap();
    assert_eq!(timeline.module_at(2, 7).map(Module::end), Some(8));
    assert_eq!(timeline.rightmost_position(), 8);
}
