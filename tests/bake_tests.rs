use momentum::bake::bakerecord::{
    BakeRecord,
    BakeRecordMap,
    BakeRecordStore
};
use momentum::bake::bakereport::Severity;
use momentum::bake::channel::{
    Channel,
    ChannelKey
};
use momentum::bake::overshootbaker::OvershootBaker;
use momentum::configuration::Configuration;
use momentum::math::curve::curve::KeyframeCurve;
use momentum::math::curve::fcurve::FCurve;
use momentum::math::curve::keyframe::{
    Interpolation,
    Keyframe
};
use momentum::momentumerror::MomentumError;

/// 0..=10 每個 frame 一個 keyframe，斜率 2；anchor 為 frame 10（可選）。
fn ramp_channel(owner: &str, index: usize, select_anchor: bool) -> Channel {
    let keyframes = (0..=10)
        .map(|i| {
            Keyframe::new(i as f64, 2.0 * i as f64)
                .with_interpolation(Interpolation::Linear)
                .with_selected(select_anchor && i == 10)
        })
        .collect();
    Channel::new(ChannelKey::new(owner, "location", index), FCurve::from_keyframes(keyframes))
}

fn configuration_with(f: impl FnOnce(&mut Configuration)) -> Configuration {
    let mut configuration = Configuration::new();
    f(&mut configuration);
    configuration
}

fn positions(channel: &Channel) -> Vec<f64> {
    channel.curve().keyframes().iter().map(|kf| kf.position()).collect()
}

#[test]
fn no_channels_is_an_input_error() {
    let baker = OvershootBaker::new(&Configuration::new());
    let result = baker.bake(&mut [], &mut BakeRecordMap::new());
    assert!(matches!(result, Err(MomentumError::NoCurves)));
}

#[test]
fn multiple_anchors_abort_before_any_mutation() {
    let mut channels = vec![ramp_channel("Cube", 0, true), ramp_channel("Cube", 1, true)];
    let handle = channels[1].curve().keyframes()[5].handle();
    channels[1].curve_mut().set_selected(handle, true);
    let mut records = BakeRecordMap::new();

    let result = OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut records);

    match result {
        Err(MomentumError::MultipleAnchors { channel, count }) => {
            assert_eq!(channel, "Cube.location[1]");
            assert_eq!(count, 2);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(channels[0].curve().len(), 11);
    assert_eq!(channels[1].curve().len(), 11);
    assert!(records.is_empty());
}

#[test]
fn nothing_selected_is_an_aggregate_error() {
    let mut channels = vec![ramp_channel("Cube", 0, false), ramp_channel("Cube", 1, false)];
    let result = OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut BakeRecordMap::new());
    assert!(matches!(result, Err(MomentumError::NothingProcessed)));
    assert_eq!(channels[0].curve().len(), 11);
}

#[test]
fn channels_without_anchor_are_skipped() {
    let mut channels = vec![ramp_channel("Cube", 0, false), ramp_channel("Cube", 1, true)];
    let mut records = BakeRecordMap::new();
    let report = OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut records).unwrap();

    assert_eq!(report.processed(), 1);
    assert_eq!(report.outcomes()[0].key(), channels[1].key());
    assert_eq!(report.outcomes()[0].velocity(), 2.0);
    assert_eq!(channels[0].curve().len(), 11);
    assert!(channels[1].curve().len() > 11);

    let info: Vec<_> = report.messages().iter().filter(|m| m.severity() == Severity::Info).collect();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].text(), "Processed 1 curves");
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn bake_records_anchor_and_duration() {
    let mut channels = vec![ramp_channel("Cube", 2, true)];
    let mut records = BakeRecordMap::new();
    let report = OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut records).unwrap();

    let trace = report.outcomes()[0].trace();
    let record = records.bake_record(channels[0].key()).unwrap();
    assert_eq!(record.anchor_position(), 10.0);
    assert_eq!(record.duration(), trace.len() as f64);
    assert_eq!(channels[0].curve().len(), 11 + trace.len());
}

#[test]
fn anchor_stays_selected_and_new_keyframes_do_not() {
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    OvershootBaker::new(&Configuration::new())
        .bake(&mut channels, &mut BakeRecordMap::new())
        .unwrap();
    let selected = channels[0].curve().selected_keyframes();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].position(), 10.0);
}

#[test]
fn rebake_with_same_parameters_is_idempotent() {
    let baker = OvershootBaker::new(&Configuration::new());
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    let mut records = BakeRecordMap::new();

    baker.bake(&mut channels, &mut records).unwrap();
    let first_positions = positions(&channels[0]);
    let first_values: Vec<f64> = channels[0].curve().keyframes().iter().map(|kf| kf.value()).collect();

    let report = baker.bake(&mut channels, &mut records).unwrap();
    assert_eq!(report.outcomes()[0].removed_stale(), first_positions.len() - 11);
    assert_eq!(positions(&channels[0]), first_positions);
    let second_values: Vec<f64> = channels[0].curve().keyframes().iter().map(|kf| kf.value()).collect();
    assert_eq!(second_values, first_values);
    assert_eq!(records.len(), 1);
}

#[test]
fn rebake_with_shorter_decay_replaces_the_old_tail() {
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    let mut records = BakeRecordMap::new();

    let soft = configuration_with(|c| c.overshoot.decay = 0.4);
    let first = OvershootBaker::new(&soft).bake(&mut channels, &mut records).unwrap();
    let long = first.outcomes()[0].trace().len();

    let stiff = configuration_with(|c| c.overshoot.decay = 1.0);
    let second = OvershootBaker::new(&stiff).bake(&mut channels, &mut records).unwrap();
    let short = second.outcomes()[0].trace().len();

    assert!(short < long);
    assert_eq!(channels[0].curve().len(), 11 + short);
    let last = positions(&channels[0]).last().copied();
    assert_eq!(last, Some(10.0 + short as f64));
    assert_eq!(records.bake_record(channels[0].key()).map(|r| r.duration()), Some(short as f64));
}

#[test]
fn stale_range_never_removes_the_current_anchor() {
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    let mut records = BakeRecordMap::new();
    // 假裝上一次從 frame 8 烘焙了 4 個 frame，範圍 (8, 12] 包含目前的 anchor
    records.set_bake_record(channels[0].key(), BakeRecord::new(8.0, 4.0));

    let report = OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut records).unwrap();

    assert_eq!(report.outcomes()[0].removed_stale(), 1);
    let kept: Vec<f64> = positions(&channels[0]).into_iter().filter(|&x| x <= 10.0).collect();
    assert_eq!(kept, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
}

#[test]
fn conflict_without_overwrite_records_the_partial_bake() {
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    channels[0].curve_mut().insert_keyframe(13.0, 0.0);
    let configuration = configuration_with(|c| c.overshoot.overwrite_keyframes = false);
    let mut records = BakeRecordMap::new();

    let report = OvershootBaker::new(&configuration).bake(&mut channels, &mut records).unwrap();

    assert_eq!(report.outcomes()[0].trace().len(), 2);
    assert_eq!(report.warnings().count(), 0);
    assert_eq!(records.bake_record(channels[0].key()).map(|r| r.duration()), Some(2.0));
    assert_eq!(positions(&channels[0])[11..], [11.0, 12.0, 13.0]);
}

#[test]
fn iteration_cap_is_reported_as_warning() {
    let mut channels = vec![ramp_channel("Cube", 0, true)];
    let configuration = configuration_with(|c| c.overshoot.decay = 0.0);
    let report = OvershootBaker::new(&configuration)
        .bake(&mut channels, &mut BakeRecordMap::new())
        .unwrap();

    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].text().contains("Cube.location[0]"));
    assert_eq!(report.processed(), 1);
    assert_eq!(report.outcomes()[0].trace().len(), 500);
}

#[test]
fn records_are_kept_per_channel() {
    let mut channels = vec![ramp_channel("Cube", 0, true), ramp_channel("Sphere", 0, true)];
    let mut records = BakeRecordMap::new();
    OvershootBaker::new(&Configuration::new()).bake(&mut channels, &mut records).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.bake_record(&ChannelKey::new("Sphere", "location", 0)).is_some());
    assert!(records.bake_record(&ChannelKey::new("Sphere", "location", 1)).is_none());
}

/// anchor 在 -0.5，前段每個 frame 一個 keyframe，斜率 2。
fn fractional_channel() -> Channel {
    let keyframes = (0..=10)
        .map(|i| {
            let position = i as f64 - 10.5;
            Keyframe::new(position, 2.0 * position)
                .with_interpolation(Interpolation::Linear)
                .with_selected(i == 10)
        })
        .collect();
    Channel::new(ChannelKey::new("Cube", "location", 0), FCurve::from_keyframes(keyframes))
}

#[test]
fn rebake_from_a_fractional_negative_anchor_keeps_the_anchor() {
    let baker = OvershootBaker::new(&Configuration::new());
    let mut channels = vec![fractional_channel()];
    let mut records = BakeRecordMap::new();

    let first = baker.bake(&mut channels, &mut records).unwrap();
    let emitted = first.outcomes()[0].trace().len();
    assert!(emitted > 0);
    assert_eq!(first.outcomes()[0].velocity(), 2.0);
    assert_eq!(channels[0].curve().len(), 11 + emitted);
    let first_positions = positions(&channels[0]);
    assert_eq!(first_positions[10..12], [-0.5, 0.5]);

    let second = baker.bake(&mut channels, &mut records).unwrap();
    assert_eq!(second.outcomes()[0].removed_stale(), emitted);
    assert_eq!(second.outcomes()[0].trace().len(), emitted);
    assert_eq!(positions(&channels[0]), first_positions);

    let selected = channels[0].curve().selected_keyframes();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].position(), -0.5);
    assert_eq!(records.bake_record(channels[0].key()).map(|r| r.anchor_position()), Some(-0.5));
}

#[test]
fn baker_is_built_from_the_configuration() {
    let configuration = configuration_with(|c| {
        c.overshoot.timing = 9;
        c.estimator.num_samples = 5;
    });
    let baker = OvershootBaker::new(&configuration);
    assert_eq!(baker.estimator().settings(), &configuration.estimator);
    assert_eq!(baker.simulator().settings(), &configuration.overshoot);
}
