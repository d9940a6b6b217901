//! Re-identification scenarios: objects leaving and re-entering the view
//! must re-acquire their prior identity instead of registering anew.

mod helpers;

use std::time::{Duration, Instant};

use helpers::fixtures::{detection_from_features, test_registry, FRAME};
use visual_reid_rs::{Rgb, TrackerId, TrackingPipeline};

/// The canonical scenario: register an object, lose it long enough for its
/// tracker to be evicted, then see it again slightly moved and resized. The
/// pipeline must bind the new detection to the same memory.
#[test]
fn test_reappearing_object_rebinds_to_same_memory() {
    let t0 = Instant::now();
    let mut pipeline = TrackingPipeline::new(test_registry());

    let original = detection_from_features(0.5, 0.5, 1.0, 0.05).with_real_distance(5.0);
    let first = pipeline.process_frame(&[original], FRAME, t0);
    let memory_id = first.instances[0].memory_id;
    assert_eq!(first.instances[0].match_count, 1);

    // Three empty frames; the tracker is gone once 500 ms have elapsed.
    for millis in [200, 400, 600] {
        pipeline.process_frame(&[], FRAME, t0 + Duration::from_millis(millis));
    }
    assert_eq!(pipeline.active_count(), 0);
    assert_eq!(pipeline.registered_count(), 1);

    // Reappearance nearby, slightly larger, slightly farther.
    let reappeared = detection_from_features(0.52, 0.51, 1.02, 0.052).with_real_distance(5.1);
    let output = pipeline.process_frame(&[reappeared], FRAME, t0 + Duration::from_millis(700));

    assert_eq!(output.len(), 1);
    assert_eq!(
        output.instances[0].memory_id, memory_id,
        "must re-identify, not register a second memory"
    );
    assert_eq!(output.instances[0].match_count, 2);
    assert_eq!(pipeline.registered_count(), 1);

    // The re-identified instance rides a fresh short-term tracker.
    assert_eq!(output.instances[0].tracker_id, TrackerId(2));
    assert_eq!(
        output.instances[0].registry_entry.name,
        first.instances[0].registry_entry.name
    );
}

/// An object reappearing somewhere completely different, with a different
/// shape and size, registers a new memory instead of stealing the old one.
#[test]
fn test_dissimilar_reappearance_registers_new_memory() {
    let t0 = Instant::now();
    let mut pipeline = TrackingPipeline::new(test_registry());

    pipeline.process_frame(
        &[detection_from_features(0.1, 0.1, 1.0, 0.0025)],
        FRAME,
        t0,
    );
    pipeline.process_frame(&[], FRAME, t0 + Duration::from_millis(600));
    assert_eq!(pipeline.active_count(), 0);

    // Opposite corner, tall instead of square, much larger.
    let stranger = detection_from_features(0.9, 0.9, 0.3, 0.09);
    let output = pipeline.process_frame(&[stranger], FRAME, t0 + Duration::from_millis(700));

    assert_eq!(pipeline.registered_count(), 2);
    assert_eq!(output.instances[0].match_count, 1);
    assert_eq!(output.instances[0].registry_entry.name, "Beta Plaza");
}

/// Depth and color features survive the gap and still allow the rebind;
/// the memory's signature keeps widening across the re-association.
#[test]
fn test_reid_with_full_features_widens_signature() {
    let t0 = Instant::now();
    let mut pipeline = TrackingPipeline::new(test_registry());

    let original = detection_from_features(0.5, 0.5, 1.0, 0.05)
        .with_real_distance(5.0)
        .with_avg_color(Rgb::new(180.0, 60.0, 40.0));
    let first = pipeline.process_frame(&[original], FRAME, t0);
    let memory_id = first.instances[0].memory_id;

    pipeline.process_frame(&[], FRAME, t0 + Duration::from_millis(600));

    let reappeared = detection_from_features(0.51, 0.5, 1.1, 0.06)
        .with_real_distance(6.0)
        .with_avg_color(Rgb::new(175.0, 65.0, 45.0));
    let output = pipeline.process_frame(&[reappeared], FRAME, t0 + Duration::from_millis(700));
    assert_eq!(output.instances[0].memory_id, memory_id);

    let entry = pipeline.memory().get(memory_id).unwrap();
    let distance = entry.signature.real_distance.expect("distance recorded");
    assert_eq!(distance.min, 5.0);
    assert_eq!(distance.max, 6.0);
    assert!(entry.signature.aspect_ratio.max >= 1.1);
    assert!(entry.signature.size.max >= 0.06 - 1e-6);
}

/// While a memory is bound to a live tracker it is off the table for
/// stage-2 matching, so a look-alike elsewhere gets its own identity.
#[test]
fn test_live_memory_not_stolen_by_lookalike() {
    let t0 = Instant::now();
    let mut pipeline = TrackingPipeline::new(test_registry());

    let first = pipeline.process_frame(
        &[detection_from_features(0.5, 0.5, 1.0, 0.05)],
        FRAME,
        t0,
    );
    let memory_id = first.instances[0].memory_id;

    // Same shape and size right next to the original, no box overlap.
    let lookalike = detection_from_features(0.3, 0.5, 1.0, 0.05);
    let output = pipeline.process_frame(
        &[detection_from_features(0.5, 0.5, 1.0, 0.05), lookalike],
        FRAME,
        t0 + Duration::from_millis(33),
    );

    assert_eq!(output.len(), 2);
    assert_eq!(pipeline.registered_count(), 2);
    let lookalike_instance = output
        .instances
        .iter()
        .find(|i| i.tracker_id == TrackerId(2))
        .unwrap();
    assert_ne!(lookalike_instance.memory_id, memory_id);
}
