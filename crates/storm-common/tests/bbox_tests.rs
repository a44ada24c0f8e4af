//! Tests for BoundingBox construction and containment.

use storm_common::BoundingBox;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_lon, -180.0);
    assert_eq!(bbox.min_lat, -90.0);
    assert_eq!(bbox.max_lon, 180.0);
    assert_eq!(bbox.max_lat, 90.0);
}

#[test]
fn test_bbox_around_point_zero_padding() {
    let bbox = BoundingBox::around_point(20.0, -60.0, 0.0);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
    assert!(bbox.is_valid());
}

#[test]
fn test_bbox_keeps_source_longitude_convention() {
    // 0..360 sources stay 0..360
    let bbox = BoundingBox::around_point(15.0, 359.0, 2.0);
    assert_eq!(bbox.min_lon, 357.0);
    assert_eq!(bbox.max_lon, 361.0);
}

// ============================================================================
// Enclosing / expansion tests
// ============================================================================

#[test]
fn test_bbox_enclosing_track() {
    let points = vec![(20.0, -60.0), (21.0, -61.0), (22.5, -63.5)];
    let bbox = BoundingBox::enclosing(points).unwrap();
    assert_eq!(bbox.min_lon, -63.5);
    assert_eq!(bbox.max_lon, -60.0);
    assert_eq!(bbox.min_lat, 20.0);
    assert_eq!(bbox.max_lat, 22.5);
}

#[test]
fn test_bbox_enclosing_single_point() {
    let bbox = BoundingBox::enclosing(vec![(10.0, 10.0)]).unwrap();
    assert_eq!(bbox, BoundingBox::new(10.0, 10.0, 10.0, 10.0));
}

#[test]
fn test_bbox_expanded() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).expanded(5.0);
    assert_eq!(bbox, BoundingBox::new(-5.0, -5.0, 15.0, 15.0));
}

// ============================================================================
// Containment and validity
// ============================================================================

#[test]
fn test_bbox_contains_edges() {
    let bbox = BoundingBox::around_point(20.0, -60.0, 2.0);
    assert!(bbox.contains(20.0, -60.0));
    assert!(bbox.contains(18.0, -62.0));
    assert!(bbox.contains(22.0, -58.0));
    assert!(!bbox.contains(22.01, -58.0));
    assert!(!bbox.contains(20.0, -57.99));
}

#[test]
fn test_bbox_invalid_when_inverted() {
    assert!(!BoundingBox::new(10.0, 10.0, 5.0, 5.0).is_valid());
}

#[test]
fn test_bbox_invalid_when_nan() {
    assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
}
