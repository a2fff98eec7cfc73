use std::sync::Arc;

use assert_approx_eq::assert_approx_eq;
use scanbot::{
    DummyLaserScan2D, DummyRangeSensor, LaserScan2D, RangeSensor, Reading, Scan,
};

fn sweep(timestamp: f64) -> Scan {
    Scan::new(
        (0..4)
            .map(|i| Reading {
                angle: i as f64 * 90.0,
                distance: 1.0,
                intensity: 180,
                timestamp,
            })
            .collect(),
    )
}

#[test]
fn test_laser_scan_through_arc() {
    let dummy = Arc::new(DummyLaserScan2D::new());
    let sensor: Arc<dyn LaserScan2D> = dummy.clone();
    assert!(sensor.current_scan().unwrap().is_empty());

    dummy.set_scan(sweep(3.0));
    let scan = sensor.current_scan().unwrap();
    assert_eq!(scan.len(), 4);
    assert_eq!(scan.detected_count(), 4);
    assert_approx_eq!(scan[3].angle, 270.0);
}

#[test]
fn test_range_sensor_through_box() {
    let sensor: Box<dyn RangeSensor> = Box::new(DummyRangeSensor::new(0.3));
    let reading = sensor.current_distance().unwrap();
    assert_approx_eq!(reading.distance, 0.3);
    assert!(reading.timestamp > 0.0);
}

#[test]
fn test_error_display() {
    let err = scanbot::Error::IllegalState {
        message: "LIDAR is not scanning".into(),
    };
    assert_eq!(
        err.to_string(),
        "scanbot: Illegal state : LIDAR is not scanning"
    );
}
