use vigie::shared::{Coordinate, Distance};

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.distance(&coord_b);
    assert!((d.as_kilometers() - 343.5).abs() < 2.0);
}

#[test]
fn distance_is_symmetric() {
    let points = [
        (45.7578, 4.8320),
        (48.85, 2.35),
        (-33.8688, 151.2093),
        (0.0, 0.0),
        (64.1466, -21.9426),
    ]
    .map(Coordinate::from);
    for a in points.iter() {
        for b in points.iter() {
            assert_eq!(a.distance(b), b.distance(a), "{a} / {b}");
        }
    }
}

#[test]
fn distance_to_self_is_zero() {
    for point in [(45.7578, 4.8320), (-90.0, 180.0), (12.5, -7.25)].map(Coordinate::from) {
        assert_eq!(point.distance(&point).as_meters(), 0.0);
    }
}

#[test]
fn one_degree_of_latitude() {
    let a = Coordinate::from((45.0, 4.0));
    let b = Coordinate::from((46.0, 4.0));
    let expected = 6_371_000.0 * 1f64.to_radians();
    assert!((a.distance(&b).as_meters() - expected).abs() < 1e-6);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}
