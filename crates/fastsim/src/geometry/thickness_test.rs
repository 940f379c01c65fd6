use crate::error::FastSimError;
use crate::geometry::ThicknessProfile;

#[test]
fn test_bins_are_half_open() {
    let profile = ThicknessProfile::new(vec![0.0, 10.0, 20.0], vec![0.01, 0.02]).unwrap();

    assert_eq!(profile.at(0.0), 0.01);
    assert_eq!(profile.at(9.999), 0.01);
    assert_eq!(profile.at(10.0), 0.02);
    assert_eq!(profile.at(20.0), 0.0);
    assert_eq!(profile.at(-1.0), 0.0);
}

#[test]
fn test_material_extent_skips_empty_bins() {
    let profile =
        ThicknessProfile::new(vec![0.0, 5.0, 30.0, 60.0, 80.0], vec![0.0, 0.03, 0.05, 0.0])
            .unwrap();

    assert_eq!(profile.material_min(), 5.0);
    assert_eq!(profile.material_max(), 60.0);
    assert!(profile.has_material());
}

#[test]
fn test_all_zero_profile_has_no_material() {
    let profile = ThicknessProfile::new(vec![0.0, 10.0], vec![0.0]).unwrap();

    assert!(!profile.has_material());
    assert_eq!(profile.material_max(), 0.0);
}

#[test]
fn test_empty_tables() {
    let profile = ThicknessProfile::new(Vec::new(), Vec::new()).unwrap();

    assert_eq!(profile, ThicknessProfile::empty());
    assert_eq!(profile.at(3.0), 0.0);
    assert!(profile.limits().is_empty());
}

#[test]
fn test_uniform_profile() {
    let profile = ThicknessProfile::uniform(120.0, 0.04);

    assert_eq!(profile.at(119.0), 0.04);
    assert_eq!(profile.material_min(), 0.0);
    assert_eq!(profile.material_max(), 120.0);
    assert_eq!(profile.values(), &[0.04]);
}

#[test]
fn test_mismatched_table_sizes() {
    let result = ThicknessProfile::new(vec![0.0, 10.0, 20.0], vec![0.01]);

    assert!(matches!(
        result,
        Err(FastSimError::ThicknessTableSize {
            limits: 3,
            thickness: 1
        })
    ));
}

#[test]
fn test_single_limit_is_rejected() {
    let result = ThicknessProfile::new(vec![0.0], Vec::new());

    assert!(matches!(result, Err(FastSimError::ThicknessTableSize { .. })));
}

#[test]
fn test_decreasing_limits_are_rejected() {
    let result = ThicknessProfile::new(vec![0.0, 20.0, 10.0], vec![0.01, 0.02]);

    assert!(matches!(
        result,
        Err(FastSimError::ThicknessLimitsOrder { previous, next }) if previous == 20.0 && next == 10.0
    ));
}
