mod tests {
    use approx::assert_relative_eq;

    use crate::magnetic_field::MagneticField;

    #[test]
    fn test_field_conversions() {
        let field = MagneticField::from_tesla(3.8);
        assert_relative_eq!(field.to_kilogauss(), 38.0, max_relative = 1e-12);
        assert_relative_eq!(field.to_gauss(), 38_000.0, max_relative = 1e-12);

        assert_relative_eq!(MagneticField::from_kilogauss(40.0).to_tesla(), 4.0, max_relative = 1e-12);
        assert_relative_eq!(MagneticField::from_gauss(5.0).to_tesla(), 5e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_field_sign_and_zero() {
        let field = MagneticField::from_tesla(2.0);
        assert_relative_eq!((-field).to_tesla(), -2.0, max_relative = 1e-12);
        assert_relative_eq!((field * 0.5).to_tesla(), 1.0, max_relative = 1e-12);
        assert!(MagneticField::zero().is_zero());
        assert!(!field.is_zero());
    }

    #[test]
    fn test_field_deserializes_from_plain_number() {
        let field: MagneticField = serde_json::from_str("3.8").unwrap();
        assert_relative_eq!(field.to_tesla(), 3.8, max_relative = 1e-12);
    }
}
