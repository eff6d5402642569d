//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported and
//! accessible via absolute paths.

/// Test that the value types are reachable from both module and re-export paths.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{DomainError, PricingError};
    use pricer_core::types::params::ParameterSet;
    use pricer_core::types::quote::PriceQuote;

    let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
    let quote = PriceQuote::new(1.0, 2.0);
    let err: PricingError = DomainError::NonFinite {
        parameter: "rate",
        value: f64::NAN,
    }
    .into();

    let from_percent =
        pricer_core::types::ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 20.0).unwrap();
    assert_eq!(params, from_percent);
    assert_eq!(quote, pricer_core::types::PriceQuote::new(1.0, 2.0));
    assert!(err.is_domain());
}

/// Test that the rounding helpers are accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use pricer_core::math::rounding::{round_to_cents, RoundingMode};

    assert_eq!(round_to_cents(1.005_1, RoundingMode::HalfEven), 1.01);
    assert_eq!(
        pricer_core::math::round_to_cents(2.5, pricer_core::math::RoundingMode::None),
        2.5
    );
}

/// Test that trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::priceable::OptionPricer;
    use pricer_core::types::{ParameterSet, PriceQuote, PricingError};

    struct FixedPricer;

    impl OptionPricer for FixedPricer {
        fn price(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
            params.validate()?;
            Ok(PriceQuote::new(1.0, 1.0))
        }
    }

    let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
    let pricer: &dyn pricer_core::traits::OptionPricer = &FixedPricer;
    assert_eq!(pricer.price(&params).unwrap().call(), 1.0);
    assert_eq!(pricer.method_name(), "unnamed");
}
