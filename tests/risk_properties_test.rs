// tests/risk_properties_test.rs
use energy_risk::mc::payoffs::{OptionType, PayoffEvaluator};
use energy_risk::risk::{percentile, RiskReducer};
use proptest::prelude::*;

fn payoff_vec() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..200.0, 1..400)
}

proptest! {
    #[test]
    fn payoffs_are_non_negative(
        prices in prop::collection::vec(0.0f64..500.0, 0..200),
        strike in 0.01f64..300.0,
    ) {
        for option_type in [OptionType::Call, OptionType::Put] {
            let payoffs = PayoffEvaluator::new(strike, option_type).evaluate(&prices);
            prop_assert_eq!(payoffs.len(), prices.len());
            prop_assert!(payoffs.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn cvar_is_at_least_var(
        payoffs in payoff_vec(),
        strike in 0.01f64..200.0,
        confidence in 0.5f64..0.999,
    ) {
        let m = RiskReducer::new(strike).reduce(&payoffs, confidence).unwrap();
        prop_assert!(m.var >= 0.0);
        prop_assert!(m.cvar >= m.var);
        prop_assert!(m.cvar <= strike);
    }

    #[test]
    fn var_is_ordered_across_confidence_levels(
        payoffs in payoff_vec(),
        strike in 0.01f64..200.0,
        low in 0.5f64..0.9,
        bump in 0.0f64..0.09,
    ) {
        let reducer = RiskReducer::new(strike);
        let v_low = reducer.value_at_risk(&payoffs, low).unwrap();
        let v_high = reducer.value_at_risk(&payoffs, low + bump).unwrap();
        // the percentile moves down the loss series as confidence rises
        prop_assert!(v_high <= v_low);
    }

    #[test]
    fn reduction_is_deterministic(payoffs in payoff_vec(), confidence in 0.01f64..0.99) {
        let reducer = RiskReducer::new(100.0);
        prop_assert_eq!(
            reducer.reduce(&payoffs, confidence).unwrap(),
            reducer.reduce(&payoffs, confidence).unwrap()
        );
    }

    #[test]
    fn percentile_is_bracketed(values in payoff_vec(), q in 0.0f64..100.0) {
        let mut values = values;
        values.sort_by(|a, b| a.total_cmp(b));
        let p = percentile(&values, q).unwrap();
        prop_assert!(p >= values[0] && p <= values[values.len() - 1]);
    }

    #[test]
    fn reduction_ignores_ordering(payoffs in payoff_vec()) {
        let reducer = RiskReducer::new(100.0);
        let mut reversed = payoffs.clone();
        reversed.reverse();
        prop_assert_eq!(
            reducer.reduce(&payoffs, 0.95).unwrap(),
            reducer.reduce(&reversed, 0.95).unwrap()
        );
    }
}
