//! Property tests for the line searches on convex quadratics.

use nalgebra::DVector;
use proptest::prelude::*;
use quasinewton_core::prelude::*;
use quasinewton_optim::{
    AnyLineSearch, LineSearch, LineSearchKind, LineSearchParams, WolfeConditions, WolfeKind,
};

fn quadratic(
    diag: Vec<f64>,
) -> FunctionCost<impl Fn(&DVector<f64>) -> f64, impl Fn(&DVector<f64>) -> DVector<f64>> {
    let d = DVector::from_vec(diag);
    let d2 = d.clone();
    FunctionCost::new(
        move |x: &DVector<f64>| 0.5 * x.component_mul(x).dot(&d),
        move |x: &DVector<f64>| x.component_mul(&d2),
    )
}

const KINDS: [LineSearchKind; 3] = [
    LineSearchKind::MoreThuente,
    LineSearchKind::Bisection,
    LineSearchKind::Backtracking,
];

proptest! {
    #[test]
    fn prop_accepted_step_meets_conditions(
        diag in prop::collection::vec(0.1f64..100.0, 2..8),
        coords in prop::collection::vec(-10.0f64..10.0, 8),
        kind_index in 0usize..3,
    ) {
        let n = diag.len();
        let x = DVector::from_iterator(n, coords.into_iter().take(n));
        prop_assume!(x.norm() > 1e-3);

        let cost = quadratic(diag);
        let (value, gradient) = cost.cost_and_gradient(&x).unwrap();
        let direction = -&gradient;
        let slope = gradient.dot(&direction);
        let params = LineSearchParams::default();
        let kind = KINDS[kind_index];

        let mut search = AnyLineSearch::from(kind);
        let result = search
            .search_with_deriv(&cost, &x, value, &direction, slope, 1.0, &params)
            .unwrap();

        prop_assert!(result.new_value < value);
        prop_assert!(result.step_size > 0.0);
        let wolfe = WolfeConditions::new(WolfeKind::Strong, &params, value, slope);
        prop_assert!(wolfe.sufficient_decrease(result.step_size, result.new_value));

        if kind != LineSearchKind::Backtracking {
            prop_assert!(result.success, "{:?} did not meet the Wolfe conditions", kind);
            let new_slope = result.new_gradient.dot(&direction);
            prop_assert!(wolfe.is_satisfied(result.step_size, result.new_value, new_slope));
        }
    }

    #[test]
    fn prop_new_point_is_on_the_line(
        diag in prop::collection::vec(0.5f64..5.0, 3),
        coords in prop::collection::vec(-3.0f64..3.0, 3),
    ) {
        let x = DVector::from_vec(coords);
        prop_assume!(x.norm() > 1e-3);

        let cost = quadratic(diag);
        let (value, gradient) = cost.cost_and_gradient(&x).unwrap();
        let direction = -&gradient;
        let slope = gradient.dot(&direction);

        let result = AnyLineSearch::from(LineSearchKind::MoreThuente)
            .search_with_deriv(&cost, &x, value, &direction, slope, 1.0, &LineSearchParams::default())
            .unwrap();

        let expected = &x + &direction * result.step_size;
        prop_assert!((result.new_point - expected).norm() <= 1e-12 * (1.0 + x.norm()));
    }
}
