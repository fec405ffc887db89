use approx::assert_relative_eq;
use twine_core::Model;
use twine_sizing::models::aircraft::hybrid_vtol::{
    ConstraintKind, DesignPoint, SearchError, SizingConfig,
};
use uom::si::{length::meter, mass::kilogram};

#[test]
fn reference_quadplane_from_toml() {
    let sizing = SizingConfig::from_toml_str(
        r#"
        [mission]
        range_km = 60.0
        hover_time_s = 120.0

        [search]
        parallel = false
        "#,
    )
    .unwrap()
    .build()
    .unwrap();

    let result = sizing.size().unwrap();
    let mass = result.take_off_mass.get::<kilogram>();
    assert!((10.0..12.5).contains(&mass), "mass = {mass}");

    let stall = sizing.aerodynamics().stall_wing_loading();
    assert!(result.design.wing_loading() <= stall * (1.0 + 1e-9));
    assert!(result.constraints.iter().all(|c| c.is_satisfied(1e-9)));
    assert!(result.wingspan.get::<meter>() <= 4.0);

    let closure = sizing.mass_closure().call(&result.design).unwrap();
    assert_relative_eq!(closure.take_off_mass.get::<kilogram>(), mass, max_relative = 1e-9);
}

#[test]
fn heavier_payload_sizes_a_heavier_aircraft() {
    let size_with = |payload_kg: f64| {
        let mut config = SizingConfig::default();
        config.mass.payload_kg = payload_kg;
        config.search.refine = false;
        config
            .build()
            .unwrap()
            .size()
            .unwrap()
            .take_off_mass
            .get::<kilogram>()
    };

    assert!(size_with(3.0) > size_with(2.0));
}

#[test]
fn points_above_stall_limit_are_rejected() {
    let sizing = SizingConfig::default().build().unwrap();
    let evaluation = sizing.evaluate(DesignPoint::new(217.0, 10.0).unwrap());

    assert!(!evaluation.is_feasible(0.0));
    assert_eq!(evaluation.limiting().kind, ConstraintKind::Stall);
}

#[test]
fn impossible_span_limit_reports_the_binding_constraint() {
    let mut config = SizingConfig::default();
    config.limits.max_wingspan_m = 0.5;

    match config.build().unwrap().size() {
        Err(SearchError::InfeasibleDesignSpace { constraint, margin }) => {
            assert_eq!(constraint, ConstraintKind::Wingspan);
            assert!(margin < 0.0);
        }
        other => panic!("expected an infeasible design space, got {other:?}"),
    }
}
