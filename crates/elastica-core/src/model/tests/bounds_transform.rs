use super::support::{bounded_variable, two_variable_model};
use super::*;
use crate::slack::BoundSide;

#[test]
fn test_bounds_become_named_constraints() {
    let (mut model, x, y) = two_variable_model();
    let summary = model.bounds_as_constraints().unwrap();

    assert_eq!(summary.block.as_deref(), Some("_variable_bounds"));
    assert_eq!(summary.constraints.len(), 4);

    let lb_x = model
        .get_constraint_by_name("_variable_bounds.lb_for_x")
        .unwrap();
    let stored = model.get_constraint(lb_x).unwrap();
    assert_eq!(stored.bounds, Bounds::at_least(0.0));
    assert_eq!(stored.body, Expr::var(x));

    let ub_y = model
        .get_constraint_by_name("_variable_bounds.ub_for_y")
        .unwrap();
    assert_eq!(model.get_constraint(ub_y).unwrap().bounds, Bounds::at_most(10.0));
    assert_eq!(
        model.bound_origin(ub_y).map(|origin| (origin.variable, origin.side)),
        Some((y, BoundSide::Upper))
    );

    for id in [x, y] {
        let var = model.get_variable(id).unwrap();
        assert!(var.bounds.is_free());
        assert_eq!(var.domain, Domain::Reals);
    }
}

#[test]
fn test_domain_bounds_are_converted() {
    let mut model = Model::new();
    let x = model
        .add_variable("x", Variable::in_domain(Domain::NonNegativeReals))
        .unwrap();
    let summary = model.bounds_as_constraints().unwrap();

    assert_eq!(summary.constraints.len(), 1);
    let origin = model.bound_origin(summary.constraints[0]).unwrap();
    assert_eq!(origin.variable, x);
    assert_eq!(origin.side, BoundSide::Lower);
    assert!(model.get_variable_by_name("x").is_some());
    assert_eq!(model.get_variable(x).unwrap().domain, Domain::Reals);
}

#[test]
fn test_fixed_variables_are_skipped() {
    let mut model = Model::new();
    let x = model.add_variable("x", bounded_variable(0.0, 5.0)).unwrap();
    model.fix_variable(x, 2.0).unwrap();

    let summary = model.bounds_as_constraints().unwrap();
    assert!(summary.is_empty());
    assert_eq!(model.get_variable(x).unwrap().bounds, Bounds::new(0.0, 5.0));
}

#[test]
fn test_free_model_is_unchanged() {
    let mut model = Model::new();
    let x = model.add_variable("x", Variable::default()).unwrap();
    model.add_constraint("c", Expr::var(x).le_scalar(1.0)).unwrap();

    let summary = model.bounds_as_constraints().unwrap();
    assert_eq!(summary.block, None);
    assert_eq!(model.num_constraints(), 1);
    assert!(!model.has_block("_variable_bounds"));
}

#[test]
fn test_inverted_bounds_are_converted_as_given() {
    let mut model = Model::new();
    model.add_variable("x", bounded_variable(5.0, 2.0)).unwrap();
    model.bounds_as_constraints().unwrap();

    let lb = model.get_constraint_by_name("_variable_bounds.lb_for_x").unwrap();
    let ub = model.get_constraint_by_name("_variable_bounds.ub_for_x").unwrap();
    assert_eq!(model.get_constraint(lb).unwrap().bounds.lower, 5.0);
    assert_eq!(model.get_constraint(ub).unwrap().bounds.upper, 2.0);
}

#[test]
fn test_block_name_avoids_collisions() {
    let mut model = Model::new();
    model.add_block("_variable_bounds").unwrap();
    model.add_variable("x", bounded_variable(0.0, 1.0)).unwrap();

    let summary = model.bounds_as_constraints().unwrap();
    assert_eq!(summary.block.as_deref(), Some("_variable_bounds_1"));
    assert!(
        model
            .get_constraint_by_name("_variable_bounds_1.ub_for_x")
            .is_some()
    );
}
