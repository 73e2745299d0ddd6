use crate::model::Model;
use crate::types::{Bounds, Variable};
use elastica_expr::Expr;
use elastica_expr::ids::VariableId;

pub(super) fn bounded_variable(lower: f64, upper: f64) -> Variable {
    Variable::continuous(Bounds::new(lower, upper))
}

/// `x` and `y` in `[0, 10]` with `x + y == 10` and `x <= 3`, minimizing `x`.
pub(super) fn two_variable_model() -> (Model, VariableId, VariableId) {
    let mut model = Model::named("pair");
    let x = model.add_variable("x", bounded_variable(0.0, 10.0)).unwrap();
    let y = model.add_variable("y", bounded_variable(0.0, 10.0)).unwrap();
    model
        .add_constraint("sum", (Expr::var(x) + Expr::var(y)).eq_scalar(10.0))
        .unwrap();
    model
        .add_constraint("cap_x", Expr::var(x).le_scalar(3.0))
        .unwrap();
    model.minimize(Expr::var(x)).unwrap();
    (model, x, y)
}
