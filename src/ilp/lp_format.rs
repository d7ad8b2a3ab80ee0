#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! CPLEX-LP rendering of a [`Model`], so a model can be handed to an
//! external ILP solver or inspected by hand.

use crate::ilp::model::{LinearConstraint, Model};

/// Renders `model` as an LP file with a constant zero objective.
#[must_use]
pub fn to_lp(model: &Model) -> String {
    let mut out = String::new();
    out.push_str("\\ feasibility model\n");
    out.push_str("Minimize\n obj: 0\n");
    out.push_str("Subject To\n");
    for c in model.constraints() {
        out.push_str(&format!(" {}: {} {} {}\n", c.name, fmt_lhs(model, c), c.sense, c.rhs));
    }
    out.push_str("Binary\n");
    for var in model.vars() {
        out.push_str(&format!(" {}\n", model.var_name(var)));
    }
    out.push_str("End\n");
    out
}

fn fmt_lhs(model: &Model, c: &LinearConstraint) -> String {
    if c.terms.is_empty() {
        return "0".to_string();
    }

    let mut parts = Vec::with_capacity(c.terms.len());
    for t in &c.terms {
        let name = model.var_name(t.var);
        match t.coeff {
            1 => parts.push(format!("+ {name}")),
            -1 => parts.push(format!("- {name}")),
            k if k < 0 => parts.push(format!("- {} {name}", k.unsigned_abs())),
            k => parts.push(format!("+ {k} {name}")),
        }
    }
    parts.join(" ")
}
