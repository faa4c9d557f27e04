//! Free-function constructors, one per node kind.
//!
//! Children must already be complete expressions, so none of these can fail.
//! ```
//! use RustedSymCalc::symbolic::symbolic_builders::{add, constant, mul, power, sin, variable};
//! let x = variable("x");
//! let f = add(mul(constant(3.0), sin(x.clone())), power(x, 2.0));
//! assert_eq!(f.to_text(), "(3)(sin(x)) + (x)^2");
//! ```
use crate::symbolic::symbolic_engine::Expr;

pub fn constant(value: f64) -> Expr {
    Expr::Const(value)
}

pub fn variable(name: &str) -> Expr {
    Expr::Var(name.to_string())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn coefficient(scalar: f64, a: Expr) -> Expr {
    Expr::Coeff(scalar, a.boxed())
}

/// `a ^ exponent`; note the base comes first.
pub fn power(a: Expr, exponent: f64) -> Expr {
    Expr::Pow(a.boxed(), exponent)
}

pub fn sin(a: Expr) -> Expr {
    Expr::Sin(a.boxed())
}

pub fn cos(a: Expr) -> Expr {
    Expr::Cos(a.boxed())
}

pub fn exp(a: Expr) -> Expr {
    Expr::Exp(a.boxed())
}

pub fn ln(a: Expr) -> Expr {
    Expr::Ln(a.boxed())
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> binds x, y, z to Expr::Var("x"), Expr::Var("y"), Expr::Var("z")
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        ($(
            $crate::symbolic::symbolic_engine::Expr::Var(stringify!($var).to_string())
        ),+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_match_variants() {
        let x = variable("x");
        assert_eq!(constant(2.5), Expr::Const(2.5));
        assert_eq!(x, Expr::Var("x".to_string()));
        assert_eq!(
            add(x.clone(), constant(1.0)),
            Expr::Add(Box::new(x.clone()), Box::new(Expr::Const(1.0)))
        );
        assert_eq!(
            coefficient(3.0, x.clone()),
            Expr::Coeff(3.0, Box::new(x.clone()))
        );
        assert_eq!(power(x.clone(), 2.0), Expr::Pow(Box::new(x.clone()), 2.0));
        assert_eq!(ln(x.clone()), Expr::Ln(Box::new(x)));
    }

    #[test]
    fn test_builders_agree_with_operators() {
        let (x, y) = crate::symbols!(x, y);
        assert_eq!(sub(x.clone(), y.clone()), x.clone() - y.clone());
        assert_eq!(mul(x.clone(), y.clone()), x.clone() * y.clone());
        assert_eq!(div(x.clone(), y.clone()), x.clone() / y.clone());
        assert_eq!(sin(x.clone()), x.clone().sin());
        assert_eq!(cos(x.clone()), x.clone().cos());
        assert_eq!(exp(y.clone()), y.exp());
        assert_eq!(coefficient(-1.0, x.clone()), -x);
    }
}
