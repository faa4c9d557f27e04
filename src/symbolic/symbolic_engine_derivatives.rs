//! # Symbolic Engine Derivatives Module
//!
//! Evaluation and differentiation of `Expr` trees.
//!
//! ## Key Methods
//!
//! ### Evaluation
//! - `eval(&bindings)` - numeric value for a name -> value map
//! - `eval_expression(vars, values)` - same, with names and values given positionally
//! - `lambdify1D(var)` - closure of one argument for numerical routines
//!
//! ### Differentiation
//! - `diff()` - derivative in differential form: every variable `x` turns into `dx`
//! - `diff_n(n)` - `diff` applied n times
//! - `partial(var)` - ordinary derivative with respect to one variable
//!
//! ## Notes
//!
//! `diff` keeps the differential of every variable symbolic, so
//! `diff(x*x)` is `(x)(dx) + (x)(dx)`; binding `dx = 1` and every other differential
//! to 0 recovers d/dx. `partial` does that substitution structurally.
//!
//! No operation here simplifies its result: derivatives keep the `0` and `1` factors the
//! rules produce.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::CalcError;
use std::collections::HashMap;

impl Expr {
    /// EVALUATION

    /// Evaluates the expression for the given variable bindings.
    ///
    /// Floating-point rules apply unchanged: `1/0` is `inf`, `ln(-1)` is `NaN`.
    ///
    /// # Errors
    /// `CalcError::UnboundVariable` with the name of the first variable (in evaluation
    /// order) missing from `bindings`.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use RustedSymCalc::symbolic::symbolic_engine::Expr;
    /// let f = Expr::variable("x").pow(2.0);
    /// let bindings = HashMap::from([("x".to_string(), 4.0)]);
    /// assert_eq!(f.eval(&bindings).unwrap(), 16.0);
    /// ```
    pub fn eval(&self, bindings: &HashMap<String, f64>) -> Result<f64, CalcError> {
        self.eval_with(&|name| bindings.get(name).copied())
    }

    /// Evaluates with variable names and their values given as two parallel slices.
    ///
    /// A name without a value at the same position counts as unbound.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> Result<f64, CalcError> {
        self.eval_with(&|name| {
            vars.iter()
                .position(|&var| var == name)
                .and_then(|index| values.get(index).copied())
        })
    }

    /// Turns an expression of one variable into a Rust closure.
    ///
    /// Checks once that `var` is the only free variable, so the closure itself cannot fail.
    ///
    /// # Errors
    /// `CalcError::UnboundVariable` naming the first variable other than `var`.
    pub fn lambdify1D<'a>(&'a self, var: &'a str) -> Result<impl Fn(f64) -> f64 + 'a, CalcError> {
        if let Some(other) = self.extract_variables().into_iter().find(|name| name != var) {
            return Err(CalcError::UnboundVariable(other));
        }
        Ok(move |x: f64| {
            self.eval_with(&|name| (name == var).then_some(x))
                .unwrap_or(f64::NAN)
        })
    }

    fn eval_with<F>(&self, lookup: &F) -> Result<f64, CalcError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let value = match self {
            Expr::Const(val) => *val,
            Expr::Var(name) => {
                lookup(name).ok_or_else(|| CalcError::UnboundVariable(name.clone()))?
            }
            Expr::Add(lhs, rhs) => lhs.eval_with(lookup)? + rhs.eval_with(lookup)?,
            Expr::Sub(lhs, rhs) => lhs.eval_with(lookup)? - rhs.eval_with(lookup)?,
            Expr::Mul(lhs, rhs) => lhs.eval_with(lookup)? * rhs.eval_with(lookup)?,
            Expr::Div(lhs, rhs) => lhs.eval_with(lookup)? / rhs.eval_with(lookup)?,
            Expr::Coeff(c, expr) => c * expr.eval_with(lookup)?,
            Expr::Pow(base, n) => base.eval_with(lookup)?.powf(*n),
            Expr::Sin(expr) => expr.eval_with(lookup)?.sin(),
            Expr::Cos(expr) => expr.eval_with(lookup)?.cos(),
            Expr::Exp(expr) => expr.eval_with(lookup)?.exp(),
            Expr::Ln(expr) => expr.eval_with(lookup)?.ln(),
        };
        Ok(value)
    }

    /// DIFFERENTIATION

    /// Derivative in differential form.
    ///
    /// Rules:
    /// - `c` -> `0`, `x` -> `dx`
    /// - sum and difference rules
    /// - product rule: `(a*b)' = b*a' + a*b'`
    /// - quotient rule: `(a/b)' = (b*a' - a*b') / b^2`
    /// - `(c*a)' = c*a'`, `(a^n)' = (n*a^(n-1)) * a'` with the exponent held constant
    /// - chain rule for `sin`, `cos`, `exp`, `ln`
    ///
    /// The input is untouched; the result shares nothing with it.
    ///
    /// # Examples
    /// ```
    /// use RustedSymCalc::symbolic::symbolic_engine::Expr;
    /// let x = Expr::variable("x");
    /// assert_eq!((x.clone() * x).diff().to_text(), "(x)(dx) + (x)(dx)");
    /// ```
    pub fn diff(&self) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Var(name) => Expr::Var(format!("d{}", name)),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff()), Box::new(rhs.diff())),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff()), Box::new(rhs.diff())),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(rhs.clone(), Box::new(lhs.diff()))),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff()))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(rhs.clone(), Box::new(lhs.diff()))),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff()))),
                )),
                Box::new(Expr::Pow(rhs.clone(), 2.0)),
            ),
            Expr::Coeff(c, expr) => Expr::Coeff(*c, Box::new(expr.diff())),
            Expr::Pow(base, n) => Expr::Mul(
                Box::new(Expr::Coeff(*n, Box::new(Expr::Pow(base.clone(), n - 1.0)))),
                Box::new(base.diff()),
            ),
            Expr::Sin(expr) => Expr::Mul(Box::new(Expr::Cos(expr.clone())), Box::new(expr.diff())),
            Expr::Cos(expr) => Expr::Coeff(
                -1.0,
                Box::new(Expr::Mul(Box::new(Expr::Sin(expr.clone())), Box::new(expr.diff()))),
            ),
            Expr::Exp(expr) => Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff())),
            Expr::Ln(expr) => Expr::Mul(Box::new(Expr::Pow(expr.clone(), -1.0)), Box::new(expr.diff())),
        }
    }

    /// `diff` applied `n` times; `n = 0` gives a copy of the expression.
    ///
    /// The second pass differentiates `dx` into `ddx`, and so on.
    pub fn diff_n(&self, n: usize) -> Expr {
        (0..n).fold(self.clone(), |expr, _| expr.diff())
    }

    /// Ordinary derivative with respect to `var`.
    ///
    /// Same rules as `diff`, except that `var` differentiates to `1` and every other
    /// variable to `0`.
    pub fn partial(&self, var: &str) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.partial(var)), Box::new(rhs.partial(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.partial(var)), Box::new(rhs.partial(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(rhs.clone(), Box::new(lhs.partial(var)))),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.partial(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(rhs.clone(), Box::new(lhs.partial(var)))),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.partial(var)))),
                )),
                Box::new(Expr::Pow(rhs.clone(), 2.0)),
            ),
            Expr::Coeff(c, expr) => Expr::Coeff(*c, Box::new(expr.partial(var))),
            Expr::Pow(base, n) => Expr::Mul(
                Box::new(Expr::Coeff(*n, Box::new(Expr::Pow(base.clone(), n - 1.0)))),
                Box::new(base.partial(var)),
            ),
            Expr::Sin(expr) => {
                Expr::Mul(Box::new(Expr::Cos(expr.clone())), Box::new(expr.partial(var)))
            }
            Expr::Cos(expr) => Expr::Coeff(
                -1.0,
                Box::new(Expr::Mul(
                    Box::new(Expr::Sin(expr.clone())),
                    Box::new(expr.partial(var)),
                )),
            ),
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.partial(var)))
            }
            Expr::Ln(expr) => Expr::Mul(
                Box::new(Expr::Pow(expr.clone(), -1.0)),
                Box::new(expr.partial(var)),
            ),
        }
    }
}
