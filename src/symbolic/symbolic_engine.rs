//! # Symbolic Engine Module
//!
//! Core of the crate: the expression tree every other module works on.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! Closed set of twelve node kinds:
//! - **Leaves**: `Const(f64)`, `Var(String)`
//! - **Binary operations**: `Add`, `Sub`, `Mul`, `Div`
//! - **Scalar-carrying nodes**: `Coeff(c, a)` meaning `c*a`, `Pow(a, n)` meaning `a^n` with a numeric exponent
//! - **Functions**: `Sin`, `Cos`, `Exp`, `Ln`
//!
//! ### Key Methods
//! - `Display` - fully parenthesized infix rendering (`to_text()` is a shortcut)
//! - `contains_variable`, `extract_variables` - inspection of free variables
//! - `depth`, `node_count` - size of the tree
//! - `set_variable` - substitute a numeric value for a variable
//!
//! Evaluation and differentiation live in `symbolic_engine_derivatives`,
//! free-function constructors in `symbolic_builders`.
//!
//! ## Interesting Code Features
//!
//! 1. **Owned Recursive Tree**: children sit in `Box<Expr>`, a parent owns them exclusively,
//!    nothing is shared or mutated after construction. Every "modification" builds a new tree.
//!
//! 2. **Operator Overloading**: `std::ops` traits (Add, Sub, Mul, Div, Neg) give the
//!    natural syntax `x.clone() * x + Expr::constant(1.0)`.
//!
//! 3. **Exhaustive Matching**: each operation is one `match` over all variants, so adding a
//!    node kind is a compile error until every operation handles it.

use std::collections::BTreeSet;
use std::fmt;

/// Symbolic expression tree.
///
/// # Examples
/// ```
/// use RustedSymCalc::symbolic::symbolic_engine::Expr;
/// let x = Expr::variable("x");
/// let expr = x.clone().pow(2.0) + Expr::constant(1.0);
/// assert_eq!(expr.to_text(), "(x)^2 + 1");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numerical constant value
    Const(f64),
    /// Symbolic variable with a name (e.g., "x", "velocity")
    Var(String),
    /// Addition operation: first + second
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: first - second
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: first * second
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: first / second
    Div(Box<Expr>, Box<Expr>),
    /// Scalar multiple: value * expression
    Coeff(f64, Box<Expr>),
    /// Power with a numeric exponent: base ^ exponent
    Pow(Box<Expr>, f64),
    /// Sine function: sin(x), radians
    Sin(Box<Expr>),
    /// Cosine function: cos(x), radians
    Cos(Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
}

/// Renders the expression in the crate's infix notation.
///
/// Sums and differences are written without parentheses, so `a - (b + c)` and
/// `a - b + c` print identically. Products, quotients, powers and coefficients wrap
/// their operands.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Add(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "{} - {}", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({})({})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({})/({})", lhs, rhs),
            Expr::Coeff(value, expr) => write!(f, "{}({})", value, expr),
            Expr::Pow(base, exp) => write!(f, "({})^{}", base, exp),
            Expr::Sin(expr) => write!(f, "sin({})", expr),
            Expr::Cos(expr) => write!(f, "cos({})", expr),
            Expr::Exp(expr) => write!(f, "e^{}", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Coeff(-1.0, self.boxed())
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Numerical constant leaf.
    pub fn constant(value: f64) -> Expr {
        Expr::Const(value)
    }

    /// Variable leaf. The name is only ever compared for lookup.
    pub fn variable(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// `scalar * expr` as a single coefficient node.
    pub fn coefficient(scalar: f64, expr: Expr) -> Expr {
        Expr::Coeff(scalar, expr.boxed())
    }

    /// `base ^ exponent` with a numeric exponent.
    pub fn power(base: Expr, exponent: f64) -> Expr {
        Expr::Pow(base.boxed(), exponent)
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^exponent.
    pub fn pow(self, exponent: f64) -> Expr {
        Expr::Pow(self.boxed(), exponent)
    }

    /// Creates coefficient expression scalar*self.
    pub fn scale(self, scalar: f64) -> Expr {
        Expr::Coeff(scalar, self.boxed())
    }

    /// Creates sin(self).
    pub fn sin(self) -> Expr {
        Expr::Sin(self.boxed())
    }

    /// Creates cos(self).
    pub fn cos(self) -> Expr {
        Expr::Cos(self.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Textual form of the expression, identical to its `Display` output.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    //__________________________________INSPECTION____________________________________

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Coeff(_, expr)
            | Expr::Pow(expr, _)
            | Expr::Sin(expr)
            | Expr::Cos(expr)
            | Expr::Exp(expr)
            | Expr::Ln(expr) => expr.contains_variable(var_name),
        }
    }

    /// Names of all variables in the expression, sorted and without repetitions.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().collect()
    }

    fn collect_variables(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                names.insert(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Coeff(_, expr)
            | Expr::Pow(expr, _)
            | Expr::Sin(expr)
            | Expr::Cos(expr)
            | Expr::Exp(expr)
            | Expr::Ln(expr) => expr.collect_variables(names),
        }
    }

    /// Length of the longest root-to-leaf path; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Var(_) => 1,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                1 + lhs.depth().max(rhs.depth())
            }
            Expr::Coeff(_, expr)
            | Expr::Pow(expr, _)
            | Expr::Sin(expr)
            | Expr::Cos(expr)
            | Expr::Exp(expr)
            | Expr::Ln(expr) => 1 + expr.depth(),
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Var(_) => 1,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                1 + lhs.node_count() + rhs.node_count()
            }
            Expr::Coeff(_, expr)
            | Expr::Pow(expr, _)
            | Expr::Sin(expr)
            | Expr::Cos(expr)
            | Expr::Exp(expr)
            | Expr::Ln(expr) => 1 + expr.node_count(),
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Nothing is folded: `x + 1` with `x = 2` becomes `2 + 1`, not `3`.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Coeff(c, expr) => Expr::Coeff(*c, Box::new(expr.set_variable(var, value))),
            Expr::Pow(base, n) => Expr::Pow(Box::new(base.set_variable(var, value)), *n),
            Expr::Sin(expr) => Expr::Sin(Box::new(expr.set_variable(var, value))),
            Expr::Cos(expr) => Expr::Cos(Box::new(expr.set_variable(var, value))),
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.set_variable(var, value))),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.set_variable(var, value))),
        }
    }
}
