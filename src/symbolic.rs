///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree `Expr`
/// 2) turns a symbolic expression into a string for printing and control results
/// 3) gives an overview of its variables, depth and size
///# Example#
/// ```
/// use RustedSymCalc::symbolic::symbolic_engine::Expr;
/// let x = Expr::variable("x");
/// let f = x.clone().pow(2.0) + x.sin().scale(3.0);
/// println!("f = {}", f);
/// assert_eq!(f.to_text(), "(x)^2 + 3(sin(x))");
/// assert_eq!(f.extract_variables(), vec!["x".to_string()]);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________
/// constructors for every node kind as free functions
pub mod symbolic_builders;
///________________________________________________________________________________________________________________________________
/// evaluate and differentiate symbolic expressions
/// Example#
/// ```
/// use std::collections::HashMap;
/// use RustedSymCalc::symbolic::symbolic_engine::Expr;
/// let x = Expr::variable("x");
/// let f = x.clone().pow(2.0);
/// let df = f.diff();
/// println!("df = {}", df);
/// // differential form: bind dx = 1 to read off d/dx
/// let bindings = HashMap::from([("x".to_string(), 4.0), ("dx".to_string(), 1.0)]);
/// assert_eq!(df.eval(&bindings).unwrap(), 8.0);
/// // closure of one argument
/// let f_of_x = f.lambdify1D("x").unwrap();
/// assert_eq!(f_of_x(3.0), 9.0);
/// ```
pub mod symbolic_engine_derivatives;
/// error type of the crate
pub mod symbolic_errors;
