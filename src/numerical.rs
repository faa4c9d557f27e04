/// Riemann sums of symbolic expressions over an interval
///  Example#1
/// ```
/// use RustedSymCalc::numerical::riemann::{m_riemann, RiemannRule};
/// use RustedSymCalc::symbolic::symbolic_engine::Expr;
/// // the shortest way: one call per rule
/// let f = Expr::variable("x").pow(2.0);
/// let area = m_riemann(&f, "x", 0.0, 1.0, 1000).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-6);
/// // or name the rule
/// let right = f.riemann_sum("x", 0.0, 1.0, 1000, RiemannRule::Right).unwrap();
/// assert!(right > area);
/// ```
/// Example#2
/// ```
/// // task object: configure, solve, refine, cross-check with Gauss-Legendre
/// use RustedSymCalc::numerical::riemann::RiemannIntegrator;
/// use RustedSymCalc::symbolic::symbolic_engine::Expr;
/// let f = Expr::variable("t").sin();
/// let task = "riemann
///     variable: t
///     start: 0
///     end: 3.141592653589793
///     rectangles: 50
///     rule: midpoint
///     loglevel: off";
/// let mut integrator = RiemannIntegrator::from_task(f, task).unwrap();
/// let coarse = integrator.solve().unwrap();
/// let (fine, rectangles) = integrator.refine(1e-8, 20).unwrap();
/// println!("coarse = {}, fine = {} with {} rectangles", coarse, fine, rectangles);
/// let (_, gauss, difference) = integrator.compare_with_quadrature(10).unwrap();
/// assert!((gauss - 2.0).abs() < 1e-9);
/// assert!(difference < 1e-6);
/// ```
pub mod riemann;
