//! # Riemann sums
//!
//! Numerical integration of a symbolic expression of one variable over `[start, end]`.
//! The interval is split into `rectangles` equal pieces of width `dx = (end - start) / rectangles`;
//! piece `i` is sampled at `start + dx * (i + offset)` and the result is the sum of the
//! samples times `dx`. `offset` picks the rule: 0 is the left rule, 0.5 the midpoint rule,
//! 1 the right rule.
//!
//! A reversed interval (`end < start`) is accepted and gives the negated area.
//!
//! ## Main Structures and Methods
//! - `riemann`, `l_riemann`, `m_riemann`, `r_riemann` - one-shot sums
//! - `RiemannRule` - named sampling offsets, parsable from text
//! - `RiemannIntegrator` - task object: configured by setters or by a task document,
//!   logs its work, can refine the rectangle count and compare against Gauss-Legendre quadrature
use crate::Utils::logger::{init_logger, log_file_name, parse_loglevel};
use crate::Utils::task_parser::{TaskValue, first_value, parse_document};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::CalcError;
use gauss_quad::GaussLegendre;
use log::{debug, info, warn};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Where inside each sub-interval the integrand is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiemannRule {
    /// left edge, offset 0
    Left,
    /// middle, offset 0.5
    Midpoint,
    /// right edge, offset 1
    Right,
}

impl RiemannRule {
    pub fn offset(&self) -> f64 {
        match self {
            RiemannRule::Left => 0.0,
            RiemannRule::Midpoint => 0.5,
            RiemannRule::Right => 1.0,
        }
    }
}

/// Riemann sum of `expr` over `[start, end]` with the sample offset given explicitly.
///
/// # Errors
/// - `CalcError::InvalidRectangles` if `rectangles` is 0
/// - `CalcError::InvalidSampleOffset` if `offset` is not in `[0, 1]`
/// - `CalcError::UnboundVariable` if `expr` uses a variable other than `var`
pub fn riemann(
    expr: &Expr,
    var: &str,
    start: f64,
    end: f64,
    rectangles: usize,
    offset: f64,
) -> Result<f64, CalcError> {
    if rectangles == 0 {
        return Err(CalcError::InvalidRectangles(rectangles));
    }
    if !(0.0..=1.0).contains(&offset) {
        return Err(CalcError::InvalidSampleOffset(offset));
    }
    let n = rectangles as f64;
    let dx = (end - start) / n;
    let mut sum = 0.0;
    for i in 0..rectangles {
        let x = start + dx * (i as f64 + offset);
        sum += expr.eval_expression(&[var], &[x])?;
    }
    // same as sum * dx, but exact for constant integrands at any rectangle count
    Ok(sum * (end - start) / n)
}

/// left rule, samples at the left edge of every rectangle
pub fn l_riemann(expr: &Expr, var: &str, start: f64, end: f64, rectangles: usize) -> Result<f64, CalcError> {
    riemann(expr, var, start, end, rectangles, RiemannRule::Left.offset())
}

/// midpoint rule
pub fn m_riemann(expr: &Expr, var: &str, start: f64, end: f64, rectangles: usize) -> Result<f64, CalcError> {
    riemann(expr, var, start, end, rectangles, RiemannRule::Midpoint.offset())
}

/// right rule, samples at the right edge of every rectangle
pub fn r_riemann(expr: &Expr, var: &str, start: f64, end: f64, rectangles: usize) -> Result<f64, CalcError> {
    riemann(expr, var, start, end, rectangles, RiemannRule::Right.offset())
}

impl Expr {
    /// Riemann sum of the expression with respect to `var`, see [`riemann`].
    pub fn riemann_sum(
        &self,
        var: &str,
        start: f64,
        end: f64,
        rectangles: usize,
        rule: RiemannRule,
    ) -> Result<f64, CalcError> {
        riemann(self, var, start, end, rectangles, rule.offset())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////
//                         TASK OBJECT
////////////////////////////////////////////////////////////////////////////////////////////////
/// Integration task: an expression, its variable, the interval and the sampling settings.
///
/// Setters configure it; `from_task` reads the same settings from a task document:
/// ```text
/// riemann
/// variable: x
/// start: 0.0
/// end: 1.0
/// rectangles: 100
/// rule: midpoint
/// loglevel: info
/// log_to_file: false
/// ```
/// `variable`, `start` and `end` are required, the rest default to 100 rectangles,
/// the midpoint rule and no logging.
#[derive(Debug, Clone)]
pub struct RiemannIntegrator {
    pub expr: Expr,
    pub variable: String,
    pub start: f64,
    pub end: f64,
    pub rectangles: usize,
    pub rule: RiemannRule,
    pub loglevel: Option<String>,
    pub log_to_file: bool,
    result: Option<f64>,
}

impl RiemannIntegrator {
    pub fn new(expr: Expr, variable: &str, start: f64, end: f64) -> RiemannIntegrator {
        RiemannIntegrator {
            expr,
            variable: variable.to_string(),
            start,
            end,
            rectangles: 100,
            rule: RiemannRule::Midpoint,
            loglevel: None,
            log_to_file: false,
            result: None,
        }
    }

    pub fn set_rule(&mut self, rule: RiemannRule) {
        self.rule = rule;
    }

    pub fn set_rectangles(&mut self, rectangles: usize) {
        self.rectangles = rectangles;
    }

    /// debug, info, warn, error, off or none
    pub fn set_loglevel(&mut self, loglevel: &str) {
        self.loglevel = Some(loglevel.to_string());
    }

    pub fn set_log_to_file(&mut self, log_to_file: bool) {
        self.log_to_file = log_to_file;
    }

    /// Builds the task from the `riemann` section of a task document.
    pub fn from_task(expr: Expr, document: &str) -> Result<RiemannIntegrator, CalcError> {
        let doc = parse_document(document)?;
        let section = doc
            .get("riemann")
            .ok_or_else(|| CalcError::InvalidTask("no 'riemann' section".to_string()))?;

        let variable = match first_value(section, "variable") {
            Some(TaskValue::Boolean(flag)) => flag.to_string(),
            Some(value) => value.as_string().map(str::to_string).ok_or_else(|| {
                CalcError::InvalidTask(format!("variable must be a name, got '{}'", value))
            })?,
            None => return Err(CalcError::InvalidTask("variable is missing".to_string())),
        };
        let read_bound = |key: &str| -> Result<f64, CalcError> {
            first_value(section, key)
                .and_then(|value| value.as_float())
                .ok_or_else(|| CalcError::InvalidTask(format!("{} must be a number", key)))
        };
        let start = read_bound("start")?;
        let end = read_bound("end")?;

        let mut integrator = RiemannIntegrator::new(expr, &variable, start, end);
        if let Some(value) = first_value(section, "rectangles") {
            let rectangles = value
                .as_integer()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CalcError::InvalidTask(format!(
                        "rectangles must be a positive integer, got '{}'",
                        value
                    ))
                })?;
            integrator.set_rectangles(rectangles as usize);
        }
        if let Some(value) = first_value(section, "rule") {
            let rule = RiemannRule::from_str(&value.to_string()).map_err(|_| {
                CalcError::InvalidTask(format!(
                    "rule must be left, midpoint or right, got '{}'",
                    value
                ))
            })?;
            integrator.set_rule(rule);
        }
        if let Some(value) = first_value(section, "loglevel") {
            let level = value.to_string();
            // checked here so a bad level fails at configuration time
            parse_loglevel(&level)?;
            integrator.set_loglevel(&level);
        }
        if let Some(value) = first_value(section, "log_to_file") {
            match value {
                TaskValue::Boolean(flag) => integrator.set_log_to_file(*flag),
                other => {
                    return Err(CalcError::InvalidTask(format!(
                        "log_to_file must be true or false, got '{}'",
                        other
                    )));
                }
            }
        }
        Ok(integrator)
    }

    fn init_logging(&self) -> Result<(), CalcError> {
        let level = parse_loglevel(self.loglevel.as_deref().unwrap_or("none"))?;
        let log_file = self.log_to_file.then(|| log_file_name("riemann"));
        init_logger(level, log_file.as_deref());
        Ok(())
    }

    /// Computes the sum with the current settings and keeps the result.
    pub fn solve(&mut self) -> Result<f64, CalcError> {
        self.init_logging()?;
        info!(
            "Riemann sum ({} rule, {} rectangles) of {} over [{}, {}] in {}",
            self.rule, self.rectangles, self.expr, self.start, self.end, self.variable
        );
        if self.end < self.start {
            warn!("reversed interval [{}, {}], the sum changes sign", self.start, self.end);
        }
        let value = riemann(
            &self.expr,
            &self.variable,
            self.start,
            self.end,
            self.rectangles,
            self.rule.offset(),
        )?;
        info!("result = {}", value);
        self.result = Some(value);
        Ok(value)
    }

    pub fn get_result(&self) -> Option<f64> {
        self.result
    }

    /// Doubles the rectangle count until two successive sums differ by less than
    /// `tolerance`.
    ///
    /// On success the rectangle count and result of the task are updated and
    /// `(sum, rectangles)` is returned.
    ///
    /// # Errors
    /// `CalcError::NotConverged` after `max_doublings` doublings without agreement.
    pub fn refine(&mut self, tolerance: f64, max_doublings: usize) -> Result<(f64, usize), CalcError> {
        self.init_logging()?;
        let offset = self.rule.offset();
        let mut rectangles = self.rectangles;
        let mut previous = riemann(&self.expr, &self.variable, self.start, self.end, rectangles, offset)?;
        let mut last_difference = f64::INFINITY;
        for iteration in 1..=max_doublings {
            rectangles = rectangles.saturating_mul(2);
            let current = riemann(&self.expr, &self.variable, self.start, self.end, rectangles, offset)?;
            last_difference = (current - previous).abs();
            debug!(
                "doubling {}: {} rectangles, sum = {}, difference = {:e}",
                iteration, rectangles, current, last_difference
            );
            if last_difference < tolerance {
                info!("converged with {} rectangles, result = {}", rectangles, current);
                self.rectangles = rectangles;
                self.result = Some(current);
                return Ok((current, rectangles));
            }
            previous = current;
        }
        warn!(
            "no convergence after {} doublings, last difference {:e}",
            max_doublings, last_difference
        );
        Err(CalcError::NotConverged {
            iterations: max_doublings,
            last_difference,
        })
    }

    /// Riemann sum next to a Gauss-Legendre estimate of the same integral.
    ///
    /// Returns `(riemann, gauss_legendre, |riemann - gauss_legendre|)`.
    pub fn compare_with_quadrature(&self, degree: usize) -> Result<(f64, f64, f64), CalcError> {
        let riemann_value = riemann(
            &self.expr,
            &self.variable,
            self.start,
            self.end,
            self.rectangles,
            self.rule.offset(),
        )?;
        let f = self.expr.lambdify1D(&self.variable)?;
        let quad = GaussLegendre::new(degree).map_err(|e| {
            CalcError::Quadrature(format!("failed to create Gauss-Legendre quadrature: {:?}", e))
        })?;
        let gauss_value = quad.integrate(self.start, self.end, &f);
        debug!("riemann = {}, gauss-legendre = {}", riemann_value, gauss_value);
        Ok((riemann_value, gauss_value, (riemann_value - gauss_value).abs()))
    }
}

///////////////////////////////////////////////////////////////////////////////////////////
// tests
////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod riemann_tests {
    use super::*;
    use crate::symbolic::symbolic_builders::{constant, exp, power, sin, variable};
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_constant_integrand_is_exact() {
        let five = constant(5.0);
        for rule in RiemannRule::iter() {
            for rectangles in [1, 3, 7, 10, 99, 1000] {
                let area = five.riemann_sum("x", 0.0, 10.0, rectangles, rule).unwrap();
                assert_eq!(area, 50.0, "rule {} with {} rectangles", rule, rectangles);
            }
        }
    }

    #[test]
    fn test_single_rectangle_left_and_right() {
        let x = variable("x");
        assert_eq!(riemann(&x, "x", 0.0, 1.0, 1, 0.0).unwrap(), 0.0);
        assert_eq!(riemann(&x, "x", 0.0, 1.0, 1, 1.0).unwrap(), 1.0);
        assert_eq!(riemann(&x, "x", 0.0, 1.0, 1, 0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_named_rules() {
        let x = variable("x");
        assert_eq!(l_riemann(&x, "x", 0.0, 1.0, 4).unwrap(), 0.375);
        assert_eq!(m_riemann(&x, "x", 0.0, 1.0, 4).unwrap(), 0.5);
        assert_eq!(r_riemann(&x, "x", 0.0, 1.0, 4).unwrap(), 0.625);
    }

    #[test]
    fn test_midpoint_error_of_parabola() {
        // midpoint rule for x^2 on [0, 1] gives exactly 1/3 - h^2/12
        let f = power(variable("x"), 2.0);
        let n = 100;
        let h = 1.0 / n as f64;
        let area = m_riemann(&f, "x", 0.0, 1.0, n).unwrap();
        assert_relative_eq!(area, 1.0 / 3.0 - h * h / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_interval_is_negative() {
        let f = exp(variable("x"));
        let forward = m_riemann(&f, "x", 0.0, 1.0, 200).unwrap();
        let backward = m_riemann(&f, "x", 1.0, 0.0, 200).unwrap();
        assert!(backward < 0.0);
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }

    #[test]
    fn test_foreign_variable_is_unbound() {
        let f = variable("x") * variable("y");
        assert_eq!(
            m_riemann(&f, "x", 0.0, 1.0, 10),
            Err(CalcError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_invalid_arguments() {
        let x = variable("x");
        assert_eq!(
            riemann(&x, "x", 0.0, 1.0, 0, 0.5),
            Err(CalcError::InvalidRectangles(0))
        );
        assert_eq!(
            riemann(&x, "x", 0.0, 1.0, 10, 1.5),
            Err(CalcError::InvalidSampleOffset(1.5))
        );
        assert!(matches!(
            riemann(&x, "x", 0.0, 1.0, 10, f64::NAN),
            Err(CalcError::InvalidSampleOffset(_))
        ));
    }

    #[test]
    fn test_rule_text_round_trip() {
        for rule in RiemannRule::iter() {
            assert_eq!(RiemannRule::from_str(&rule.to_string()).unwrap(), rule);
        }
        assert_eq!(RiemannRule::from_str("MidPoint").unwrap(), RiemannRule::Midpoint);
        assert_eq!(RiemannRule::Left.to_string(), "left");
        assert!(RiemannRule::from_str("trapezoid").is_err());
    }

    #[test]
    fn test_integrator_solve() {
        let mut integrator = RiemannIntegrator::new(sin(variable("x")), "x", 0.0, std::f64::consts::PI);
        integrator.set_rule(RiemannRule::Left);
        integrator.set_rectangles(400);
        integrator.set_loglevel("off");
        assert_eq!(integrator.get_result(), None);
        let area = integrator.solve().unwrap();
        assert_relative_eq!(area, 2.0, epsilon = 1e-4);
        assert_eq!(integrator.get_result(), Some(area));
    }

    #[test]
    fn test_integrator_bad_loglevel() {
        let mut integrator = RiemannIntegrator::new(variable("x"), "x", 0.0, 1.0);
        integrator.set_loglevel("chatty");
        assert!(matches!(integrator.solve(), Err(CalcError::InvalidTask(_))));
    }

    #[test]
    fn test_from_task() {
        let task = "
            # integrate sin(t) over half a period
            riemann
            variable: t
            start: 0
            end: 3.141592653589793
            rectangles: 200
            rule: Right
            loglevel: off
        ";
        let mut integrator = RiemannIntegrator::from_task(sin(variable("t")), task).unwrap();
        assert_eq!(integrator.variable, "t");
        assert_eq!(integrator.start, 0.0);
        assert_eq!(integrator.rectangles, 200);
        assert_eq!(integrator.rule, RiemannRule::Right);
        assert!(!integrator.log_to_file);
        assert_relative_eq!(integrator.solve().unwrap(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_from_task_word_like_variable_names() {
        for name in ["inf", "nan", "true", "Infinity"] {
            let task = format!("riemann\nvariable: {}\nstart: 0\nend: 2\nrectangles: 4", name);
            let mut integrator = RiemannIntegrator::from_task(variable(name), &task).unwrap();
            assert_eq!(integrator.variable, name);
            assert_relative_eq!(integrator.solve().unwrap(), 2.0, epsilon = 1e-12);
        }
        assert!(matches!(
            RiemannIntegrator::from_task(variable("x"), "riemann\nvariable: 2.5\nstart: 0\nend: 1"),
            Err(CalcError::InvalidTask(_))
        ));
    }

    #[test]
    fn test_log_to_file_survives_repeated_solves() {
        let riemann_logs = || -> Vec<std::path::PathBuf> {
            std::fs::read_dir(".")
                .unwrap()
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("riemann_") && n.ends_with(".txt"))
                })
                .collect()
        };
        let before = riemann_logs();
        let mut integrator = RiemannIntegrator::new(power(variable("x"), 2.0), "x", 0.0, 1.0);
        integrator.set_rectangles(10);
        integrator.set_loglevel("info");
        integrator.set_log_to_file(true);
        let first = integrator.solve().unwrap();
        let (refined, _) = integrator.refine(1e-3, 5).unwrap();
        let second = integrator.solve().unwrap();
        assert_relative_eq!(first, 1.0 / 3.0, epsilon = 1e-2);
        assert_relative_eq!(refined, second);

        let created: Vec<_> = riemann_logs()
            .into_iter()
            .filter(|path| !before.contains(path))
            .collect();
        // at most one file, and only when this test installed the logger
        assert!(created.len() <= 1);
        for path in created {
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(!content.starts_with('\0'));
            assert!(content.contains("10 rectangles"));
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_from_task_defaults_and_errors() {
        let integrator =
            RiemannIntegrator::from_task(variable("x"), "riemann\nvariable: x\nstart: 0\nend: 1").unwrap();
        assert_eq!(integrator.rectangles, 100);
        assert_eq!(integrator.rule, RiemannRule::Midpoint);
        assert_eq!(integrator.loglevel, None);

        let bad = [
            "solver\nvariable: x\nstart: 0\nend: 1",
            "riemann\nstart: 0\nend: 1",
            "riemann\nvariable: x\nstart: zero\nend: 1",
            "riemann\nvariable: x\nstart: 0\nend: 1\nrectangles: -3",
            "riemann\nvariable: x\nstart: 0\nend: 1\nrectangles: 2.5",
            "riemann\nvariable: x\nstart: 0\nend: 1\nrule: trapezoid",
            "riemann\nvariable: x\nstart: 0\nend: 1\nloglevel: chatty",
            "riemann\nvariable: x\nstart: 0\nend: 1\nlog_to_file: maybe",
        ];
        for task in bad {
            assert!(
                matches!(
                    RiemannIntegrator::from_task(variable("x"), task),
                    Err(CalcError::InvalidTask(_))
                ),
                "task should be rejected: {}",
                task
            );
        }
    }

    #[test]
    fn test_refine_converges() {
        let mut integrator = RiemannIntegrator::new(power(variable("x"), 2.0), "x", 0.0, 1.0);
        integrator.set_rectangles(10);
        integrator.set_loglevel("off");
        // successive midpoint sums of x^2 differ by 1/(16 n^2)
        let (area, rectangles) = integrator.refine(1e-6, 10).unwrap();
        assert_eq!(rectangles, 640);
        assert_eq!(integrator.rectangles, 640);
        assert_eq!(integrator.get_result(), Some(area));
        assert_relative_eq!(area, 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_refine_gives_up() {
        let mut integrator = RiemannIntegrator::new(power(variable("x"), 2.0), "x", 0.0, 1.0);
        integrator.set_rectangles(2);
        integrator.set_loglevel("off");
        match integrator.refine(1e-12, 2) {
            Err(CalcError::NotConverged {
                iterations,
                last_difference,
            }) => {
                assert_eq!(iterations, 2);
                assert!(last_difference > 1e-12);
            }
            other => panic!("expected NotConverged, got {:?}", other),
        }
        assert_eq!(integrator.rectangles, 2);
        assert_eq!(integrator.get_result(), None);
    }

    #[test]
    fn test_compare_with_quadrature() {
        let mut integrator = RiemannIntegrator::new(exp(variable("x")), "x", 0.0, 1.0);
        integrator.set_rectangles(100);
        let (riemann_value, gauss_value, difference) = integrator.compare_with_quadrature(10).unwrap();
        let exact = std::f64::consts::E - 1.0;
        assert_relative_eq!(gauss_value, exact, epsilon = 1e-12);
        assert_relative_eq!(riemann_value, exact, epsilon = 1e-4);
        assert_relative_eq!(difference, (riemann_value - gauss_value).abs());
    }

    #[test]
    fn test_compare_with_quadrature_needs_single_variable() {
        let integrator = RiemannIntegrator::new(variable("x") + variable("k"), "x", 0.0, 1.0);
        assert!(matches!(
            integrator.compare_with_quadrature(5),
            Err(CalcError::UnboundVariable(_))
        ));
    }
}
