//! Error type shared by evaluation, integration and task parsing.
//!
//! Floating-point domain conditions (division by zero, ln of a negative number,
//! fractional power of a negative base) are not errors: they come back as
//! infinities or NaN exactly as `f64` arithmetic produces them.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A variable node whose name is absent from the bindings
    UnboundVariable(String),
    /// Riemann sum asked for zero rectangles
    InvalidRectangles(usize),
    /// Sample offset outside of [0, 1]
    InvalidSampleOffset(f64),
    /// Task document could not be turned into an integration task
    InvalidTask(String),
    /// Rectangle doubling stopped before two estimates agreed
    NotConverged {
        iterations: usize,
        last_difference: f64,
    },
    /// Gauss quadrature rule could not be built
    Quadrature(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::UnboundVariable(name) => {
                write!(f, "Unbound variable: no value supplied for '{}'", name)
            }
            CalcError::InvalidRectangles(n) => {
                write!(f, "Number of rectangles must be positive, got {}", n)
            }
            CalcError::InvalidSampleOffset(offset) => {
                write!(f, "Sample offset must lie in [0, 1], got {}", offset)
            }
            CalcError::InvalidTask(msg) => write!(f, "Invalid task: {}", msg),
            CalcError::NotConverged {
                iterations,
                last_difference,
            } => write!(
                f,
                "Riemann sum did not converge after {} doublings (last difference {:e})",
                iterations, last_difference
            ),
            CalcError::Quadrature(msg) => write!(f, "Quadrature error: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}
