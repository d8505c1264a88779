//! Plot-ready JSON for a solved function.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use solveit_expr::Expression;
use solveit_math::{MethodId, Solution, Trace};

use crate::error::CliResult;

/// Number of evenly spaced function samples.
pub const SAMPLE_COUNT: usize = 200;

/// A point on the curve; `y` is `None` where the function is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: Option<f64>,
}

/// Everything needed to draw the function and the iterates on top of it.
#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub function: String,
    pub method: MethodId,
    pub x_range: (f64, f64),
    pub samples: Vec<Point>,
    pub iterates: Vec<Point>,
    pub root: Option<f64>,
}

impl PlotData {
    /// Samples `f` over a window that contains every iterate.
    pub fn new(f: &Expression, solution: &Solution) -> Self {
        let (lo, hi) = window(&solution.trace);
        let last = (SAMPLE_COUNT - 1) as f64;

        let samples = (0..SAMPLE_COUNT)
            .map(|i| {
                // Interpolated form stays finite even when `hi - lo` overflows
                let t = i as f64 / last;
                let x = lo * (1.0 - t) + hi * t;
                Point {
                    x,
                    y: f.evaluate(x).ok(),
                }
            })
            .collect();

        let iterates = solution
            .trace
            .iter()
            .map(|r| Point {
                x: r.x,
                y: Some(r.f_x),
            })
            .collect();

        Self {
            function: f.source().to_string(),
            method: solution.method,
            x_range: (lo, hi),
            samples,
            iterates,
            root: solution.root(),
        }
    }
}

/// Plot window: the iterate span padded by 10% on each side, clamped to the
/// finite range.
fn window(trace: &Trace) -> (f64, f64) {
    let (lo, hi) = trace
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.x), hi.max(r.x))
        });

    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = if hi > lo { hi * 0.1 - lo * 0.1 } else { 1.0 };
    ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
}

/// Writes plot data for `solution` to `path`.
pub fn write_plot(f: &Expression, solution: &Solution, path: &Path) -> CliResult<()> {
    let data = PlotData::new(f, solution);
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &data)?;
    tracing::debug!("wrote {} samples to {}", data.samples.len(), path.display());
    Ok(())
}
