//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use solveit_expr::Expression;
use solveit_math::{Outcome, Solution, Trace};

use crate::cli::OutputFormat;
use crate::export::write_trace_csv;
use crate::Context;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Solution with the function it was computed for.
#[derive(Serialize)]
struct SolutionReport<'a> {
    function: &'a str,
    #[serde(flatten)]
    solution: &'a Solution,
}

/// Prints a solution in the selected format.
pub fn print_solution(f: &Expression, solution: &Solution, ctx: &Context) -> anyhow::Result<()> {
    match ctx.format {
        OutputFormat::Table => print_solution_table(f, solution, ctx),
        OutputFormat::Json => {
            let report = SolutionReport {
                function: f.source(),
                solution,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        OutputFormat::Csv => {
            write_trace_csv(&solution.trace, std::io::stdout())?;
            Ok(())
        }
        OutputFormat::Minimal => {
            match solution.root() {
                Some(root) => println!("{root}"),
                None => println!("{}", solution.outcome.label()),
            }
            Ok(())
        }
    }
}

fn print_solution_table(f: &Expression, solution: &Solution, ctx: &Context) -> anyhow::Result<()> {
    let precision = ctx.settings.precision;

    if !ctx.quiet {
        print_header(&format!("{}: f(x) = {}", solution.method, f));
    }

    if solution.trace.is_empty() {
        if !ctx.quiet {
            println!("No iterations.");
        }
    } else {
        println!("{}", trace_table(&solution.trace, precision));
    }

    print_outcome(&solution.outcome);

    if !ctx.quiet {
        let mut summary = vec![
            KeyValue::new("Method", solution.method.name()),
            KeyValue::new("Outcome", solution.outcome.label()),
        ];
        if let Some(root) = solution.root() {
            summary.push(KeyValue::from_float("Root", root, precision));
        }
        if let Some(iterations) = solution.iterations() {
            summary.push(KeyValue::new("Iterations", iterations.to_string()));
        }
        if let Some(order) = solution.order_estimate {
            summary.push(KeyValue::from_float("Order estimate", order, 2));
        }
        print_output(&summary, OutputFormat::Table)?;
    }
    Ok(())
}

/// Renders a trace with one column per auxiliary key.
pub fn trace_table(trace: &Trace, precision: usize) -> String {
    let extra_keys = trace.extra_keys();

    let mut builder = Builder::default();
    let mut header = vec!["n".to_string(), "x".to_string(), "f(x)".to_string(), "error".to_string()];
    header.extend(extra_keys.iter().map(|k| (*k).to_string()));
    builder.push_record(header);

    for record in trace {
        let mut row = vec![
            record.index.to_string(),
            format!("{:.prec$}", record.x, prec = precision),
            format!("{:.prec$e}", record.f_x, prec = precision.min(6)),
            record
                .error
                .map_or_else(String::new, |e| format!("{:.prec$e}", e, prec = precision.min(6))),
        ];
        row.extend(extra_keys.iter().map(|key| {
            record
                .extra(key)
                .map_or_else(String::new, |v| format!("{:.prec$}", v, prec = precision))
        }));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.with(Modify::new(Columns::first()).with(Alignment::right()));
    table.to_string()
}

/// Prints the outcome line, coloured by kind.
pub fn print_outcome(outcome: &Outcome) {
    let text = outcome.to_string();
    match outcome {
        Outcome::Converged { .. } => println!("{} {}", "✓".green(), text.green()),
        Outcome::MaxIterationsReached { .. } => println!("{} {}", "⚠".yellow(), text.yellow()),
        _ => println!("{} {}", "✗".red(), text.red()),
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a float with fixed precision.
    pub fn from_float(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{:.prec$}", value, prec = precision),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use solveit_math::solvers::{newton_raphson, SolverConfig};

    #[test]
    fn test_trace_table_has_extra_columns() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let solution = newton_raphson(&f, Some(&df), 1.0, &SolverConfig::new(1e-8, 20)).unwrap();

        let table = trace_table(&solution.trace, 6);
        let header = table.lines().nth(1).unwrap();
        assert!(header.contains("f(x)"));
        assert!(header.contains("df"));
        assert!(table.contains("1.500000"));
    }

    #[test]
    fn test_key_value_precision() {
        let kv = KeyValue::from_float("Root", std::f64::consts::SQRT_2, 4);
        assert_eq!(kv.value, "1.4142");
    }
}
