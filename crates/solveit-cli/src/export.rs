//! CSV export of iteration traces.
//!
//! Columns are `index,x,f_x,error` followed by one column per auxiliary key,
//! in sorted order. A missing error or auxiliary value is an empty field.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use solveit_math::Trace;

use crate::error::CliResult;

/// Writes `trace` as CSV to `writer`.
pub fn write_trace_csv<W: Write>(trace: &Trace, writer: W) -> CliResult<()> {
    let extra_keys = trace.extra_keys();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["index", "x", "f_x", "error"];
    header.extend(extra_keys.iter().copied());
    wtr.write_record(&header)?;

    for record in trace {
        let mut row = vec![
            record.index.to_string(),
            record.x.to_string(),
            record.f_x.to_string(),
            record.error.map(|e| e.to_string()).unwrap_or_default(),
        ];
        row.extend(
            extra_keys
                .iter()
                .map(|key| record.extra(key).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `trace` as CSV to the file at `path`.
pub fn export_csv(trace: &Trace, path: &Path) -> CliResult<()> {
    let file = File::create(path)?;
    write_trace_csv(trace, file)?;
    tracing::debug!("exported {} records to {}", trace.len(), path.display());
    Ok(())
}
