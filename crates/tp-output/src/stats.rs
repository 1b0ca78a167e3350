//! Statistics export to CSV.

use std::io;
use std::path::Path;

use csv::Writer;

use tp_sim::{Labels, StatTable};
use tp_topology::Topology;

use crate::OutputResult;

/// Write `table` (header row first) as CSV to `out`.
pub fn write_stat_csv<W: io::Write>(
    out:      W,
    table:    &StatTable,
    topology: &Topology,
    labels:   Labels,
) -> OutputResult<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(table.headers())?;
    for record in table.records(topology, labels) {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `table` to it.
pub fn write_stat_csv_path(
    path:     &Path,
    table:    &StatTable,
    topology: &Topology,
    labels:   Labels,
) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_stat_csv(file, table, topology, labels)
}
