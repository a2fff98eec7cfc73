//! Human readable and CSV renderings of a [`Scan`].

use std::{
    io::{self, BufWriter, Write},
    ops::Range,
    path::Path,
};

use scanbot::{Reading, Scan};
use tracing::info;

use crate::Error;

const RULE_WIDTH: usize = 60;
const SAMPLED_ROWS: [Range<usize>; 3] = [0..10, 175..180, 350..360];

/// Formats `scan` as a table. Unless `show_all` is set only the first ten, five
/// middle and last ten rows of a 360-reading sweep are shown.
pub fn format_scan_table(scan: &Scan, show_all: bool) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        format!("LIDAR Scan Results (Total: {} readings)", scan.len()),
        rule.clone(),
        format!("{:>12} {:>15} {:>15}", "Angle (°)", "Distance (m)", "Intensity"),
        rule.clone(),
    ];

    if show_all {
        lines.extend(scan.iter().map(table_row));
    } else {
        for (n, rows) in SAMPLED_ROWS.iter().enumerate() {
            lines.extend(rows.clone().filter(|&i| i < scan.len()).map(|i| table_row(&scan[i])));
            if n + 1 < SAMPLED_ROWS.len() && rows.end <= scan.len() {
                lines.push(format!("...{}...", " ".repeat(RULE_WIDTH - 7)));
            }
        }
    }

    lines.push(rule);
    if let Some(timestamp) = scan.timestamp() {
        lines.push(format!("Scan timestamp: {timestamp:.2}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn table_row(reading: &Reading) -> String {
    format!(
        "{:>12.0} {:>15.2} {:>15}",
        reading.angle, reading.distance, reading.intensity
    )
}

/// Writes `Angle,Distance,Intensity,Timestamp` rows for every reading.
pub fn write_scan_csv<W: Write>(scan: &Scan, mut writer: W) -> io::Result<()> {
    writeln!(writer, "Angle,Distance,Intensity,Timestamp")?;
    for reading in scan {
        writeln!(
            writer,
            "{:.1},{:.3},{},{:.6}",
            reading.angle, reading.distance, reading.intensity, reading.timestamp
        )?;
    }
    writer.flush()
}

pub fn save_scan_csv<P: AsRef<Path>>(scan: &Scan, path: P) -> Result<(), Error> {
    let file = fs_err::File::create(path.as_ref())?;
    write_scan_csv(scan, BufWriter::new(file))?;
    info!("LIDAR scan saved to {:?}", path.as_ref());
    Ok(())
}
