//! CSV export of manifests.
//!
//! Reads a manifest slice (normally `Ledger::list` output) and never
//! mutates it. Fields containing a comma, quote or line break are quoted,
//! with embedded quotes doubled.

use std::borrow::Cow;
use std::io::Write;

use crate::error::Result;
use crate::types::quantity::format_amount;
use crate::types::Manifest;

/// Column header row
pub const HEADER: [&str; 8] = [
    "id",
    "date",
    "material",
    "quantity",
    "source",
    "destination",
    "status",
    "carbonSaved",
];

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn row(manifest: &Manifest) -> String {
    let date = manifest.date.format("%Y-%m-%d").to_string();
    let carbon = format_amount(manifest.carbon_saved_kg);
    let fields = [
        manifest.id.as_str(),
        date.as_str(),
        manifest.material.as_str(),
        manifest.quantity_label.as_str(),
        manifest.source_party.as_str(),
        manifest.destination_party.as_str(),
        manifest.status.label(),
        carbon.as_str(),
    ];
    fields.iter().map(|field| escape(field)).collect::<Vec<_>>().join(",")
}

/// Write the header and one row per manifest to `out`
pub fn write_manifests<W: Write>(manifests: &[Manifest], mut out: W) -> Result<()> {
    writeln!(out, "{}", HEADER.join(","))?;
    for manifest in manifests {
        writeln!(out, "{}", row(manifest))?;
    }
    out.flush()?;
    Ok(())
}

/// Render manifests as a CSV string
pub fn manifests_to_csv(manifests: &[Manifest]) -> String {
    let mut lines = Vec::with_capacity(manifests.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(manifests.iter().map(row));
    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}
