use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::Context;

use crate::models::{EducationLevel, Gender, Status, StudentRecord};

pub fn load_records(path: &Path) -> anyhow::Result<Vec<StudentRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<StudentRecord>().enumerate() {
        let record =
            result.with_context(|| format!("malformed row {} in {}", index + 1, path.display()))?;
        records.push(record);
    }

    audit(&records, path);
    Ok(records)
}

// Unknown genders and levels are excluded downstream; statuses outside
// CANCELADO/CONCLUÍDO are excluded by rule and only worth a debug line.
fn audit(records: &[StudentRecord], path: &Path) {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut duplicates = 0usize;
    let mut unknown_genders: BTreeSet<&str> = BTreeSet::new();
    let mut unknown_levels: BTreeSet<&str> = BTreeSet::new();
    let mut other_statuses: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        if !seen.insert(record.enrollment.as_str()) {
            duplicates += 1;
        }
        if let Gender::Unknown(code) = &record.gender {
            unknown_genders.insert(code);
        }
        if let EducationLevel::Unknown(label) = &record.level {
            unknown_levels.insert(label);
        }
        if let Status::Other(status) = &record.status {
            other_statuses.insert(status);
        }
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    if duplicates > 0 {
        log::warn!(
            "{duplicates} duplicate matricula values in {}",
            path.display()
        );
    }
    if !unknown_genders.is_empty() {
        log::warn!("unrecognized sexo values {unknown_genders:?} will be ignored");
    }
    if !unknown_levels.is_empty() {
        log::warn!(
            "nivel_ensino values {unknown_levels:?} match no education level and will be ignored"
        );
    }
    if !other_statuses.is_empty() {
        log::debug!("statuses {other_statuses:?} count neither as Evasão nor Conclusão");
    }
}

/// Writes a small dataset for trying the tool out. The TÉCNICO slice is
/// the worked example from the dashboard documentation: 6 dropouts
/// (4 M / 2 F) and 4 completions (1 M / 3 F).
pub fn write_sample(path: &Path) -> anyhow::Result<usize> {
    let rows = [
        ("20190001", "M", "CANCELADO", "TÉCNICO"),
        ("20190002", "M", "CANCELADO", "TÉCNICO"),
        ("20190003", "M", "CANCELADO", "TÉCNICO"),
        ("20190004", "M", "CANCELADO", "TÉCNICO"),
        ("20190005", "F", "CANCELADO", "TÉCNICO"),
        ("20190006", "F", "CANCELADO", "TÉCNICO"),
        ("20190007", "M", "CONCLUÍDO", "TÉCNICO"),
        ("20190008", "F", "CONCLUÍDO", "TÉCNICO"),
        ("20190009", "F", "CONCLUÍDO", "TÉCNICO"),
        ("20190010", "F", "CONCLUÍDO", "TÉCNICO"),
        ("20190011", "F", "TRANCADO", "TÉCNICO"),
        ("20190012", "M", "CANCELADO", "GRADUAÇÃO"),
        ("20190013", "M", "CANCELADO", "GRADUAÇÃO"),
        ("20190014", "F", "CANCELADO", "GRADUAÇÃO"),
        ("20190015", "F", "CANCELADO", "GRADUAÇÃO"),
        ("20190016", "F", "CANCELADO", "GRADUAÇÃO"),
        ("20190017", "M", "CONCLUÍDO", "GRADUAÇÃO"),
        ("20190018", "M", "CONCLUÍDO", "GRADUAÇÃO"),
        ("20190019", "M", "CONCLUÍDO", "GRADUAÇÃO"),
        ("20190020", "F", "CONCLUÍDO", "GRADUAÇÃO"),
        ("20190021", "F", "CONCLUÍDO", "GRADUAÇÃO"),
        ("20190022", "M", "ATIVO", "GRADUAÇÃO"),
        ("20190023", "M", "CANCELADO", "MESTRADO"),
        ("20190024", "F", "CANCELADO", "DOUTORADO"),
        ("20190025", "F", "CANCELADO", "LATO SENSU"),
        ("20190026", "M", "CONCLUÍDO", "STRICTO SENSU"),
        ("20190027", "F", "CONCLUÍDO", "RESIDÊNCIA"),
        ("20190028", "M", "CONCLUÍDO", "MESTRADO"),
        ("20190029", "F", "TRANCADO", "MESTRADO"),
        ("20190030", "F", "CONCLUÍDO", "EXTENSÃO"),
    ];

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(["matricula", "sexo", "status", "nivel_ensino"])?;
    for (enrollment, gender, status, level) in rows {
        writer.write_record([enrollment, gender, status, level])?;
    }
    writer.flush()?;

    Ok(rows.len())
}
