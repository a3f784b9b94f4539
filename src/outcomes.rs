use thiserror::Error;

use crate::models::{
    Gender, LevelGroup, Outcome, OutcomeGroup, OutcomeRow, Status, StudentRecord,
};

#[derive(Debug, Error)]
pub enum OutcomeError {
    #[error("no {outcome} records found for {level}")]
    EmptyPartition {
        outcome: &'static str,
        level: &'static str,
    },
    #[error("no records for gender {gender} in the {outcome} partition of {level}")]
    MissingGender {
        gender: &'static str,
        outcome: &'static str,
        level: &'static str,
    },
}

struct GenderCounts {
    female: i64,
    male: i64,
}

impl GenderCounts {
    fn total(&self) -> i64 {
        self.female + self.male
    }

    fn percent(&self, group: OutcomeGroup) -> f64 {
        match group {
            OutcomeGroup::Female => self.female as f64 / self.total() as f64 * 100.0,
            OutcomeGroup::Male => self.male as f64 / self.total() as f64 * 100.0,
            OutcomeGroup::Difference => {
                self.percent(OutcomeGroup::Male) - self.percent(OutcomeGroup::Female)
            }
        }
    }

    fn count(&self, group: OutcomeGroup) -> i64 {
        match group {
            OutcomeGroup::Female => self.female,
            OutcomeGroup::Male => self.male,
            OutcomeGroup::Difference => self.male - self.female,
        }
    }
}

/// Outcome rows for all three level groups, concatenated in report order.
/// Difference rows are derived per level, before concatenation.
pub fn all_level_outcomes(records: &[StudentRecord]) -> Result<Vec<OutcomeRow>, OutcomeError> {
    let mut rows = Vec::new();
    for group in LevelGroup::ALL {
        rows.extend(level_outcomes(records, group)?);
    }
    Ok(rows)
}

pub fn level_outcomes(
    records: &[StudentRecord],
    group: LevelGroup,
) -> Result<Vec<OutcomeRow>, OutcomeError> {
    let in_level: Vec<&StudentRecord> = records
        .iter()
        .filter(|record| group.contains(&record.level))
        .collect();

    let dropout = partition_counts(&in_level, Outcome::Dropout, group)?;
    let completion = partition_counts(&in_level, Outcome::Completion, group)?;

    let mut rows = Vec::with_capacity(6);
    for gender in [OutcomeGroup::Female, OutcomeGroup::Male] {
        rows.push(OutcomeRow {
            group: gender,
            total: dropout.count(gender),
            percent: dropout.percent(gender),
            outcome: Outcome::Dropout,
            level: group,
        });
        rows.push(OutcomeRow {
            group: gender,
            total: completion.count(gender),
            percent: completion.percent(gender),
            outcome: Outcome::Completion,
            level: group,
        });
    }
    for (outcome, counts) in [
        (Outcome::Dropout, &dropout),
        (Outcome::Completion, &completion),
    ] {
        rows.push(OutcomeRow {
            group: OutcomeGroup::Difference,
            total: counts.count(OutcomeGroup::Difference),
            percent: counts.percent(OutcomeGroup::Difference),
            outcome,
            level: group,
        });
    }

    Ok(rows)
}

// Each partition divides by its own total, never by the combined
// level total. Statuses outside CANCELADO/CONCLUÍDO are excluded
// from both numerator and denominator.
fn partition_counts(
    records: &[&StudentRecord],
    outcome: Outcome,
    group: LevelGroup,
) -> Result<GenderCounts, OutcomeError> {
    let mut female = 0i64;
    let mut male = 0i64;

    for record in records {
        let in_partition = match outcome {
            Outcome::Dropout => matches!(record.status, Status::Cancelled),
            Outcome::Completion => matches!(record.status, Status::Completed),
        };
        if !in_partition {
            continue;
        }
        match &record.gender {
            Gender::Female => female += 1,
            Gender::Male => male += 1,
            Gender::Unknown(_) => {}
        }
    }

    if female + male == 0 {
        return Err(OutcomeError::EmptyPartition {
            outcome: outcome.label(),
            level: group.label(),
        });
    }
    if female == 0 {
        return Err(OutcomeError::MissingGender {
            gender: "F",
            outcome: outcome.label(),
            level: group.label(),
        });
    }
    if male == 0 {
        return Err(OutcomeError::MissingGender {
            gender: "M",
            outcome: outcome.label(),
            level: group.label(),
        });
    }

    Ok(GenderCounts { female, male })
}
