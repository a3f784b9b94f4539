use serde::{Deserialize, Serialize};

/// One enrollment row from the source dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "matricula")]
    pub enrollment: String,
    #[serde(rename = "sexo")]
    pub gender: Gender,
    #[serde(rename = "status")]
    pub status: Status,
    #[serde(rename = "nivel_ensino")]
    pub level: EducationLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    Female,
    Male,
    Unknown(String),
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        if value == "F" {
            Gender::Female
        } else if value == "M" {
            Gender::Male
        } else {
            Gender::Unknown(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Status {
    Cancelled,
    Completed,
    Other(String),
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        let known = match value.as_str() {
            "CANCELADO" => Some(Status::Cancelled),
            "CONCLUÍDO" => Some(Status::Completed),
            _ => None,
        };
        match known {
            Some(status) => status,
            None => Status::Other(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EducationLevel {
    Technical,
    Undergraduate,
    LatoSensu,
    Masters,
    Doctorate,
    StrictoSensu,
    Residency,
    Unknown(String),
}

impl From<String> for EducationLevel {
    fn from(value: String) -> Self {
        let known = match value.as_str() {
            "TÉCNICO" => Some(EducationLevel::Technical),
            "GRADUAÇÃO" => Some(EducationLevel::Undergraduate),
            "LATO SENSU" => Some(EducationLevel::LatoSensu),
            "MESTRADO" => Some(EducationLevel::Masters),
            "DOUTORADO" => Some(EducationLevel::Doctorate),
            "STRICTO SENSU" => Some(EducationLevel::StrictoSensu),
            "RESIDÊNCIA" => Some(EducationLevel::Residency),
            _ => None,
        };
        match known {
            Some(level) => level,
            None => EducationLevel::Unknown(value),
        }
    }
}

/// One of the three report buckets. Graduate covers the five
/// graduate sub-labels found in the raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelGroup {
    Technical,
    Undergraduate,
    Graduate,
}

impl LevelGroup {
    pub const ALL: [LevelGroup; 3] = [
        LevelGroup::Technical,
        LevelGroup::Undergraduate,
        LevelGroup::Graduate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LevelGroup::Technical => "TÉCNICO",
            LevelGroup::Undergraduate => "GRADUAÇÃO",
            LevelGroup::Graduate => "PÓS GRADUAÇÃO",
        }
    }

    pub fn title(&self) -> String {
        title_case(self.label())
    }

    pub fn contains(&self, level: &EducationLevel) -> bool {
        match self {
            LevelGroup::Technical => matches!(level, EducationLevel::Technical),
            LevelGroup::Undergraduate => matches!(level, EducationLevel::Undergraduate),
            LevelGroup::Graduate => matches!(
                level,
                EducationLevel::LatoSensu
                    | EducationLevel::Masters
                    | EducationLevel::Doctorate
                    | EducationLevel::StrictoSensu
                    | EducationLevel::Residency
            ),
        }
    }

    pub fn parse(input: &str) -> Option<LevelGroup> {
        match input.trim().to_uppercase().as_str() {
            "TÉCNICO" => Some(LevelGroup::Technical),
            "GRADUAÇÃO" => Some(LevelGroup::Undergraduate),
            "PÓS GRADUAÇÃO" => Some(LevelGroup::Graduate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dropout,
    Completion,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Dropout => "Evasão",
            Outcome::Completion => "Conclusão",
        }
    }
}

/// Row identity within the derived table: the two genders plus the
/// synthetic male-minus-female difference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeGroup {
    Female,
    Male,
    Difference,
}

impl OutcomeGroup {
    pub fn code(&self) -> &'static str {
        match self {
            OutcomeGroup::Female => "F",
            OutcomeGroup::Male => "M",
            OutcomeGroup::Difference => "Diferença",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OutcomeGroup::Female => "Feminino",
            OutcomeGroup::Male => "Masculino",
            OutcomeGroup::Difference => "Diferença",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutcomeRow {
    pub group: OutcomeGroup,
    pub total: i64,
    pub percent: f64,
    pub outcome: Outcome,
    pub level: LevelGroup,
}

/// Chart-ready row, serialized with the dataset's column names so the
/// emitted Vega-Lite spec can reference them directly.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    #[serde(rename = "sexo")]
    pub gender: &'static str,
    pub total: i64,
    #[serde(rename = "percentual")]
    pub percent: f64,
    #[serde(rename = "tipo")]
    pub outcome: &'static str,
    #[serde(rename = "nivel_ensino")]
    pub level: String,
    pub size: u32,
}

pub(crate) fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_columns_parse_known_codes() {
        assert_eq!(Gender::from("F".to_string()), Gender::Female);
        assert_eq!(Gender::from("M".to_string()), Gender::Male);
        assert_eq!(Status::from("CANCELADO".to_string()), Status::Cancelled);
        assert_eq!(Status::from("CONCLUÍDO".to_string()), Status::Completed);
        assert_eq!(
            EducationLevel::from("TÉCNICO".to_string()),
            EducationLevel::Technical
        );
        assert_eq!(
            EducationLevel::from("RESIDÊNCIA".to_string()),
            EducationLevel::Residency
        );
    }

    #[test]
    fn unexpected_codes_become_unknown_variants() {
        assert_eq!(
            Gender::from("X".to_string()),
            Gender::Unknown("X".to_string())
        );
        assert_eq!(
            Status::from("TRANCADO".to_string()),
            Status::Other("TRANCADO".to_string())
        );
        assert_eq!(
            EducationLevel::from("EXTENSÃO".to_string()),
            EducationLevel::Unknown("EXTENSÃO".to_string())
        );
    }

    #[test]
    fn graduate_group_matches_every_sublabel() {
        for label in [
            "LATO SENSU",
            "MESTRADO",
            "DOUTORADO",
            "STRICTO SENSU",
            "RESIDÊNCIA",
        ] {
            let level = EducationLevel::from(label.to_string());
            assert!(LevelGroup::Graduate.contains(&level), "{label}");
            assert!(!LevelGroup::Technical.contains(&level), "{label}");
            assert!(!LevelGroup::Undergraduate.contains(&level), "{label}");
        }
    }

    #[test]
    fn unknown_levels_match_no_group() {
        let level = EducationLevel::Unknown("EXTENSÃO".to_string());
        for group in LevelGroup::ALL {
            assert!(!group.contains(&level));
        }
    }

    #[test]
    fn level_group_parsing_is_case_insensitive() {
        assert_eq!(
            LevelGroup::parse("pós graduação"),
            Some(LevelGroup::Graduate)
        );
        assert_eq!(LevelGroup::parse("TÉCNICO"), Some(LevelGroup::Technical));
        assert_eq!(LevelGroup::parse("ensino médio"), None);
    }

    #[test]
    fn titles_follow_dashboard_casing() {
        assert_eq!(LevelGroup::Graduate.title(), "Pós Graduação");
        assert_eq!(LevelGroup::Technical.title(), "Técnico");
        assert_eq!(title_case("GRADUAÇÃO"), "Graduação");
    }
}
