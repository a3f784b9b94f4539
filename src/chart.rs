use serde_json::{json, Value};

use crate::models::{ChartRow, OutcomeGroup, OutcomeRow};

const GENDER_BAR_SIZE: u32 = 100;
const DIFFERENCE_BAR_SIZE: u32 = 50;

/// Diverging-bar convention: female percentages render below the axis,
/// so their sign is flipped here. Difference rows keep their own sign.
pub fn chart_rows(rows: &[OutcomeRow]) -> Vec<ChartRow> {
    rows.iter()
        .map(|row| ChartRow {
            gender: row.group.display_name(),
            total: row.total,
            percent: match row.group {
                OutcomeGroup::Female => -row.percent,
                _ => row.percent,
            },
            outcome: row.outcome.label(),
            level: row.level.title(),
            size: match row.group {
                OutcomeGroup::Difference => DIFFERENCE_BAR_SIZE,
                _ => GENDER_BAR_SIZE,
            },
        })
        .collect()
}

pub fn vega_lite_spec(rows: &[ChartRow]) -> Value {
    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "data": { "values": rows },
        "mark": "bar",
        "width": 250,
        "transform": [
            {
                "calculate": "if(datum.sexo === 'Feminino', 0, if(datum.sexo === 'Masculino', 1, 2))",
                "as": "order"
            }
        ],
        "encoding": {
            "x": { "field": "nivel_ensino", "type": "nominal", "title": null },
            "y": {
                "aggregate": "sum",
                "field": "percentual",
                "type": "quantitative",
                "stack": null,
                "title": "% dos ingressantes"
            },
            "column": { "field": "tipo", "type": "nominal", "title": null },
            "color": {
                "field": "sexo",
                "title": "Gênero",
                "scale": {
                    "domain": ["Diferença", "Feminino", "Masculino"],
                    "range": ["#f6c85f", "#6f4e7c", "#0b84a5"]
                }
            },
            "size": {
                "field": "size",
                "type": "quantitative",
                "legend": null,
                "scale": { "domain": [0, 40] }
            },
            "order": { "field": "order", "type": "quantitative" },
            "tooltip": [
                { "field": "sexo", "title": "Gênero" },
                {
                    "aggregate": "sum",
                    "field": "percentual",
                    "type": "quantitative",
                    "title": "% dos ingressantes",
                    "format": ".2f"
                }
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LevelGroup, Outcome};

    fn sample_rows() -> Vec<OutcomeRow> {
        vec![
            OutcomeRow {
                group: OutcomeGroup::Female,
                total: 2,
                percent: 33.33333333333333,
                outcome: Outcome::Dropout,
                level: LevelGroup::Technical,
            },
            OutcomeRow {
                group: OutcomeGroup::Male,
                total: 4,
                percent: 66.66666666666667,
                outcome: Outcome::Dropout,
                level: LevelGroup::Technical,
            },
            OutcomeRow {
                group: OutcomeGroup::Difference,
                total: -2,
                percent: -50.0,
                outcome: Outcome::Completion,
                level: LevelGroup::Graduate,
            },
        ]
    }

    #[test]
    fn female_percentages_flip_sign() {
        let rows = chart_rows(&sample_rows());
        assert!(rows[0].percent <= 0.0);
        assert!((rows[0].percent + 33.33333333333333).abs() < 1e-9);
        assert!(rows[1].percent >= 0.0);
    }

    #[test]
    fn difference_rows_keep_their_sign_and_render_thinner() {
        let rows = chart_rows(&sample_rows());
        assert!((rows[2].percent + 50.0).abs() < 1e-9);
        assert_eq!(rows[2].size, DIFFERENCE_BAR_SIZE);
        assert_eq!(rows[0].size, GENDER_BAR_SIZE);
        assert_eq!(rows[1].size, GENDER_BAR_SIZE);
    }

    #[test]
    fn labels_become_display_names() {
        let rows = chart_rows(&sample_rows());
        assert_eq!(rows[0].gender, "Feminino");
        assert_eq!(rows[1].gender, "Masculino");
        assert_eq!(rows[2].gender, "Diferença");
        assert_eq!(rows[0].level, "Técnico");
        assert_eq!(rows[2].level, "Pós Graduação");
        assert_eq!(rows[0].outcome, "Evasão");
        assert_eq!(rows[2].outcome, "Conclusão");
    }

    #[test]
    fn spec_embeds_rows_and_the_fixed_color_mapping() {
        let rows = chart_rows(&sample_rows());
        let spec = vega_lite_spec(&rows);

        assert_eq!(spec["data"]["values"].as_array().unwrap().len(), 3);
        assert_eq!(
            spec["data"]["values"][0]["sexo"],
            Value::String("Feminino".to_string())
        );
        assert_eq!(
            spec["encoding"]["color"]["scale"]["domain"],
            json!(["Diferença", "Feminino", "Masculino"])
        );
        assert_eq!(
            spec["encoding"]["color"]["scale"]["range"],
            json!(["#f6c85f", "#6f4e7c", "#0b84a5"])
        );
        assert_eq!(spec["encoding"]["y"]["stack"], Value::Null);
        assert_eq!(spec["mark"], Value::String("bar".to_string()));
    }
}
