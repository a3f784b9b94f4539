use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{LevelGroup, Outcome, OutcomeGroup, OutcomeRow};

pub fn build_report(rows: &[OutcomeRow], generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "# Percentual de homens e mulheres que evadiram e concluíram, em cada nível de ensino"
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "Gerado em {generated_on}.");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "O gráfico a seguir retrata o percentual de discentes dos sexos feminino e \
         masculino, como também a diferença entre esses dois percentuais."
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "#### Como interpretar o gráfico");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "- Na parte superior do gráfico está representado o percentual de discentes do \
         sexo masculino, enquanto na parte inferior está expresso o percentual de \
         discentes do sexo feminino;"
    );
    let _ = writeln!(
        output,
        "- Em amarelo está representada a diferença: se o retângulo referente à diferença \
         estiver na parte inferior do gráfico, significa que a diferença entre os \
         percentuais é negativa (há menos homens do que mulheres), e vice versa."
    );
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "**Observação**: é importante ressaltar que os valores negativos no eixo y \
         (\"% dos ingressantes\"), quando estamos observando o percentual de discentes do \
         sexo feminino, não indica um valor negativo em si - esse formato foi utilizado \
         por limitações da ferramenta."
    );

    for level in LevelGroup::ALL {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", level.title());
        for outcome in [Outcome::Dropout, Outcome::Completion] {
            let _ = writeln!(output);
            let _ = writeln!(output, "### {}", outcome.label());
            write_outcome_lines(&mut output, rows, level, outcome);
        }
    }

    output
}

fn write_outcome_lines(
    output: &mut String,
    rows: &[OutcomeRow],
    level: LevelGroup,
    outcome: Outcome,
) {
    let section: Vec<&OutcomeRow> = rows
        .iter()
        .filter(|row| row.level == level && row.outcome == outcome)
        .collect();

    let partition_total: i64 = section
        .iter()
        .filter(|row| row.group != OutcomeGroup::Difference)
        .map(|row| row.total)
        .sum();

    for row in section {
        match row.group {
            OutcomeGroup::Difference => {
                let _ = writeln!(
                    output,
                    "- Diferença (M - F): {:+.2} pontos percentuais ({:+} registros)",
                    row.percent, row.total
                );
            }
            _ => {
                let _ = writeln!(
                    output,
                    "- {}: {:.2}% ({} de {} registros)",
                    row.group.display_name(),
                    row.percent,
                    row.total,
                    partition_total
                );
            }
        }
    }
}
