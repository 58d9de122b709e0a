//! Blocking prompt loop for `--interactive`.
//!
//! Each round asks for a model and a query count, then waits for an explicit
//! Enter before calculating. `q` at any prompt, or end of input, ends the
//! session. Invalid answers re-prompt without calculating.

use std::io::{BufRead, Write};

use crate::app::display::render_report;
use crate::core::report::calculate;
use crate::domain::model::{AiModel, CalculationInput, EmissionsReport};
use crate::utils::error::Result;
use crate::utils::validation::{parse_queries, DEFAULT_QUERIES, MAX_QUERIES, MIN_QUERIES};

/// Starting answers for empty input.
#[derive(Debug, Clone, Copy)]
pub struct SessionDefaults {
    pub model: AiModel,
    pub queries: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            model: AiModel::default(),
            queries: DEFAULT_QUERIES,
        }
    }
}

/// `None` on end of input or `q`.
fn ask<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        writeln!(writer)?;
        return Ok(None);
    }

    let answer = line.trim();
    if answer.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}

fn parse_model_choice(answer: &str, default: AiModel) -> Result<AiModel> {
    if answer.is_empty() {
        return Ok(default);
    }
    if let Ok(index) = answer.parse::<usize>() {
        if (1..=AiModel::ALL.len()).contains(&index) {
            return Ok(AiModel::ALL[index - 1]);
        }
    }
    answer.parse()
}

fn ask_model<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    default: AiModel,
) -> Result<Option<AiModel>> {
    writeln!(writer, "Select AI Model")?;
    for (i, model) in AiModel::ALL.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, model)?;
    }

    let prompt = format!("Model [1-{}] (default {}): ", AiModel::ALL.len(), default);
    loop {
        let Some(answer) = ask(reader, writer, &prompt)? else {
            return Ok(None);
        };
        match parse_model_choice(&answer, default) {
            Ok(model) => return Ok(Some(model)),
            Err(e) => writeln!(writer, "❌ {}", e.user_friendly_message())?,
        }
    }
}

fn ask_queries<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    default: u32,
) -> Result<Option<u32>> {
    let prompt = format!(
        "Number of Queries [{}-{}] (default {}): ",
        MIN_QUERIES, MAX_QUERIES, default
    );
    loop {
        let Some(answer) = ask(reader, writer, &prompt)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match parse_queries("queries", &answer) {
            Ok(queries) => return Ok(Some(queries)),
            Err(e) => writeln!(writer, "❌ {}", e.user_friendly_message())?,
        }
    }
}

/// Runs rounds until the user quits; returns every report calculated.
pub fn run_session<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    defaults: SessionDefaults,
) -> Result<Vec<EmissionsReport>> {
    let mut reports = Vec::new();

    loop {
        writeln!(writer, "\nCalculation Inputs")?;

        let Some(model) = ask_model(&mut reader, &mut writer, defaults.model)? else {
            break;
        };
        let Some(queries) = ask_queries(&mut reader, &mut writer, defaults.queries)? else {
            break;
        };
        if ask(
            &mut reader,
            &mut writer,
            "Press Enter to calculate emissions (q to quit): ",
        )?
        .is_none()
        {
            break;
        }

        let report = calculate(&CalculationInput { queries, model });
        tracing::info!(
            model = %report.model,
            queries = report.queries,
            "Calculated {}",
            report.metric_value
        );
        writeln!(writer, "\n{}", render_report(&report))?;
        reports.push(report);
    }

    writer.flush()?;
    Ok(reports)
}
