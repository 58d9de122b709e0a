use std::collections::HashMap;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::core::svg::render_pie_svg;
use crate::domain::model::EmissionsReport;
use crate::domain::ports::Storage;
use crate::utils::error::{CalcError, Result};

pub const BUNDLE_FILENAME: &str = "emissions_report.zip";

pub const EXPORT_FORMATS: [&str; 3] = ["json", "csv", "svg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Svg,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(CalcError::InvalidConfigValueError {
                field: "export".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    EXPORT_FORMATS.join(", ")
                ),
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn filename(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }

    pub fn encode(&self, report: &EmissionsReport) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
            ExportFormat::Csv => chart_csv(report),
            ExportFormat::Svg => Ok(render_pie_svg(&report.chart).into_bytes()),
        }
    }
}

pub fn parse_formats(values: &[String]) -> Result<Vec<ExportFormat>> {
    values.iter().map(|v| ExportFormat::parse(v)).collect()
}

fn chart_csv(report: &EmissionsReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "value", "share", "color"])?;

    for (slice, share) in report.chart.slices.iter().zip(report.chart.shares()) {
        let value = slice.value.to_string();
        let share = format!("{:.6}", share);
        writer.write_record([
            slice.label.as_str(),
            value.as_str(),
            share.as_str(),
            slice.color.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| CalcError::ProcessingError {
            message: format!("Failed to finish CSV output: {}", e),
        })
}

/// One file stem per report. A stem seen before gets `_2`, `_3`, ... so
/// reports sharing model and query count never overwrite each other.
pub fn unique_stems(reports: &[EmissionsReport]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    reports
        .iter()
        .map(|report| {
            let stem = report.file_stem();
            let count = seen.entry(stem.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                stem
            } else {
                format!("{}_{}", stem, count)
            }
        })
        .collect()
}

/// Encodes every report in every format as `(filename, bytes)` pairs.
pub fn encode_all(
    reports: &[EmissionsReport],
    formats: &[ExportFormat],
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::with_capacity(reports.len() * formats.len());
    for (report, stem) in reports.iter().zip(unique_stems(reports)) {
        for format in formats {
            files.push((format.filename(&stem), format.encode(report)?));
        }
    }
    Ok(files)
}

pub fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Writes the reports in the requested formats through `storage`, either as
/// separate files or as one zip. Returns the paths written, prefixed with
/// `output_path`; an empty format list writes nothing.
pub async fn write_exports<S: Storage>(
    storage: &S,
    output_path: &str,
    reports: &[EmissionsReport],
    formats: &[String],
    as_bundle: bool,
) -> Result<Vec<String>> {
    let formats = parse_formats(formats)?;
    if formats.is_empty() || reports.is_empty() {
        tracing::debug!("No export formats requested, skipping export");
        return Ok(Vec::new());
    }

    let files = encode_all(reports, &formats)?;

    if as_bundle {
        tracing::debug!("Creating ZIP bundle with {} files", files.len());
        let zip_data = bundle(&files)?;

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        storage.write_file(BUNDLE_FILENAME, &zip_data).await?;
        return Ok(vec![format!("{}/{}", output_path, BUNDLE_FILENAME)]);
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, data) in &files {
        tracing::debug!("Writing {} ({} bytes)", name, data.len());
        storage.write_file(name, data).await?;
        written.push(format!("{}/{}", output_path, name));
    }
    Ok(written)
}
