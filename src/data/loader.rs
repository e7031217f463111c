use std::path::Path;

use anyhow::{Context, Result};

use super::error::AnalysisError;
use super::model::{RawSample, RecordSet};

/// Names given, positionally, to the first four columns of a measurement file.
pub const COLUMN_NAMES: [&str; 4] = ["frequency_hz", "bias_v", "cp_farad", "rp_ohm"];

// ---------------------------------------------------------------------------
// SourceFile – decoded file content handed to the core
// ---------------------------------------------------------------------------

/// A measurement file's display name and decoded text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a file from disk. The display name is the file name without
    /// its directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, text))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a tab-separated measurement file into a [`RecordSet`].
///
/// Layout (Agilent LCR export):
/// ```text
/// ! comment lines start with '!'
/// Freq(Hz)   DCB(V)   Cp(F)      Rp(Ohm)   [extra columns ignored]
/// 1.0e6      0        1.0e-11    1.2e6
/// ```
/// The header row determines the column count. Only the first four columns
/// are kept and every one of their cells must be a finite number.
pub fn parse_record_set(source: &SourceFile) -> Result<RecordSet, AnalysisError> {
    let name = source.name.as_str();
    let malformed = |reason: String| AnalysisError::MalformedFile {
        file: name.to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'!'))
        .has_headers(true)
        .flexible(true)
        .from_reader(source.text.as_bytes());

    let n_columns = reader
        .headers()
        .map_err(|e| malformed(format!("cannot read header: {e}")))?
        .len();
    if n_columns < COLUMN_NAMES.len() {
        return Err(malformed(format!(
            "expected at least {} columns, found {n_columns}",
            COLUMN_NAMES.len()
        )));
    }

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| malformed(format!("cannot parse row: {e}")))?;
        if is_blank_or_comment(&record) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut values = [0.0; 4];
        for (col, slot) in values.iter_mut().enumerate() {
            let cell = record.get(col).unwrap_or("");
            *slot = parse_cell(cell).ok_or_else(|| AnalysisError::NonNumericData {
                file: name.to_string(),
                line,
                column: COLUMN_NAMES[col],
                value: cell.to_string(),
            })?;
        }
        let [frequency_hz, bias_v, cp_farad, rp_ohm] = values;
        samples.push(RawSample {
            frequency_hz,
            bias_v,
            cp_farad,
            rp_ohm,
        });
    }

    if samples.is_empty() {
        return Err(malformed("no data rows".into()));
    }

    log::debug!("{name}: parsed {} samples ({n_columns} columns)", samples.len());
    Ok(RecordSet {
        name: name.to_string(),
        samples,
    })
}

/// Whitespace-only lines and comments indented past column 0 carry no data.
fn is_blank_or_comment(record: &csv::StringRecord) -> bool {
    let first = record.get(0).unwrap_or("").trim_start();
    first.starts_with('!') || record.iter().all(|cell| cell.trim().is_empty())
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::ErrorKind;

    fn parse(text: &str) -> Result<RecordSet, AnalysisError> {
        parse_record_set(&SourceFile::new("sample.txt", text))
    }

    #[test]
    fn keeps_first_four_columns_and_skips_comments() {
        let text = "! Agilent 4294A\n\
                    ! second comment\n\
                    Freq\tDCB\tCp\tRp\tD\tExtra\n\
                    1e6\t0\t1e-11\t1e6\t0.01\tfoo\n\
                    1e6\t1.5\t9e-12\t1.1e6\t0.02\tbar\n";
        let rs = parse(text).unwrap();
        assert_eq!(rs.name, "sample.txt");
        assert_eq!(rs.len(), 2);
        assert_eq!(
            rs.samples[1],
            RawSample {
                frequency_hz: 1e6,
                bias_v: 1.5,
                cp_farad: 9e-12,
                rp_ohm: 1.1e6,
            }
        );
    }

    #[test]
    fn trims_cells() {
        let rs = parse("F\tV\tC\tR\n 1e6 \t -2 \t1e-11\t 5\n").unwrap();
        assert_eq!(rs.samples[0].bias_v, -2.0);
        assert_eq!(rs.samples[0].rp_ohm, 5.0);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let rs = parse("F\tV\tC\tR\n1e6\t0\t1e-11\t1e6\n   \n\t \n").unwrap();
        assert_eq!(rs.len(), 1);
    }

    #[test]
    fn indented_comment_lines_are_skipped() {
        let text = "F\tV\tC\tR\n1e6\t0\t1e-11\t1e6\n  ! end of sweep\n1e6\t1\t9e-12\t1e6\n";
        let rs = parse(text).unwrap();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.samples[1].bias_v, 1.0);
    }

    #[test]
    fn too_few_columns_is_malformed() {
        let err = parse("F\tV\tC\n1e6\t0\t1e-11\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert_eq!(err.file(), Some("sample.txt"));
    }

    #[test]
    fn empty_file_is_malformed() {
        assert_eq!(parse("").unwrap_err().kind(), ErrorKind::MalformedFile);
        assert_eq!(
            parse("! only a comment\nF\tV\tC\tR\n").unwrap_err().kind(),
            ErrorKind::MalformedFile
        );
    }

    #[test]
    fn text_cell_is_non_numeric() {
        let err = parse("F\tV\tC\tR\n1e6\t0\t1e-11\t1e6\n1e6\tabc\t1e-11\t1e6\n").unwrap_err();
        match err {
            AnalysisError::NonNumericData { column, value, .. } => {
                assert_eq!(column, "bias_v");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_or_non_finite_cells_are_non_numeric() {
        let short_row = parse("F\tV\tC\tR\n1e6\t0\t1e-11\n").unwrap_err();
        assert_eq!(short_row.kind(), ErrorKind::NonNumericData);

        let nan = parse("F\tV\tC\tR\n1e6\t0\tNaN\t1e6\n").unwrap_err();
        assert_eq!(nan.kind(), ErrorKind::NonNumericData);

        let inf = parse("F\tV\tC\tR\ninf\t0\t1e-11\t1e6\n").unwrap_err();
        assert_eq!(inf.kind(), ErrorKind::NonNumericData);
    }

    #[test]
    fn reads_from_disk_with_file_name() {
        let path = std::env::temp_dir().join("cv_tunability_loader_test.txt");
        std::fs::write(&path, "F\tV\tC\tR\n1e6\t0\t1e-11\t1e6\n").unwrap();
        let source = SourceFile::from_path(&path).unwrap();
        assert_eq!(source.name, "cv_tunability_loader_test.txt");
        assert_eq!(parse_record_set(&source).unwrap().len(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
