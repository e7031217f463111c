use std::path::PathBuf;

use super::aggregate::per_volt_stats;
use super::config::AnalysisConfig;
use super::error::AnalysisError;
use super::loader::{parse_record_set, SourceFile};
use super::model::{AnalysisReport, FrequencyProfile, GlobalFrequencyCheck, RecordSet};
use super::tunability::compute_curve;

/// Runs the validation → tunability → per-volt aggregation chain over one
/// batch of files.
///
/// The first fatal error aborts the run; no partial report is produced.
/// A cross-file frequency mismatch is only recorded as a warning.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run(&self, sources: &[SourceFile]) -> Result<AnalysisReport, AnalysisError> {
        if sources.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }
        let tol = self.config.tol_freq_rel;

        let mut record_sets: Vec<RecordSet> = Vec::with_capacity(sources.len());
        let mut profiles: Vec<FrequencyProfile> = Vec::with_capacity(sources.len());
        for source in sources {
            let records = parse_record_set(source)?;
            let profile = FrequencyProfile::from_record_set(&records, tol)?;
            log::debug!(
                "{}: {} samples at {:.3e} Hz (spread {:.1e})",
                records.name,
                records.len(),
                profile.f_mean,
                profile.relative_spread()
            );
            record_sets.push(records);
            profiles.push(profile);
        }

        let global = GlobalFrequencyCheck::from_profiles(&profiles).ok_or(AnalysisError::EmptyBatch)?;
        let names: Vec<&str> = record_sets.iter().map(|r| r.name.as_str()).collect();
        let warnings: Vec<_> = global.warning(tol, &names, &profiles).into_iter().collect();
        for warning in &warnings {
            log::warn!("{warning}");
        }

        let curves = record_sets
            .iter()
            .map(compute_curve)
            .collect::<Result<Vec<_>, _>>()?;
        let per_volt = per_volt_stats(&curves, &self.config.target_voltages);

        log::info!(
            "Analysed {} files at {:.3e} Hz, {} target voltages",
            curves.len(),
            global.f_ref,
            per_volt.len()
        );

        Ok(AnalysisReport {
            f_ref: global.f_ref,
            curves,
            per_volt,
            warnings,
            config: self.config.clone(),
        })
    }

    /// Read the files from disk, then [`run`](Self::run) them. I/O failures
    /// and analysis errors both surface through `anyhow`; the latter can be
    /// recovered with `downcast_ref::<AnalysisError>()`.
    pub fn run_paths(&self, paths: &[PathBuf]) -> anyhow::Result<AnalysisReport> {
        let sources = paths
            .iter()
            .map(|p| SourceFile::from_path(p))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(self.run(&sources)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::{AnalysisWarning, ErrorKind};

    const HEADER: &str = "! Agilent 4294A export\nFreq(Hz)\tDCB(V)\tCp(F)\tRp(Ohm)\n";

    /// Build a file from `(bias V, Cp pF)` pairs at a constant frequency.
    fn file(name: &str, freq: f64, points: &[(f64, f64)]) -> SourceFile {
        let mut text = HEADER.to_string();
        for &(bias, cp_pf) in points {
            text.push_str(&format!("{freq:e}\t{bias}\t{:e}\t1e6\n", cp_pf * 1e-12));
        }
        SourceFile::new(name, text)
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn two_files_aggregate_at_five_volts() {
        let sources = [
            file("a.txt", 1e6, &[(0.0, 10.0), (5.0, 9.0)]),
            file("b.txt", 1e6, &[(5.0, 8.5), (0.0, 10.0)]),
        ];
        let report = pipeline().run(&sources).unwrap();

        assert!(!report.has_warnings());
        assert!((report.f_ref - 1e6).abs() < 1e-6);
        assert_eq!(report.curves.len(), 2);
        assert_eq!(report.curves[1].name, "b.txt");
        assert_eq!(report.curves[1].points[0].bias_v, 0.0);
        assert_eq!(report.curves[1].points[0].tune_pct, 0.0);
        assert_eq!(report.per_volt.len(), 24);

        let at_5 = report.per_volt.iter().find(|s| s.voltage == 5).unwrap();
        assert!((at_5.mean_tune_per_v - 2.5).abs() < 1e-9);
        assert!((at_5.std_tune_per_v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn malformed_second_file_aborts_whole_batch() {
        let bad = SourceFile::new("file2.txt", "Freq\tDCB\tCp\n1e6\t0\t1e-11\n");
        let sources = [
            file("file1.txt", 1e6, &[(0.0, 10.0), (1.0, 9.0)]),
            bad,
            file("file3.txt", 1e6, &[(0.0, 10.0), (1.0, 9.0)]),
        ];
        let err = pipeline().run(&sources).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert_eq!(err.file(), Some("file2.txt"));
    }

    #[test]
    fn first_fatal_error_wins() {
        let sources = [
            file("ok.txt", 1e6, &[(0.0, 10.0), (1.0, 9.0)]),
            file("no_zero.txt", 1e6, &[(-0.001, 10.0), (1.0, 9.0), (2.0, 8.0)]),
            SourceFile::new("garbage.txt", "a\tb\n"),
        ];
        // Parsing and frequency checks run on every file before any curve
        // is computed, so the structural error in file 3 is reported first.
        let err = pipeline().run(&sources).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert_eq!(err.file(), Some("garbage.txt"));
    }

    #[test]
    fn missing_zero_bias_aborts() {
        let sources = [
            file("ok.txt", 1e6, &[(0.0, 10.0), (1.0, 9.0)]),
            file("no_zero.txt", 1e6, &[(-0.001, 10.0), (1.0, 9.0), (2.0, 8.0)]),
        ];
        let err = pipeline().run(&sources).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingZeroBiasPoint {
                file: "no_zero.txt".into()
            }
        );
    }

    #[test]
    fn intra_file_drift_aborts() {
        let mut text = HEADER.to_string();
        text.push_str("1e6\t0\t1e-11\t1e6\n1.01e6\t1\t9e-12\t1e6\n");
        let sources = [SourceFile::new("drift.txt", text)];
        let err = pipeline().run(&sources).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FrequencyDrift);
    }

    #[test]
    fn cross_file_mismatch_warns_but_produces_both_series() {
        let sources = [
            file("a.txt", 100.0, &[(0.0, 10.0), (1.0, 9.0)]),
            file("b.txt", 100.5, &[(0.0, 10.0), (1.0, 9.5)]),
            file("c.txt", 99.9, &[(0.0, 10.0), (1.0, 9.2)]),
        ];
        let report = pipeline().run(&sources).unwrap();
        assert_eq!(report.curves.len(), 3);
        assert_eq!(report.per_volt.len(), 24);
        assert_eq!(report.warnings.len(), 1);
        let AnalysisWarning::CrossFileFrequencyMismatch {
            max_rel_deviation,
            tolerance,
            ..
        } = &report.warnings[0];
        assert!(*max_rel_deviation > *tolerance);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(pipeline().run(&[]).unwrap_err(), AnalysisError::EmptyBatch);
    }

    #[test]
    fn custom_target_voltages() {
        let config = AnalysisConfig {
            target_voltages: vec![2, 4],
            ..Default::default()
        };
        let sources = [file("a.txt", 1e6, &[(0.0, 10.0), (2.0, 9.0), (4.0, 8.0)])];
        let report = Pipeline::new(config).unwrap().run(&sources).unwrap();
        let volts: Vec<u32> = report.per_volt.iter().map(|s| s.voltage).collect();
        assert_eq!(volts, vec![2, 4]);
        assert!((report.per_volt[1].mean_tune_per_v - 5.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnalysisConfig {
            target_voltages: vec![0],
            ..Default::default()
        };
        assert_eq!(
            Pipeline::new(config).unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );
    }

    #[test]
    fn run_paths_reads_from_disk() {
        let dir = std::env::temp_dir().join("cv_tunability_pipeline_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("disk.txt");
        std::fs::write(&path, &file("disk.txt", 1e6, &[(0.0, 10.0), (3.0, 7.0)]).text).unwrap();

        let report = pipeline().run_paths(&[path.clone()]).unwrap();
        assert_eq!(report.curves[0].name, "disk.txt");

        let missing = pipeline().run_paths(&[dir.join("missing.txt")]);
        assert!(missing.is_err());

        let err = pipeline().run_paths(&[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::EmptyBatch)
        );
        let _ = std::fs::remove_file(&path);
    }
}
