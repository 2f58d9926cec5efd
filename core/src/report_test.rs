#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use anyhow::Result;

    use crate::catalog::{PersistenceVariant, Structure};
    use crate::exec::{ExecutionOutcome, ExitState};
    use crate::invocation::{Invocation, Phase, SweepOptions};
    use crate::report::{InvocationRecord, SweepReport};

    fn sample() -> SweepReport {
        let opts = SweepOptions::default();
        let btree = Structure::new("btree").with_read_only(true);
        let list = Structure::new("list");
        let outcomes = [
            (
                Invocation::read_only(&btree, Phase::ReadOnlyInit, &opts),
                ExitState::Exited { code: 0 },
            ),
            (
                Invocation::persistent(&list, PersistenceVariant::Persistent, Phase::FullInit, &opts),
                ExitState::Exited { code: 2 },
            ),
            (
                Invocation::persistent(&list, PersistenceVariant::PersistentLock, Phase::FullMain, &opts),
                ExitState::Terminated { signal: Some(9) },
            ),
            (
                Invocation::read_only(&btree, Phase::ReadOnlyMain, &opts),
                ExitState::LaunchFailed {
                    error: "No such file or directory (os error 2)".to_string(),
                },
            ),
        ];
        let records = outcomes
            .into_iter()
            .enumerate()
            .map(|(idx, (inv, state))| {
                InvocationRecord::new(
                    idx,
                    &inv,
                    ExecutionOutcome {
                        state,
                        duration: Duration::from_millis(250),
                    },
                )
            })
            .collect();
        SweepReport::new(records)
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.attempted, 4);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.launch_failed, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_failures_excludes_success() {
        let report = sample();
        let failed: Vec<&str> = report.failures().map(|r| r.command.as_str()).collect();
        assert_eq!(failed, vec!["./list_per -i", "./list_per_lock -n 100", "./btree_ro"]);
    }

    #[test]
    fn test_record_fields() {
        let report = sample();
        let record = &report.records[2];
        assert_eq!(record.phase, Phase::FullMain);
        assert_eq!(record.structure, "list");
        assert_eq!(record.variant, Some(PersistenceVariant::PersistentLock));
        assert!((record.duration_ms - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_report_reads_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.json");
        let report = sample();
        report.write_to(&path)?;

        let raw = fs::read_to_string(&path)?;
        assert!(raw.contains("\"state\": \"launch_failed\""));
        assert!(raw.contains("\"variant\": \"_per_lock\""));
        let parsed: SweepReport = serde_json::from_str(&raw)?;
        assert_eq!(parsed, report);
        Ok(())
    }

    #[test]
    fn test_csv_report_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.csv");
        sample().write_to(&path)?;

        let raw = fs::read_to_string(&path)?;
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("sequence,phase,structure"));
        assert_eq!(lines[1], "0,read_only_init,btree,,./btree_ro -i,exited,0,,250.000");
        assert_eq!(lines[3], "2,full_main,list,_per_lock,./list_per_lock -n 100,terminated,,9,250.000");
        assert_eq!(lines[4], "3,read_only_main,btree,,./btree_ro,launch_failed,,,250.000");
        Ok(())
    }

    #[test]
    fn test_csv_quotes_structure_names_with_commas() -> Result<()> {
        let odd = Structure::new("a,b");
        let inv = Invocation::persistent(&odd, PersistenceVariant::Persistent, Phase::FullInit, &SweepOptions::default());
        let report = SweepReport::new(vec![InvocationRecord::new(
            0,
            &inv,
            ExecutionOutcome {
                state: ExitState::Skipped,
                duration: Duration::ZERO,
            },
        )]);

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.csv");
        report.write_csv(&path)?;

        let raw = fs::read_to_string(&path)?;
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines[1], "0,full_init,\"a,b\",_per,\"./a,b_per -i\",skipped,,,0.000");
        Ok(())
    }
}
