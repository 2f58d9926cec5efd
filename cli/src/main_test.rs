#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_cli_args_defaults() {
        let args = CliArgs::try_parse_from(["sanity-sweep"]).expect("should parse");
        assert!(args.config.is_none());
        assert!(args.bin_dir.is_none());
        assert!(!args.dry_run);
        let config = load_config(&args).expect("default config");
        assert_eq!(config.options().bin_dir, PathBuf::from("."));
        assert_eq!(config.options().list_iterations, 100);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sweep.toml");
        std::fs::write(&path, "bin_dir = \"from-file\"\nlist_iterations = 3\n").expect("write config");

        let args = CliArgs::try_parse_from([
            "sanity-sweep",
            "--config",
            path.to_str().unwrap(),
            "--iterations",
            "42",
        ])
        .expect("should parse");
        let options = load_config(&args).expect("config").options();
        assert_eq!(options.bin_dir, PathBuf::from("from-file"));
        assert_eq!(options.list_iterations, 42);

        let args = CliArgs::try_parse_from(["sanity-sweep", "--config", path.to_str().unwrap(), "--bin-dir", "out"])
            .expect("should parse");
        assert_eq!(load_config(&args).expect("config").options().bin_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_iterations() {
        assert!(CliArgs::try_parse_from(["sanity-sweep", "--iterations", "many"]).is_err());
    }

    #[test]
    fn test_trace_setting_from_env_value() {
        assert_eq!(trace_setting("1"), TraceSetting::On);
        assert_eq!(trace_setting(" TRUE "), TraceSetting::On);
        assert_eq!(trace_setting("off"), TraceSetting::Off);
        assert_eq!(trace_setting("  "), TraceSetting::Off);
        assert_eq!(
            trace_setting("sweep_core=debug"),
            TraceSetting::Filter("sweep_core=debug".to_string())
        );
    }
}
