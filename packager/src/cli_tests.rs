//! Tests for packager CLI parsing and configuration mapping.

use super::*;
use crate::error::PackagerError;
use rstest::rstest;

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["ruplacer-package", "--version", "2.1.0"]);
    assert_eq!(cli.version, "2.1.0");
    assert!(cli.platform.is_none());
    assert!(cli.product.is_none());
    assert!(cli.work_dir.is_none());
    assert!(!cli.deb);
    assert!(!cli.no_deb);
    assert!(!cli.skip_build);
    assert!(!cli.checksum);
    assert!(!cli.dry_run);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn version_is_required() {
    let err = Cli::try_parse_from(["ruplacer-package"]).expect_err("missing --version");
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn version_flag_takes_a_value() {
    let err = Cli::try_parse_from(["ruplacer-package", "--version"])
        .expect_err("--version needs a value");
    assert_ne!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn cli_parses_platform_and_work_dir() {
    let cli = Cli::parse_from([
        "ruplacer-package",
        "--version",
        "2.1.0",
        "--platform",
        "windows",
        "-C",
        "/src/ruplacer",
    ]);
    assert_eq!(cli.platform.as_deref(), Some("windows"));
    assert_eq!(cli.work_dir, Some(Utf8PathBuf::from("/src/ruplacer")));
}

#[rstest]
#[case::single(&["-v"], 1)]
#[case::double(&["-vv"], 2)]
#[case::long(&["--verbose", "--verbose"], 2)]
fn cli_counts_verbosity(#[case] flags: &[&str], #[case] expected: u8) {
    let mut args = vec!["ruplacer-package", "--version", "2.1.0"];
    args.extend_from_slice(flags);
    let cli = Cli::parse_from(args);
    assert_eq!(cli.verbosity, expected);
}

#[test]
fn quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["ruplacer-package", "--version", "1", "-q", "-v"]);
    assert!(result.is_err());
}

#[test]
fn deb_conflicts_with_no_deb() {
    let result = Cli::try_parse_from(["ruplacer-package", "--version", "1", "--deb", "--no-deb"]);
    assert!(result.is_err());
}

#[rstest]
#[case::neither(false, false, None)]
#[case::forced_on(true, false, Some(true))]
#[case::forced_off(false, true, Some(false))]
fn secondary_package_override_follows_flags(
    #[case] deb: bool,
    #[case] no_deb: bool,
    #[case] expected: Option<bool>,
) {
    let cli = Cli {
        deb,
        no_deb,
        ..Cli::default()
    };
    assert_eq!(cli.secondary_package_override(), expected);
}

#[rstest]
#[case::default(None, "/home/ci/ruplacer")]
#[case::relative(Some("checkout"), "/home/ci/ruplacer/checkout")]
#[case::absolute(Some("/src/ruplacer"), "/src/ruplacer")]
fn work_dir_is_resolved_against_cwd(#[case] work_dir: Option<&str>, #[case] expected: &str) {
    let cli = Cli {
        work_dir: work_dir.map(Utf8PathBuf::from),
        ..Cli::default()
    };
    assert_eq!(
        cli.resolve_work_dir(Utf8Path::new("/home/ci/ruplacer")),
        Utf8PathBuf::from(expected)
    );
}

#[test]
fn to_config_maps_every_flag() {
    let cli = Cli::parse_from([
        "ruplacer-package",
        "--version",
        "2.1.0",
        "--platform",
        "linux-x86_64",
        "--product",
        "ruplacer",
        "--deb",
        "--skip-build",
        "--checksum",
        "--dry-run",
        "-vv",
    ]);
    let config = cli.to_config(Utf8Path::new("/src")).expect("valid config");

    assert_eq!(config.version().as_str(), "2.1.0");
    assert_eq!(
        config.platform_source(),
        &PlatformSource::Explicit("linux-x86_64".to_owned())
    );
    assert_eq!(config.resolve_product().expect("product"), "ruplacer");
    assert!(config.secondary_package_enabled());
    assert!(config.skip_build());
    assert!(config.checksum());
    assert!(config.dry_run());
    assert_eq!(config.verbosity(), 2);
    assert_eq!(config.work_dir(), Utf8Path::new("/src"));
}

#[test]
fn to_config_rejects_blank_version() {
    let cli = Cli::parse_from(["ruplacer-package", "--version", " "]);
    let err = cli.to_config(Utf8Path::new("/src")).expect_err("blank version");
    assert!(matches!(err, PackagerError::InvalidVersion));
}
