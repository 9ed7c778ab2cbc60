//! Behaviour-driven tests for the release pipeline.
//!
//! Cargo is replaced by a `StubExecutor`; a succeeding build is simulated by
//! writing the binary into `target/release/` before the pipeline runs.

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use ruplacer_packager::builder::{BuildConfig, CargoReleaseBuilder};
use ruplacer_packager::config::PipelineConfig;
use ruplacer_packager::error::PackagerError;
use ruplacer_packager::pipeline::{PipelineOutcome, execute, resolve_release_for_host};
use ruplacer_packager::platform::PlatformSource;
use ruplacer_packager::release::manifest::binary_source_path;
use ruplacer_packager::release::naming::Version;
use ruplacer_packager::test_utils::{ExpectedCall, StubExecutor, write_text_inputs};
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ReleaseWorld {
    checkout: Option<TempDir>,
    version: String,
    host_os: Option<String>,
    platform: Option<String>,
    build_succeeds: bool,
    result: Option<Result<PipelineOutcome, PackagerError>>,
    progress: String,
}

impl ReleaseWorld {
    fn root(&self) -> Utf8PathBuf {
        let checkout = self.checkout.as_ref().expect("checkout not created");
        Utf8PathBuf::try_from(checkout.path().to_owned()).expect("utf8 temp path")
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig::new(
            self.root(),
            Version::try_from(self.version.as_str()).expect("valid version"),
        )
        .with_platform_source(PlatformSource::from_option(self.platform.clone()))
    }

    fn outcome(&self) -> &PipelineOutcome {
        match self.result.as_ref().expect("pipeline has not run") {
            Ok(outcome) => outcome,
            Err(err) => panic!("pipeline failed: {err}"),
        }
    }

    fn error(&self) -> &PackagerError {
        match self.result.as_ref().expect("pipeline has not run") {
            Ok(outcome) => panic!("pipeline unexpectedly succeeded: {outcome:?}"),
            Err(err) => err,
        }
    }

    fn package_once(&mut self) {
        let config = self.config();
        let host_os = self.host_os.clone().unwrap_or_else(|| "linux".to_owned());
        let resolved = match resolve_release_for_host(&config, &host_os) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.result = Some(Err(err));
                return;
            }
        };

        let mut calls = Vec::new();
        if self.build_succeeds {
            let binary = binary_source_path(&resolved.release.binary_filename());
            write_binary(&self.root(), &binary);
            calls.push(ExpectedCall::succeeding("cargo", vec!["build", "--release"]));
        } else {
            calls.push(ExpectedCall::failing(
                "cargo",
                vec!["build", "--release"],
                "error: could not compile `ruplacer`",
            ));
        }
        if resolved.secondary_package {
            calls.push(ExpectedCall::succeeding(
                "cargo",
                vec!["install", "cargo-deb", "--force"],
            ));
            calls.push(ExpectedCall::succeeding("cargo", vec!["deb"]));
        }

        let executor = StubExecutor::new(calls);
        let builder = CargoReleaseBuilder::new(&executor, BuildConfig::default());
        let mut progress = Vec::new();
        self.result = Some(execute(&config, &resolved, &builder, &executor, &mut progress));
        self.progress.push_str(&String::from_utf8_lossy(&progress));
    }

    fn archive_names(&self) -> Vec<String> {
        let archive = &self.outcome().archive_path;
        let file = fs::File::open(archive).expect("open archive");
        if archive.extension() == Some("zip") {
            let zip = zip::ZipArchive::new(file).expect("read zip");
            zip.file_names().map(str::to_owned).collect()
        } else {
            let mut tar = tar::Archive::new(GzDecoder::new(file));
            tar.entries()
                .expect("entries")
                .map(|entry| {
                    let entry = entry.expect("entry");
                    entry.path().expect("path").to_string_lossy().into_owned()
                })
                .collect()
        }
    }

    fn dist_archives(&self) -> usize {
        let dist = self.root().join("dist");
        if !dist.is_dir() {
            return 0;
        }
        fs::read_dir(dist).expect("read dist").count()
    }
}

fn write_binary(root: &Utf8Path, relative: &Utf8Path) {
    let path = root.join(relative);
    let parent = path.parent().expect("binary has a parent directory");
    fs::create_dir_all(parent).expect("create target/release");
    fs::write(path, b"\x7fELF fake binary").expect("write binary");
}

#[fixture]
fn world() -> ReleaseWorld {
    ReleaseWorld::default()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a ruplacer checkout")]
fn given_checkout(world: &mut ReleaseWorld) {
    let checkout = TempDir::new().expect("temp dir");
    world.checkout = Some(checkout);
    let root = world.root();
    write_text_inputs(&root);
    fs::write(
        root.join("Cargo.toml"),
        "[package]\nname = \"ruplacer\"\nversion = \"0.10.0\"\n",
    )
    .expect("write Cargo.toml");
}

#[given("the release version \"{version}\"")]
fn given_version(world: &mut ReleaseWorld, version: String) {
    world.version = version;
}

#[given("the host operating system \"{os}\"")]
fn given_host_os(world: &mut ReleaseWorld, os: String) {
    world.host_os = Some(os);
}

#[given("the explicit platform \"{platform}\"")]
fn given_explicit_platform(world: &mut ReleaseWorld, platform: String) {
    world.platform = Some(platform);
}

#[given("the release build succeeds")]
fn given_build_succeeds(world: &mut ReleaseWorld) {
    world.build_succeeds = true;
}

#[given("the release build fails")]
fn given_build_fails(world: &mut ReleaseWorld) {
    world.build_succeeds = false;
}

#[when("the release is packaged")]
fn when_packaged(world: &mut ReleaseWorld) {
    world.package_once();
}

#[when("the release is packaged twice")]
fn when_packaged_twice(world: &mut ReleaseWorld) {
    world.package_once();
    assert!(
        world.result.as_ref().is_some_and(Result::is_ok),
        "first run failed"
    );
    world.package_once();
}

#[then("the archive \"{path}\" exists")]
fn then_archive_exists(world: &mut ReleaseWorld, path: String) {
    let expected = world.root().join(path);
    assert_eq!(world.outcome().archive_path, expected);
    assert!(expected.is_file(), "{expected} does not exist");
}

#[then("the archive contains \"{name}\"")]
fn then_archive_contains(world: &mut ReleaseWorld, name: String) {
    let names = world.archive_names();
    assert!(names.contains(&name), "{name} not in {names:?}");
}

#[then("the Debian package step runs")]
fn then_deb_runs(world: &mut ReleaseWorld) {
    assert!(world.outcome().secondary_packaged);
    assert!(world.progress.contains(":: cargo install cargo-deb --force"));
    assert!(world.progress.contains(":: cargo deb"));
}

#[then("no Debian package step runs")]
fn then_no_deb(world: &mut ReleaseWorld) {
    assert!(!world.outcome().secondary_packaged);
    assert!(!world.progress.contains("cargo deb"));
}

#[then("packaging fails with a command failure")]
fn then_command_failure(world: &mut ReleaseWorld) {
    let err = world.error();
    assert!(
        matches!(err, PackagerError::CommandFailed { .. }),
        "expected CommandFailed, got {err:?}"
    );
}

#[then("packaging fails with an unsupported platform error")]
fn then_unsupported_platform(world: &mut ReleaseWorld) {
    let err = world.error();
    assert!(
        matches!(err, PackagerError::UnsupportedPlatform { .. }),
        "expected UnsupportedPlatform, got {err:?}"
    );
}

#[then("no staged binary exists")]
fn then_no_staged_binary(world: &mut ReleaseWorld) {
    let staged = world.root().join("ruplacer-2.1.0-macos").join("ruplacer");
    assert!(!staged.exists(), "{staged} should not exist");
}

#[then("the dist directory holds no archive")]
fn then_dist_empty(world: &mut ReleaseWorld) {
    assert_eq!(world.dist_archives(), 0);
}

#[then("the dist directory holds exactly one archive")]
fn then_dist_single(world: &mut ReleaseWorld) {
    assert_eq!(world.dist_archives(), 1);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/release.feature",
    name = "Linux release publishes a tarball and a Debian package"
)]
fn scenario_linux_release(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Windows release publishes a zip with an executable"
)]
fn scenario_windows_release(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "macOS release publishes a tarball without a Debian package"
)]
fn scenario_macos_release(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "A failed build publishes nothing"
)]
fn scenario_failed_build(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "Packaging the same release twice succeeds"
)]
fn scenario_idempotent_release(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/release.feature",
    name = "An unsupported host is rejected"
)]
fn scenario_unsupported_host(world: ReleaseWorld) {
    let _ = world;
}
