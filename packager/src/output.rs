//! Progress and summary output for the packager CLI.
//!
//! Progress lines go to an injected writer (stderr in production) so the
//! pipeline can be tested without capturing process output.

use crate::platform::Platform;
use camino::Utf8Path;
use std::io::Write;

/// Write a single line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format the final success message.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use ruplacer_packager::output::success_message;
///
/// let archive = Utf8PathBuf::from("dist/ruplacer-2.1.0-macos.tar.gz");
/// assert_eq!(
///     success_message(&archive),
///     "Created dist/ruplacer-2.1.0-macos.tar.gz"
/// );
/// ```
#[must_use]
pub fn success_message(archive_path: &Utf8Path) -> String {
    format!("Created {archive_path}")
}

/// Planned actions shown by `--dry-run`.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use ruplacer_packager::output::DryRunInfo;
/// use ruplacer_packager::platform::Platform;
///
/// let work_dir = Utf8PathBuf::from("/src/ruplacer");
/// let platform = Platform::from("linux-x86_64");
/// let members = vec!["target/release/ruplacer".to_owned()];
/// let commands = vec!["cargo build --release".to_owned()];
///
/// let info = DryRunInfo {
///     work_dir: &work_dir,
///     product: "ruplacer",
///     version: "2.1.0",
///     platform: &platform,
///     staging_name: "ruplacer-2.1.0-linux-x86_64",
///     archive_path: "dist/ruplacer-2.1.0-linux-x86_64.tar.gz",
///     members: &members,
///     commands: &commands,
///     checksum: false,
/// };
///
/// let text = info.display_text();
/// assert!(text.contains("Dry run"));
/// assert!(text.contains("cargo build --release"));
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Directory the pipeline runs in.
    pub work_dir: &'a Utf8Path,
    /// Product name used for the binary and archive.
    pub product: &'a str,
    /// Release version string.
    pub version: &'a str,
    /// Resolved platform.
    pub platform: &'a Platform,
    /// Name of the staging directory.
    pub staging_name: &'a str,
    /// Final archive location relative to the working directory.
    pub archive_path: &'a str,
    /// Source paths of the manifest members.
    pub members: &'a [String],
    /// External commands in execution order.
    pub commands: &'a [String],
    /// Whether a checksum sidecar would be written.
    pub checksum: bool,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Working directory: {}", self.work_dir),
            format!("Product: {}", self.product),
            format!("Version: {}", self.version),
            format!("Platform: {}", self.platform),
            format!("Archive format: {}", self.platform.archive_format()),
            format!("Staging directory: {}", self.staging_name),
            format!("Archive: {}", self.archive_path),
            format!("Checksum: {}", self.checksum),
            String::new(),
            "Files to package:".to_owned(),
        ];
        lines.extend(self.members.iter().map(|member| format!("  - {member}")));

        lines.push(String::new());
        if self.commands.is_empty() {
            lines.push("Commands to run: none".to_owned());
        } else {
            lines.push("Commands to run:".to_owned());
            lines.extend(self.commands.iter().map(|command| format!("  :: {command}")));
        }

        lines.join("\n")
    }
}
