//! Scan command implementation.
//!
//! `toolprobe scan` (also the default when no subcommand is given) finds
//! every configured resource, reads its versions, looks up the latest
//! published release, and writes the text report.

use std::path::PathBuf;

use crate::cli::args::ScanArgs;
use crate::config::{ResourceConfig, ScanConfig};
use crate::discovery::{Platform, SystemLocator, VersionExtractor};
use crate::error::{Result, ToolprobeError};
use crate::inventory::{Hierarchy, Inventory, Reconciler, ResourceResult, ScanProgress};
use crate::report::{render_report, save_report, EnvSnapshot};
use crate::ui::{SpinnerHandle, UserInterface};
use crate::upstream::{LatestVersion, UpstreamResolver};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The scan command implementation.
pub struct ScanCommand {
    context: CommandContext,
    args: ScanArgs,
}

impl ScanCommand {
    pub fn new(context: CommandContext, args: ScanArgs) -> Self {
        Self { context, args }
    }

    /// Where the report is written.
    pub fn report_path(&self, config: &ScanConfig) -> PathBuf {
        let file = self
            .args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.settings.report_file));
        self.context.working_dir.join(file)
    }

    /// Whether standard install roots are globbed in this run.
    pub fn include_standard_dirs(&self, config: &ScanConfig) -> bool {
        self.args.standard_dirs || config.settings.search_standard_dirs
    }

    /// Render and save the report, then print what was asked for.
    pub fn write_report(
        &self,
        config: &ScanConfig,
        inventory: &Inventory,
        env: &EnvSnapshot,
        ui: &mut dyn UserInterface,
    ) -> Result<PathBuf> {
        let hierarchy = Hierarchy::build(inventory);
        let lines = render_report(inventory, &hierarchy, env);
        let path = save_report(&lines, &self.report_path(config))?;

        if self.args.json {
            let json = serde_json::to_string_pretty(inventory)
                .map_err(|e| ToolprobeError::Other(e.into()))?;
            ui.output(&json);
            tracing::info!("Report generated: {}", path.display());
        } else {
            if self.args.print {
                ui.output(&lines.join("\n"));
            }
            ui.output(&format!("Report generated: {}", path.display()));
        }

        Ok(path)
    }
}

impl Command for ScanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let include = self.include_standard_dirs(&config);

        let platform = Platform::current();
        let locator = SystemLocator::new(platform, config.standard_dirs.clone());
        let inspector = VersionExtractor::new(platform);
        let resolver = UpstreamResolver::from_settings(&config.settings)?;
        let reconciler = Reconciler::new(&config, &locator, &inspector, &resolver);

        ui.show_header("toolprobe scan");
        if include {
            ui.message("Searching standard install directories, this can take a while");
        }

        let inventory = scan_with_progress(&reconciler, include, ui);
        self.write_report(&config, &inventory, &EnvSnapshot::capture(), ui)?;

        Ok(CommandResult::success())
    }
}

/// Reconcile every configured resource, showing a spinner per resource.
pub fn scan_with_progress(
    reconciler: &Reconciler<'_>,
    include_standard_dirs: bool,
    ui: &mut dyn UserInterface,
) -> Inventory {
    let mut progress = SpinnerProgress { ui, spinner: None };
    reconciler.reconcile_with_progress(include_standard_dirs, &mut progress)
}

struct SpinnerProgress<'u> {
    ui: &'u mut dyn UserInterface,
    spinner: Option<Box<dyn SpinnerHandle>>,
}

impl ScanProgress for SpinnerProgress<'_> {
    fn resource_started(&mut self, resource: &ResourceConfig) {
        self.spinner = Some(self.ui.start_spinner(&format!("Scanning {}", resource.name)));
    }

    fn resource_finished(&mut self, result: &ResourceResult) {
        if let Some(mut spinner) = self.spinner.take() {
            if result.is_empty() {
                spinner.finish_skipped(&format!("{}: not found", result.name));
            } else {
                spinner.finish_success(&summary(result));
            }
        }

        if let LatestVersion::Unavailable { reason } = &result.latest {
            self.ui
                .warning(&format!("{}: latest version unavailable: {}", result.name, reason));
        }
    }
}

fn summary(result: &ResourceResult) -> String {
    let count = result.paths.len();
    let noun = if count == 1 { "path" } else { "paths" };
    match result.latest.version() {
        Some(latest) => format!("{}: {} {} (latest {})", result.name, count, noun, latest),
        None => format!("{}: {} {}", result.name, count, noun),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{Candidate, Inspect, Inspection, Locate, VersionReading};
    use crate::upstream::{ResolveLatest, UpstreamError};
    use crate::ui::MockUI;
    use std::path::Path;
    use tempfile::TempDir;

    struct OneNode;

    impl Locate for OneNode {
        fn locate(&self, name: &str, include_standard_dirs: bool) -> Vec<Candidate> {
            match name {
                "node" if include_standard_dirs => vec![
                    Candidate::on_path("/usr/bin/node"),
                    Candidate::in_standard_dir("/opt/node/bin/node"),
                ],
                "node" => vec![Candidate::on_path("/usr/bin/node")],
                _ => Vec::new(),
            }
        }
    }

    struct AlwaysV18;

    impl Inspect for AlwaysV18 {
        fn inspect(&self, _path: &Path, _version_flag: &str) -> Inspection {
            Inspection {
                executable: true,
                version: Some(VersionReading::Reported {
                    version: "v18.0.0".to_string(),
                }),
            }
        }
    }

    struct Offline;

    impl ResolveLatest for Offline {
        fn fetch_latest(&self, resource: &ResourceConfig) -> LatestVersion {
            LatestVersion::Unavailable {
                reason: UpstreamError::Network {
                    url: resource.url.clone(),
                    message: "offline".to_string(),
                },
            }
        }
    }

    fn config() -> ScanConfig {
        ScanConfig {
            resources: vec![
                ResourceConfig::new("node", "https://nodejs.org/en/"),
                ResourceConfig::new("git", "https://git-scm.com/"),
            ],
            ..Default::default()
        }
    }

    fn scan(config: &ScanConfig, include: bool, ui: &mut MockUI) -> Inventory {
        let reconciler = Reconciler::new(config, &OneNode, &AlwaysV18, &Offline);
        scan_with_progress(&reconciler, include, ui)
    }

    fn command(temp: &TempDir, args: ScanArgs) -> ScanCommand {
        ScanCommand::new(CommandContext::new(temp.path(), None), args)
    }

    #[test]
    fn spinner_per_resource() {
        let config = config();
        let mut ui = MockUI::new();
        scan(&config, false, &mut ui);

        assert_eq!(ui.spinners(), ["Scanning node", "Scanning git"]);
        assert_eq!(
            ui.spinner_results(),
            vec!["success: node: 1 path", "skipped: git: not found"]
        );
        assert!(ui.has_warning("node: latest version unavailable: Error fetching data: offline"));
        assert_eq!(ui.warnings().len(), 2);
    }

    #[test]
    fn progress_scan_tracks_covered_directories() {
        let config = config();
        let mut ui = MockUI::new();
        let inventory = scan(&config, true, &mut ui);

        assert_eq!(inventory.resource("node").unwrap().paths.len(), 2);
        assert!(inventory.covered.contains(Path::new("/opt/node/bin")));
    }

    #[test]
    fn report_path_defaults_to_settings() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, ScanArgs::default());
        assert_eq!(
            cmd.report_path(&config()),
            temp.path().join("resource_report.txt")
        );
    }

    #[test]
    fn report_path_uses_output_flag() {
        let temp = TempDir::new().unwrap();
        let args = ScanArgs {
            output: Some(PathBuf::from("tools.txt")),
            ..Default::default()
        };
        assert_eq!(
            command(&temp, args).report_path(&config()),
            temp.path().join("tools.txt")
        );
    }

    #[test]
    fn standard_dirs_from_flag_or_settings() {
        let temp = TempDir::new().unwrap();
        let mut config = config();
        assert!(!command(&temp, ScanArgs::default()).include_standard_dirs(&config));

        let flagged = ScanArgs {
            standard_dirs: true,
            ..Default::default()
        };
        assert!(command(&temp, flagged).include_standard_dirs(&config));

        config.settings.search_standard_dirs = true;
        assert!(command(&temp, ScanArgs::default()).include_standard_dirs(&config));
    }

    #[test]
    fn writes_report_and_announces_path() {
        let temp = TempDir::new().unwrap();
        let config = config();
        let mut ui = MockUI::new();
        let inventory = scan(&config, false, &mut ui);

        let cmd = command(&temp, ScanArgs::default());
        let env = EnvSnapshot::from_fn(|_| None);
        let path = cmd.write_report(&config, &inventory, &env, &mut ui).unwrap();

        let report = std::fs::read_to_string(&path).unwrap();
        assert!(report.contains("node: "));
        assert!(report.contains("Error fetching data: offline"));
        assert!(report.contains("git: No paths found"));
        assert!(ui.outputs()[0].starts_with("Report generated:"));
    }

    #[test]
    fn print_flag_outputs_report() {
        let temp = TempDir::new().unwrap();
        let config = config();
        let mut ui = MockUI::new();
        let inventory = scan(&config, false, &mut ui);

        let args = ScanArgs {
            print: true,
            ..Default::default()
        };
        let env = EnvSnapshot::from_fn(|_| None);
        command(&temp, args)
            .write_report(&config, &inventory, &env, &mut ui)
            .unwrap();

        assert!(ui.outputs()[0].contains("Environment Variables:"));
        assert!(ui.outputs()[1].starts_with("Report generated:"));
    }

    #[test]
    fn json_flag_outputs_inventory() {
        let temp = TempDir::new().unwrap();
        let config = config();
        let mut ui = MockUI::new();
        let inventory = scan(&config, false, &mut ui);

        let args = ScanArgs {
            json: true,
            ..Default::default()
        };
        let env = EnvSnapshot::from_fn(|_| None);
        command(&temp, args)
            .write_report(&config, &inventory, &env, &mut ui)
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(json["resources"][0]["name"], "node");
        assert_eq!(json["resources"][0]["latest"]["status"], "unavailable");
        assert!(temp.path().join("resource_report.txt").exists());
    }

    #[test]
    fn unwritable_report_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = config();
        let mut ui = MockUI::new();
        let inventory = scan(&config, false, &mut ui);

        let args = ScanArgs {
            output: Some(PathBuf::from("missing/dir/report.txt")),
            ..Default::default()
        };
        let env = EnvSnapshot::from_fn(|_| None);
        let err = command(&temp, args)
            .write_report(&config, &inventory, &env, &mut ui)
            .unwrap_err();

        assert!(matches!(err, ToolprobeError::ReportWrite { .. }));
    }
}
