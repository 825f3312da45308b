//! Upgrade command implementation.
//!
//! `toolprobe upgrade` offers, resource by resource, to run the configured
//! upgrade command.

use std::process::{Command as ProcessCommand, Stdio};

use crate::cli::args::UpgradeArgs;
use crate::config::ResourceConfig;
use crate::error::{Result, ToolprobeError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The upgrade command implementation.
pub struct UpgradeCommand {
    context: CommandContext,
    args: UpgradeArgs,
}

impl UpgradeCommand {
    pub fn new(context: CommandContext, args: UpgradeArgs) -> Self {
        Self { context, args }
    }

    /// Resources named on the command line, or all of them.
    fn select<'c>(
        &self,
        resources: &'c [ResourceConfig],
    ) -> std::result::Result<Vec<&'c ResourceConfig>, String> {
        if self.args.resources.is_empty() {
            return Ok(resources.iter().collect());
        }

        self.args
            .resources
            .iter()
            .map(|name| {
                resources
                    .iter()
                    .find(|r| &r.name == name)
                    .ok_or_else(|| name.clone())
            })
            .collect()
    }

    /// Offer one upgrade. Returns `false` if the upgrade ran and failed.
    fn offer(&self, resource: &ResourceConfig, ui: &mut dyn UserInterface) -> Result<bool> {
        if resource.upgrade.is_empty() {
            ui.message(&format!("{}: no upgrade command configured", resource.name));
            return Ok(true);
        }

        let accepted = self.args.yes
            || ui.confirm(
                &format!("upgrade_{}", resource.name),
                &format!("Would you like to update {}?", resource.name),
            )?;

        if !accepted {
            ui.message(&format!("{} update skipped.", resource.name));
            return Ok(true);
        }

        tracing::info!("Upgrading {}: {}", resource.name, resource.upgrade.join(" "));
        match run_upgrade(&resource.upgrade) {
            Ok(()) => {
                ui.success(&format!("{} has been updated successfully.", resource.name));
                Ok(true)
            }
            Err(e) => {
                ui.error(&format!("{} update failed: {}", resource.name, e));
                Ok(false)
            }
        }
    }
}

impl Command for UpgradeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;

        let selected = match self.select(&config.resources) {
            Ok(selected) => selected,
            Err(unknown) => {
                ui.error(&format!("Unknown resource: {}", unknown));
                return Ok(CommandResult::failure(2));
            }
        };

        ui.show_header("toolprobe upgrade");

        let mut all_ok = true;
        for resource in selected {
            all_ok &= self.offer(resource, ui)?;
        }

        if all_ok {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

/// Run an upgrade command with inherited stdio, waiting for it to finish.
pub fn run_upgrade(argv: &[String]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ToolprobeError::ConfigValidationError {
            message: "upgrade command is empty".to_string(),
        })?;

    let status = ProcessCommand::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            tracing::debug!("Failed to start {}: {}", program, e);
            ToolprobeError::CommandFailed {
                command: argv.join(" "),
                code: None,
            }
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ToolprobeError::CommandFailed {
            command: argv.join(" "),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("toolprobe.yml"), config).unwrap();
        temp
    }

    fn run(temp: &TempDir, args: UpgradeArgs, ui: &mut MockUI) -> CommandResult {
        UpgradeCommand::new(CommandContext::new(temp.path(), None), args)
            .execute(ui)
            .unwrap()
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = run_upgrade(&[]).unwrap_err();
        assert!(matches!(err, ToolprobeError::ConfigValidationError { .. }));
    }

    #[test]
    fn missing_program_is_command_failure() {
        let err = run_upgrade(&argv(&["toolprobe-no-such-program-xyz"])).unwrap_err();
        assert!(matches!(err, ToolprobeError::CommandFailed { code: None, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_reported() {
        let err = run_upgrade(&argv(&["sh", "-c", "exit 3"])).unwrap_err();
        match err {
            ToolprobeError::CommandFailed { command, code } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn successful_command() {
        assert!(run_upgrade(&argv(&["true"])).is_ok());
    }

    #[test]
    fn declined_upgrade_is_skipped() {
        let temp = setup_project(
            "resources:\n  - name: git\n    url: https://git-scm.com/\n    upgrade: [git, self-update]\n",
        );
        let mut ui = MockUI::new();
        let result = run(&temp, UpgradeArgs::default(), &mut ui);

        assert!(result.success);
        assert_eq!(ui.prompts_shown(), ["upgrade_git".to_string()]);
        assert!(ui.has_message("git update skipped."));
    }

    #[test]
    fn resource_without_command_is_not_offered() {
        let temp = setup_project("resources:\n  - name: java\n    url: https://www.java.com/\n");
        let mut ui = MockUI::new();
        let result = run(&temp, UpgradeArgs::default(), &mut ui);

        assert!(result.success);
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_message("no upgrade command configured"));
    }

    #[test]
    fn unknown_resource_fails() {
        let temp = setup_project("resources:\n  - name: git\n    url: https://git-scm.com/\n");
        let mut ui = MockUI::new();
        let args = UpgradeArgs {
            resources: vec!["rust".to_string()],
            yes: false,
        };
        let result = run(&temp, args, &mut ui);

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Unknown resource: rust"));
    }

    #[cfg(unix)]
    #[test]
    fn accepted_upgrade_runs() {
        let temp = setup_project(
            "resources:\n  - name: tool\n    url: https://example.com/\n    upgrade: [\"true\"]\n",
        );
        let mut ui = MockUI::new();
        ui.set_confirm_response("upgrade_tool", true);
        let result = run(&temp, UpgradeArgs::default(), &mut ui);

        assert!(result.success);
        assert!(ui.has_success("tool has been updated successfully."));
    }

    #[cfg(unix)]
    #[test]
    fn yes_flag_skips_prompt_and_reports_failure() {
        let temp = setup_project(
            "resources:\n  - name: tool\n    url: https://example.com/\n    upgrade: [sh, -c, \"exit 4\"]\n",
        );
        let mut ui = MockUI::new();
        let args = UpgradeArgs {
            resources: vec!["tool".to_string()],
            yes: true,
        };
        let result = run(&temp, args, &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_error("tool update failed"));
    }
}
