//! Config command implementation.
//!
//! The `toolprobe config` command shows the resolved configuration.

use crate::cli::args::ConfigArgs;
use crate::config::ConfigPaths;
use crate::error::{Result, ToolprobeError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    context: CommandContext,
    args: ConfigArgs,
}

impl ConfigCommand {
    pub fn new(context: CommandContext, args: ConfigArgs) -> Self {
        Self { context, args }
    }

    /// Where the configuration came from, for the header line.
    fn source(&self) -> String {
        if let Some(path) = &self.context.config_override {
            return path.display().to_string();
        }
        ConfigPaths::discover(&self.context.working_dir)
            .first_existing()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string())
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;

        ui.message(&format!("# {}", self.source()));

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&config).map_err(|e| ToolprobeError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&config).map_err(|e| ToolprobeError::Other(e.into()))?
        };
        ui.output(rendered.trim_end());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
settings:
  http_timeout_secs: 7
resources:
  - name: git
    url: https://git-scm.com/
"#;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("toolprobe.yml"), config).unwrap();
        temp
    }

    fn run(temp: &TempDir, args: ConfigArgs) -> (CommandResult, MockUI) {
        let cmd = ConfigCommand::new(CommandContext::new(temp.path(), None), args);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn shows_config_path() {
        let temp = setup_project(CONFIG);
        let (result, ui) = run(&temp, ConfigArgs::default());

        assert!(result.success);
        assert!(ui.has_message("toolprobe.yml"));
    }

    #[test]
    fn yaml_output() {
        let temp = setup_project(CONFIG);
        let (_, ui) = run(&temp, ConfigArgs::default());

        let yaml = &ui.outputs()[0];
        assert!(yaml.contains("http_timeout_secs: 7"));
        assert!(yaml.contains("name: git"));
    }

    #[test]
    fn json_output() {
        let temp = setup_project(CONFIG);
        let (_, ui) = run(&temp, ConfigArgs { json: true });

        let json: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(json["settings"]["http_timeout_secs"], 7);
        assert_eq!(json["resources"][0]["version_flag"], "--version");
    }

    #[test]
    fn invalid_config_is_an_error() {
        let temp = setup_project("resources: []\n");
        let cmd = ConfigCommand::new(CommandContext::new(temp.path(), None), ConfigArgs::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, ToolprobeError::ConfigValidationError { .. }));
    }
}
