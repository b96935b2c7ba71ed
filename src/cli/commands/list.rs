//! List command implementation.
//!
//! `devsetup --list` prints the component table and exits.

use crate::error::Result;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult, SetupContext};

/// The list command implementation.
pub struct ListCommand<'a> {
    context: &'a SetupContext,
    detailed: bool,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(context: &'a SetupContext, detailed: bool) -> Self {
        Self { context, detailed }
    }

    fn table(&self) -> Table {
        let mut headers = vec!["Name", "Display", "Category", "Critical", "Depends on"];
        if self.detailed {
            headers.push("Script");
        }
        let mut table = Table::new(headers);

        let scripts_dir = self
            .context
            .project_root
            .join(&self.context.config.settings.scripts_dir);

        for spec in self.context.registry.iter() {
            let depends = if spec.depends_on.is_empty() {
                "-".to_string()
            } else {
                spec.depends_on.join(", ")
            };
            let mut row = vec![
                spec.name.clone(),
                spec.display_name.clone(),
                spec.category.to_string(),
                if spec.critical { "yes" } else { "no" }.to_string(),
                depends,
            ];
            if self.detailed {
                row.push(spec.script_path(&scripts_dir).display().to_string());
            }
            table.add_row(row);
        }
        table
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let table = self.table();
        ui.show_header(&format!("{} components", table.len()));
        ui.show_lines(&table.render());
        Ok(CommandResult::success())
    }
}
