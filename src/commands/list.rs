use super::Command;
use crate::core::context::CommandContext;
use crate::errors::Result;
use crate::ledger::ViewFilter;

pub const COMMAND_WORD: &str = "list";

/// Changes which transactions are displayed. Never recorded in history.
#[derive(Debug)]
pub struct ListCommand {
    filter: ViewFilter,
}

impl ListCommand {
    pub fn new(filter: ViewFilter) -> Self {
        Self { filter }
    }
}

impl Command for ListCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        ctx.store.set_filter(self.filter);
        let shown = ctx.store.displayed();
        let mut message = format!("Listed {} ({} shown)", self.filter, shown.len());
        for (position, transaction) in shown.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", position + 1, transaction));
        }
        Ok(message)
    }
}
