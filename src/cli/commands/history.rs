use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("undo", "Undo the most recent change", "undo", cmd_undo),
        CommandEntry::new("redo", "Redo the most recently undone change", "redo", cmd_redo),
    ]
}

fn cmd_undo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let message = context.session.undo()?;
    output::success(message);
    Ok(())
}

fn cmd_redo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let message = context.session.redo()?;
    output::success(message);
    Ok(())
}
