use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "save",
            "Write all transactions to a file",
            "save [PATH]",
            cmd_save,
        ),
        CommandEntry::new(
            "load",
            "Replace transactions with a file's contents (clears undo history)",
            "load PATH",
            cmd_load,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn target_path(context: &ShellContext, args: &[&str]) -> PathBuf {
    if args.is_empty() {
        context.config_manager.data_file(&context.config)
    } else {
        PathBuf::from(args.join(" "))
    }
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = target_path(context, args);
    context.session.save(&path)?;
    output::success(format!("Saved transactions to {}.", path.display()));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: load PATH".into()));
    }
    let path = target_path(context, args);
    let count = context.session.load(&path)?;
    output::success(format!(
        "Loaded {count} transaction(s) from {}.",
        path.display()
    ));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Spendbook {}", meta.version));
    output::info(format!(
        "  Build hash : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Profile    : {}", meta.profile));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
