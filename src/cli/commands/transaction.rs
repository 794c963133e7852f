use crate::cli::core::CommandResult;
use crate::cli::parser::{
    missing, parse_view_filter, PrefixArgs, PREFIX_DATE, PREFIX_DESCRIPTION, PREFIX_INDEX,
    PREFIX_MONTH, PREFIX_OCCURRENCE, PREFIX_REMARK, PREFIX_TAG, PREFIX_VALUE,
};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::commands::{
    add, clone, delete, list, update, AddCommand, CloneCommand, DeleteCommand, Dispatch,
    ListCommand, UpdateCommand,
};
use crate::ledger::{Transaction, TransactionEdits, TransactionKind};

const FIELD_PREFIXES: &[&str] = &[
    PREFIX_DESCRIPTION,
    PREFIX_VALUE,
    PREFIX_DATE,
    PREFIX_REMARK,
    PREFIX_TAG,
];

const UPDATE_PREFIXES: &[&str] = &[
    PREFIX_INDEX,
    PREFIX_DESCRIPTION,
    PREFIX_VALUE,
    PREFIX_DATE,
    PREFIX_REMARK,
    PREFIX_TAG,
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            add::EXPENSE_WORD,
            "Record a new expense",
            "expense n/DESCRIPTION v/VALUE [d/DD/MM/YYYY] [r/REMARK] [t/TAG]...",
            cmd_expense,
        ),
        CommandEntry::new(
            add::INCOME_WORD,
            "Record a new income",
            "income n/DESCRIPTION v/VALUE [d/DD/MM/YYYY] [r/REMARK] [t/TAG]...",
            cmd_income,
        ),
        CommandEntry::new(
            delete::COMMAND_WORD,
            "Delete the transaction at a listed index",
            "delete i/INDEX",
            cmd_delete,
        ),
        CommandEntry::new(
            update::COMMAND_WORD,
            "Edit fields of the transaction at a listed index",
            "update i/INDEX [n/DESCRIPTION] [v/VALUE] [d/DD/MM/YYYY] [r/REMARK] [t/TAG]...",
            cmd_update,
        ),
        CommandEntry::new(
            clone::COMMAND_WORD,
            "Clone a transaction, optionally as a recurring batch",
            "clone i/INDEX [o/daily|weekly|monthly|yearly:COUNT]",
            cmd_clone,
        ),
        CommandEntry::new(
            list::COMMAND_WORD,
            "List transactions, optionally filtered",
            "list [expense|income|m/MM/YYYY]",
            cmd_list,
        ),
    ]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    add_transaction(context, TransactionKind::Expense, args)
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    add_transaction(context, TransactionKind::Income, args)
}

fn add_transaction(
    context: &mut ShellContext,
    kind: TransactionKind,
    args: &[&str],
) -> CommandResult {
    let args = PrefixArgs::parse(args, FIELD_PREFIXES);
    args.ensure_no_preamble()?;
    args.ensure_single(&[PREFIX_DESCRIPTION, PREFIX_VALUE, PREFIX_DATE, PREFIX_REMARK])?;

    let description = args
        .description()?
        .ok_or_else(|| missing("description", PREFIX_DESCRIPTION))?;
    let value = args.amount()?.ok_or_else(|| missing("value", PREFIX_VALUE))?;
    let date = match args.date()? {
        Some(date) => date,
        None => context.session.clock().today(),
    };
    let transaction = Transaction::new(
        kind,
        description,
        value,
        args.remark().unwrap_or_default(),
        date,
        args.tags()?.unwrap_or_default(),
    );
    context.execute(Dispatch::undoable(AddCommand::new(transaction)))
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = PrefixArgs::parse(args, &[PREFIX_INDEX]);
    args.ensure_no_preamble()?;
    args.ensure_single(&[PREFIX_INDEX])?;
    context.execute(Dispatch::undoable(DeleteCommand::new(args.index()?)))
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = PrefixArgs::parse(args, UPDATE_PREFIXES);
    args.ensure_no_preamble()?;
    args.ensure_single(&[
        PREFIX_INDEX,
        PREFIX_DESCRIPTION,
        PREFIX_VALUE,
        PREFIX_DATE,
        PREFIX_REMARK,
    ])?;
    let edits = TransactionEdits {
        description: args.description()?,
        value: args.amount()?,
        remark: args.remark(),
        date: args.date()?,
        tags: args.tags()?,
    };
    let command = UpdateCommand::new(args.index()?, edits)?;
    context.execute(Dispatch::undoable(command))
}

fn cmd_clone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = PrefixArgs::parse(args, &[PREFIX_INDEX, PREFIX_OCCURRENCE]);
    args.ensure_no_preamble()?;
    args.ensure_single(&[PREFIX_INDEX, PREFIX_OCCURRENCE])?;
    let command = CloneCommand::new(args.index()?, args.occurrence()?);
    context.execute(Dispatch::undoable(command))
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = PrefixArgs::parse(args, &[PREFIX_MONTH]);
    let filter = parse_view_filter(&args)?;
    context.execute(Dispatch::plain(ListCommand::new(filter)))
}
