use crate::{
    config::{Config, ConfigManager},
    core::{Session, SystemClock},
    errors::Result,
    ledger::TransactionStore,
};

use super::{commands, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Builds a shell on the system clock and loads the configured data file
    /// when it exists.
    pub fn new(mode: CliMode) -> Result<Self> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let session = Session::with_config(Box::new(SystemClock), &config);
        let mut context = Self::with_session(mode, session, config_manager, config);

        let data_file = context.config_manager.data_file(&context.config);
        if data_file.exists() {
            let count = context.session.load(&data_file)?;
            output::info(format!(
                "Loaded {count} transaction(s) from {}.",
                data_file.display()
            ));
        }
        Ok(context)
    }

    pub fn with_session(
        mode: CliMode,
        session: Session,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            session,
            config_manager,
            config,
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("spendbook ({})> ", self.session.store().len())
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, undo: {}, redo: {} }}",
            self.running,
            self.last_command,
            self.session.history().undo_len(),
            self.session.history().redo_len()
        )
    }
}
