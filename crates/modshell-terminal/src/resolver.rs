//! Maps an argument list to the thing it should run.

use modshell_types::error::{Result, ShellError};

use crate::registry::{Command, Registry};

/// What a line resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Built-in `help`.
    Help,
    /// Built-in `select`.
    Select,
    /// A registered command, by module and command index.
    Command { module: usize, command: usize },
}

/// Read-only view over the registry and the current default module.
pub(crate) struct Resolver<'r> {
    pub registry: &'r Registry,
    pub selected: Option<usize>,
    pub compare_len: usize,
}

impl<'r> Resolver<'r> {
    /// Resolve a full line.
    pub fn resolve(&self, argv: &[&str]) -> Result<Target> {
        let first = match argv.first() {
            Some(first) if !first.is_empty() => *first,
            _ => return Err(ShellError::EmptyCommand),
        };

        match first {
            "help" => return Ok(Target::Help),
            "select" => return Ok(Target::Select),
            _ => {},
        }

        if argv.len() == 1 && self.selected.is_none() {
            return Err(ShellError::MissingParameter);
        }

        let (module, name) = self.command_and_module(argv)?;
        log::debug!("module: {module}, command: {name}");

        let commands = self.registry.modules()[module].commands();
        match commands.iter().position(|c| c.name() == name) {
            Some(command) => Ok(Target::Command { module, command }),
            None => Err(ShellError::CommandNotFound {
                module: self.registry.modules()[module].name().to_string(),
                command: name.to_string(),
            }),
        }
    }

    /// Split `argv` into a module index and command name.
    ///
    /// Without a default module `argv[0]` names the module and `argv[1]`
    /// the command. With one, `argv[0]` is the command.
    pub fn command_and_module<'a>(&self, argv: &[&'a str]) -> Result<(usize, &'a str)> {
        let Some(&first) = argv.first() else {
            return Err(ShellError::EmptyCommand);
        };

        if let Some(module) = self.selected {
            return Ok((module, first));
        }

        let command = match argv.get(1) {
            Some(command) if !command.is_empty() => *command,
            _ => return Err(ShellError::UnrecognizedCommand(first.to_string())),
        };
        let module = self
            .registry
            .find_by_name(first, self.compare_len)
            .ok_or_else(|| ShellError::IllegalModule(first.to_string()))?;
        Ok((module, command))
    }

    /// Look up the command `argv` names, using the same shorthand rule.
    pub fn find_command(&self, argv: &[&str]) -> Result<&'r Command> {
        let (module, name) = self.command_and_module(argv)?;
        let module = &self.registry.modules()[module];
        module
            .find_command(name)
            .ok_or_else(|| ShellError::CommandNotFound {
                module: module.name().to_string(),
                command: name.to_string(),
            })
    }
}
