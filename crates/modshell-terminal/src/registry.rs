//! Commands, modules, and the fixed-capacity module registry.

use std::fmt;

use modshell_types::error::{Result, ShellError};

use crate::console::Console;

/// Something a resolved command invokes.
///
/// Returns a status: negative means the arguments were not understood and
/// the command's help should be shown instead.
pub trait Handler {
    fn call(&self, args: &[&str], out: &mut dyn Console) -> i32;
}

impl<F> Handler for F
where
    F: Fn(&[&str], &mut dyn Console) -> i32,
{
    fn call(&self, args: &[&str], out: &mut dyn Console) -> i32 {
        self(args, out)
    }
}

/// Optional help text attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHelp {
    /// One-line description shown in module listings.
    pub summary: Option<String>,
    /// Full usage text shown by `help <module> <command>`.
    pub usage: Option<String>,
}

/// A named command inside a module.
pub struct Command {
    name: String,
    handler: Box<dyn Handler>,
    help: Option<CommandHelp>,
}

impl Command {
    /// Create a command from a closure.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[&str], &mut dyn Console) -> i32 + 'static,
    {
        Self::from_handler(name, handler)
    }

    /// Create a command from any [`Handler`] implementation.
    pub fn from_handler(name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Box::new(handler),
            help: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.help.get_or_insert_with(CommandHelp::default).summary = Some(summary.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.help.get_or_insert_with(CommandHelp::default).usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&CommandHelp> {
        self.help.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.help.as_ref()?.summary.as_deref()
    }

    /// Usage if present, else summary.
    pub fn usage_or_summary(&self) -> Option<&str> {
        let help = self.help.as_ref()?;
        help.usage.as_deref().or(help.summary.as_deref())
    }

    pub fn invoke(&self, args: &[&str], out: &mut dyn Console) -> i32 {
        self.handler.call(args, out)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// A named, ordered group of commands.
#[derive(Debug)]
pub struct Module {
    name: String,
    commands: Vec<Command>,
}

impl Module {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// First command whose name equals `name` exactly.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// Fixed-capacity registry of modules. A module's identity is its index.
#[derive(Debug)]
pub struct Registry {
    modules: Vec<Module>,
    capacity: usize,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            modules: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a module and return its index.
    ///
    /// Duplicate names are accepted; lookups return the earliest one.
    pub fn register(&mut self, name: impl Into<String>, commands: Vec<Command>) -> Result<usize> {
        if self.modules.len() >= self.capacity {
            return Err(ShellError::RegistryFull {
                capacity: self.capacity,
            });
        }
        let name = name.into();
        log::info!(
            "Registered shell module {name} ({} commands)",
            commands.len()
        );
        self.modules.push(Module { name, commands });
        Ok(self.modules.len() - 1)
    }

    /// Index of the first module whose name agrees with `candidate` over
    /// the first `max_len` characters.
    ///
    /// Pass `usize::MAX` for an exact comparison.
    pub fn find_by_name(&self, candidate: &str, max_len: usize) -> Option<usize> {
        self.modules
            .iter()
            .position(|m| bounded_eq(candidate, &m.name, max_len))
    }

    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn bounded_eq(a: &str, b: &str, max_len: usize) -> bool {
    a.chars().take(max_len).eq(b.chars().take(max_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferConsole;

    fn noop(name: &str) -> Command {
        Command::new(name, |_, _| 0)
    }

    #[test]
    fn register_returns_indices_in_order() {
        let mut reg = Registry::with_capacity(4);
        assert_eq!(reg.register("A", vec![]).unwrap(), 0);
        assert_eq!(reg.register("B", vec![]).unwrap(), 1);
        assert_eq!(reg.find_by_name("A", 20), Some(0));
        assert_eq!(reg.find_by_name("B", 20), Some(1));
        assert_eq!(reg.find_by_name("C", 20), None);
    }

    #[test]
    fn register_beyond_capacity_fails_without_mutation() {
        let mut reg = Registry::with_capacity(1);
        reg.register("A", vec![]).unwrap();
        let err = reg.register("B", vec![]).unwrap_err();
        assert!(matches!(err, ShellError::RegistryFull { capacity: 1 }));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find_by_name("B", 20), None);
    }

    #[test]
    fn duplicate_names_first_wins() {
        let mut reg = Registry::with_capacity(4);
        reg.register("net", vec![noop("up")]).unwrap();
        reg.register("net", vec![noop("down")]).unwrap();
        assert_eq!(reg.find_by_name("net", 20), Some(0));
    }

    #[test]
    fn bounded_comparison_matches_long_names_by_prefix() {
        let mut reg = Registry::with_capacity(2);
        reg.register("abcdefghijklmnopqrstuvwxyz", vec![]).unwrap();
        assert_eq!(reg.find_by_name("abcdefghijklmnopqrstXXX", 20), Some(0));
        assert_eq!(reg.find_by_name("abcdefghijklmnopqrstXXX", usize::MAX), None);
    }

    #[test]
    fn bounded_comparison_is_exact_for_short_names() {
        let mut reg = Registry::with_capacity(2);
        reg.register("net", vec![]).unwrap();
        assert_eq!(reg.find_by_name("ne", 20), None);
        assert_eq!(reg.find_by_name("network", 20), None);
    }

    #[test]
    fn find_command_first_match() {
        let mut reg = Registry::with_capacity(1);
        let cmds = vec![
            Command::new("up", |_, _| 1),
            Command::new("up", |_, _| 2),
        ];
        reg.register("net", cmds).unwrap();
        let module = reg.get(0).unwrap();
        let mut out = BufferConsole::new();
        assert_eq!(module.find_command("up").unwrap().invoke(&[], &mut out), 1);
        assert!(module.find_command("u").is_none());
    }

    #[test]
    fn help_builder() {
        let cmd = noop("scan")
            .with_summary("scan for peers")
            .with_usage("scan [duration]");
        assert_eq!(cmd.summary(), Some("scan for peers"));
        assert_eq!(cmd.usage_or_summary(), Some("scan [duration]"));

        let summary_only = noop("scan").with_summary("scan for peers");
        assert_eq!(summary_only.usage_or_summary(), Some("scan for peers"));
        assert!(noop("scan").help().is_none());
        assert_eq!(noop("scan").usage_or_summary(), None);
    }

    struct Echo;
    impl Handler for Echo {
        fn call(&self, args: &[&str], out: &mut dyn Console) -> i32 {
            out.print(&args.join(" "));
            0
        }
    }

    #[test]
    fn trait_handler_receives_args_and_console() {
        let cmd = Command::from_handler("echo", Echo);
        let mut out = BufferConsole::new();
        assert_eq!(cmd.invoke(&["a", "b"], &mut out), 0);
        assert_eq!(out.contents(), "a b");
    }

    #[test]
    fn debug_omits_handler() {
        let dbg = format!("{:?}", noop("up"));
        assert!(dbg.contains("up"));
    }
}
