//! The interpreter: owns the registry, selection, and hooks, and runs each
//! line through tokenize, resolve, invoke, and prompt.

use std::borrow::Cow;

use modshell_types::config::ShellConfig;
use modshell_types::error::{Result, ShellError};

use crate::console::Console;
use crate::line_queue::{LineConsumer, WorkItem};
use crate::registry::{Command, Handler, Registry};
use crate::resolver::{Resolver, Target};
use crate::selection::Selection;
use crate::tokenizer::tokenize;

/// Application hook that may override the prompt.
pub type PromptHandler = Box<dyn Fn() -> Option<String>>;

/// Interactive command interpreter writing to a console `C`.
pub struct Shell<C: Console> {
    pub(crate) config: ShellConfig,
    pub(crate) registry: Registry,
    pub(crate) selection: Selection,
    command_handler: Option<Box<dyn Handler>>,
    prompt_handler: Option<PromptHandler>,
    pub(crate) console: C,
}

impl<C: Console> Shell<C> {
    /// Create an interpreter with an empty registry.
    pub fn new(config: ShellConfig, console: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: Registry::with_capacity(config.max_modules),
            selection: Selection::new(),
            command_handler: None,
            prompt_handler: None,
            console,
            config,
        })
    }

    /// Register a module of commands. Returns the module's index.
    pub fn register(&mut self, name: impl Into<String>, commands: Vec<Command>) -> Result<usize> {
        let name = name.into();
        if name.chars().count() > self.config.module_name_max_len {
            log::warn!(
                "module name {name} exceeds {} characters and cannot be selected",
                self.config.module_name_max_len
            );
        }
        self.registry.register(name, commands)
    }

    /// Install the handler used when a line resolves to no command.
    pub fn set_command_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn(&[&str], &mut dyn Console) -> i32 + 'static,
    {
        if self.command_handler.is_some() {
            return Err(ShellError::HookAlreadySet("command"));
        }
        self.command_handler = Some(Box::new(handler));
        Ok(())
    }

    /// Install a prompt provider. A non-empty string it returns takes
    /// precedence over every other prompt.
    pub fn set_prompt_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn() -> Option<String> + 'static,
    {
        if self.prompt_handler.is_some() {
            return Err(ShellError::HookAlreadySet("prompt"));
        }
        self.prompt_handler = Some(Box::new(handler));
        Ok(())
    }

    /// Select a default module, or clear the selection with `None`.
    pub fn select(&mut self, name: Option<&str>) -> Result<Option<usize>> {
        match name {
            None => {
                self.selection.clear();
                Ok(None)
            },
            Some(name) => {
                let compare_len = self.config.module_compare_len();
                self.selection
                    .select(
                        &self.registry,
                        name,
                        self.config.module_name_max_len,
                        compare_len,
                    )
                    .map(Some)
            },
        }
    }

    /// Select a default module during startup and show its prompt.
    pub fn register_default_module(&mut self, name: &str) -> Result<usize> {
        match self.select(Some(name)) {
            Ok(index) => {
                self.console.print("\n");
                self.print_prompt();
                Ok(index.unwrap_or_default())
            },
            Err(e) => {
                self.println(&e.to_string());
                Err(e)
            },
        }
    }

    /// The prompt currently in effect.
    pub fn prompt(&self) -> Cow<'_, str> {
        if let Some(handler) = &self.prompt_handler
            && let Some(prompt) = handler()
            && !prompt.is_empty()
        {
            return Cow::Owned(prompt);
        }
        match self.selection.prompt() {
            Some(prompt) => Cow::Borrowed(prompt),
            None => Cow::Borrowed(self.config.prompt.as_str()),
        }
    }

    pub fn print_prompt(&mut self) {
        let prompt = self.prompt().into_owned();
        self.console.print(&prompt);
    }

    pub(crate) fn println(&mut self, text: &str) {
        self.console.print(text);
        self.console.print("\n");
    }

    pub(crate) fn resolver(&self) -> Resolver<'_> {
        Resolver {
            registry: &self.registry,
            selected: self.selection.selected(),
            compare_len: self.config.module_compare_len(),
        }
    }

    /// Run one line through the interpreter. Always ends by printing the
    /// prompt.
    pub fn process_line(&mut self, line: &str) {
        let args = match tokenize(line, self.config.max_args) {
            Ok(args) => args,
            Err(e) => {
                self.println(&e.to_string());
                self.print_prompt();
                return;
            },
        };
        if args.is_empty() {
            self.print_prompt();
            return;
        }

        let resolved = self.resolver().resolve(args.as_slice());
        let target = match resolved {
            Ok(target) => Some(target),
            Err(e) => {
                if e.is_resolver_diagnostic() {
                    self.println(&e.to_string());
                } else {
                    log::debug!("{e}");
                }
                None
            },
        };

        // A module prefix is stripped so commands never see how they were
        // invoked.
        let offset = match target {
            Some(Target::Help | Target::Select) => 0,
            _ if self.selection.is_selected() => 0,
            _ => 1,
        };

        let status = match target {
            Some(Target::Help) => self.show_help(args.as_slice()),
            Some(Target::Select) => self.select_builtin(args.as_slice()),
            Some(Target::Command { module, command }) => {
                let cmd = &self.registry.modules()[module].commands()[command];
                cmd.invoke(args.from_offset(offset), &mut self.console)
            },
            None => {
                let Some(handler) = self.command_handler.as_ref() else {
                    let first = args.first().unwrap_or_default();
                    self.println(&ShellError::UnrecognizedCommand(first.to_string()).to_string());
                    self.println("Type 'help' for list of available commands");
                    self.print_prompt();
                    return;
                };
                handler.call(args.from_offset(offset), &mut self.console)
            },
        };

        if status < 0 {
            log::debug!("{}", ShellError::CommandReportedFailure(status));
            self.show_cmd_help(args.as_slice());
        }

        self.print_prompt();
    }

    /// Process the line carried by a work item. A missing item only
    /// redisplays the prompt.
    pub fn process_item(&mut self, item: Option<&WorkItem>) {
        match item {
            Some(item) => self.process_line(item.line()),
            None => {
                log::debug!("no work item to process");
                self.print_prompt();
            },
        }
    }

    /// Process every line already pending, returning each buffer to the
    /// free pool. Does not block.
    pub fn drain(&mut self, consumer: &LineConsumer) -> usize {
        let mut processed = 0;
        while let Some(item) = consumer.try_recv() {
            self.process_item(Some(&item));
            consumer.release(item);
            processed += 1;
        }
        processed
    }

    /// Process lines until every producer has gone away.
    pub fn run(&mut self, consumer: &LineConsumer) {
        while let Some(item) = consumer.recv() {
            self.process_item(Some(&item));
            consumer.release(item);
        }
        log::info!("line queue closed, shell stopping");
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}
