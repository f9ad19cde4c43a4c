//! Built-in `help` and `select`, and per-command help rendering.

use modshell_types::error::ShellError;

use crate::console::Console;
use crate::interpreter::Shell;

impl<C: Console> Shell<C> {
    /// Built-in `help [module [command]]`. `argv[0]` is `help` itself.
    ///
    /// With a default module selected the module argument is implied, so
    /// `help <command>` shows that command's help.
    pub(crate) fn show_help(&mut self, argv: &[&str]) -> i32 {
        let argc = argv.len();
        let selected = self.selection.selected();

        if argc > 2 || (selected.is_some() && argc == 2) {
            self.show_cmd_help(&argv[1..]);
            return 0;
        }

        if argc == 2 || selected.is_some() {
            let module = match selected {
                Some(module) => module,
                None => {
                    let found = self
                        .registry
                        .find_by_name(argv[1], self.config.module_compare_len());
                    match found {
                        Some(module) => module,
                        None => {
                            self.println(&ShellError::IllegalModule(argv[1].to_string()).to_string());
                            return 0;
                        },
                    }
                },
            };
            self.print_module_commands(module);
            return 0;
        }

        let mut out = String::from("Available modules:\n");
        for module in self.registry.modules() {
            out.push_str(module.name());
            out.push('\n');
        }
        out.push_str("To select a module, enter 'select <module name>'.\n");
        self.console.print(&out);
        0
    }

    /// Built-in `select [module]`. Without an argument the default module
    /// is cleared.
    pub(crate) fn select_builtin(&mut self, argv: &[&str]) -> i32 {
        match argv.get(1) {
            None => {
                self.selection.clear();
            },
            Some(&name) => {
                if let Err(e) = self.select(Some(name)) {
                    self.println(&e.to_string());
                }
            },
        }
        0
    }

    /// Print a command's usage, falling back to its summary, then to a
    /// blank line. `argv` names the command the same way a typed line does.
    pub(crate) fn show_cmd_help(&mut self, argv: &[&str]) {
        let text = match self.resolver().find_command(argv) {
            Ok(cmd) => format!("{}:\n{}\n", cmd.name(), cmd.usage_or_summary().unwrap_or("")),
            Err(e) if e.is_resolver_diagnostic() => format!("{e}\n"),
            Err(_) => format!(
                "{}\n",
                ShellError::UnrecognizedCommand(argv.first().unwrap_or(&"").to_string())
            ),
        };
        self.console.print(&text);
    }

    /// List a module's commands with their summaries, `help` first.
    fn print_module_commands(&mut self, module: usize) {
        let mut out = String::from("help\n");
        if let Some(module) = self.registry.get(module) {
            for cmd in module.commands() {
                out.push_str(&format!("{:<30}", cmd.name()));
                if let Some(summary) = cmd.summary() {
                    out.push_str(summary);
                }
                out.push('\n');
            }
        }
        self.console.print(&out);
    }
}
