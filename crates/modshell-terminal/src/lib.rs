//! Command interpreter and line-processing loop.
//!
//! Commands are grouped into named modules held by a fixed-capacity
//! registry. A line is split into arguments, resolved against the registry
//! (optionally through a selected default module), and dispatched to the
//! command's handler. Lines reach the interpreter through a bounded pool of
//! reusable work items.

mod console;
mod help;
mod interpreter;
mod line_queue;
mod registry;
mod resolver;
mod selection;
mod tokenizer;

/// Console sinks that receive all user-facing text.
pub use console::{BufferConsole, Console, StdoutConsole};
/// The interpreter and its runtime hooks.
pub use interpreter::{PromptHandler, Shell};
/// Work-item pool connecting a line producer to the interpreter.
pub use line_queue::{LineConsumer, LineProducer, WorkItem, line_pool};
/// Commands, modules, and the module registry.
pub use registry::{Command, CommandHelp, Handler, Module, Registry};
/// Default-module selection and prompt caching.
pub use selection::Selection;
/// Line tokenizer.
pub use tokenizer::{Args, tokenize};

pub use modshell_types::config::{ModuleMatch, ShellConfig};
pub use modshell_types::error::{Result, ShellError};
