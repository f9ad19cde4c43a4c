//! modshell entry point.
//!
//! Reads lines from stdin on a producer thread and feeds them through the
//! interpreter on the main thread. The config file path comes from the
//! first argument or `MODSHELL_CONFIG`; without either the defaults apply.
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

mod modules;

use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};

use modshell_terminal::{LineProducer, Shell, StdoutConsole, line_pool};
use modshell_types::config::ShellConfig;
use modshell_types::error::ShellError;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MODSHELL_CONFIG").ok());
    let config = match config_path {
        Some(path) => ShellConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => ShellConfig::default(),
    };
    log::info!(
        "Starting modshell ({} modules max, {} line buffers)",
        config.max_modules,
        config.max_queued
    );

    let mut shell = Shell::new(config.clone(), StdoutConsole::new())?;
    modules::register_all(&mut shell)?;

    match &config.default_module {
        Some(name) => {
            shell
                .register_default_module(name)
                .with_context(|| format!("selecting default module {name}"))?;
        },
        None => shell.print_prompt(),
    }

    let (producer, consumer) = line_pool(config.max_queued, config.max_line_len)?;
    let reader = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || read_lines(&producer))
        .context("spawning stdin reader")?;

    shell.run(&consumer);

    match reader.join() {
        Ok(result) => result?,
        Err(_) => anyhow::bail!("stdin reader panicked"),
    }
    Ok(())
}

/// Feed stdin into the line pool until end of input.
fn read_lines(producer: &LineProducer) -> std::result::Result<(), ShellError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut item = producer.acquire()?;
        item.fill(&line);
        producer.submit(item)?;
    }
    log::debug!("end of input");
    Ok(())
}
