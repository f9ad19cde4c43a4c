//! Demonstration modules registered by the binary.

use std::time::Instant;

use modshell_terminal::{Command, Console, Shell};
use modshell_types::error::Result;

/// Register every demonstration module.
pub fn register_all<C: Console>(shell: &mut Shell<C>) -> Result<()> {
    shell.register("sys", sys_commands())?;
    shell.register("math", math_commands())?;
    Ok(())
}

fn sys_commands() -> Vec<Command> {
    let started = Instant::now();
    vec![
        Command::new("echo", |args, out| {
            let words = args.get(1..).unwrap_or_default();
            out.print(&format!("{}\n", words.join(" ")));
            0
        })
        .with_summary("print arguments")
        .with_usage("echo [text...]"),
        Command::new("uptime", move |_, out| {
            out.print(&format!("up {}s\n", started.elapsed().as_secs()));
            0
        })
        .with_summary("seconds since start"),
        Command::new("version", |_, out| {
            out.print(concat!("modshell ", env!("CARGO_PKG_VERSION"), "\n"));
            0
        }),
    ]
}

fn math_commands() -> Vec<Command> {
    vec![
        Command::new("add", |args, out| binary_op(args, out, i64::checked_add))
            .with_summary("add two integers")
            .with_usage("add <a> <b>"),
        Command::new("mul", |args, out| binary_op(args, out, i64::checked_mul))
            .with_summary("multiply two integers")
            .with_usage("mul <a> <b>"),
    ]
}

/// Parse two integer operands and print `op` applied to them. Returns -1
/// on anything else so the interpreter shows usage.
fn binary_op(args: &[&str], out: &mut dyn Console, op: fn(i64, i64) -> Option<i64>) -> i32 {
    let [_, a, b] = args else {
        return -1;
    };
    let (Ok(a), Ok(b)) = (a.parse::<i64>(), b.parse::<i64>()) else {
        return -1;
    };
    match op(a, b) {
        Some(result) => {
            out.print(&format!("{result}\n"));
            0
        },
        None => {
            out.print("overflow\n");
            0
        },
    }
}
