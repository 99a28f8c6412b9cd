//! Workspace automation: `cargo run -p xtask -- <task>`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for prism")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Everything CI runs: fmt, clippy, tests, docs
    Check,
    /// Formatting check across the workspace
    Fmt,
    /// Clippy with warnings denied
    Clippy,
    /// Full workspace test suite
    Test,
    /// Camera and input tests only, the fast loop while tuning controls
    TestInput,
    /// Rustdoc for the workspace crates
    Doc,
    /// Build every workspace member
    Build,
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Check => {
            for task in [Task::Fmt, Task::Clippy, Task::Test, Task::Doc] {
                run(task)?;
            }
            Ok(())
        }
        task => run(task),
    }
}

fn run(task: Task) -> Result<()> {
    let args: &[&str] = match task {
        Task::Check => unreachable!("expanded in main"),
        Task::Fmt => &["fmt", "--all", "--", "--check"],
        Task::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        Task::Test => &["test", "--workspace"],
        Task::TestInput => &["test", "-p", "prism-camera", "-p", "prism-input"],
        Task::Doc => &["doc", "--workspace", "--no-deps"],
        Task::Build => &["build", "--workspace"],
    };

    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args[0]))?;
    anyhow::ensure!(status.success(), "cargo {} failed", args[0]);
    Ok(())
}
