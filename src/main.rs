use anyhow::Result;
use clap::{Parser, Subcommand};
use conflicts::commands;
use conflicts::{ConflictOptions, Conflicts, TerminalPrompt};
use is_terminal::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "conflicts",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Check generated files against what is already on disk",
    long_about = "Compares proposed files with the files they would replace in a destination \
    directory. Identical files are skipped, new files are accepted and real conflicts \
    are resolved interactively.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "check",
        about = "Resolve conflicts between proposed files and a destination",
        long_about = "This command compares every proposed file with the file of the same name \
        in the destination directory, asks about real conflicts and prints the files \
        that should be written."
    )]
    Check {
        #[arg(short, long, help = "The destination directory")]
        dest: PathBuf,
        #[arg(long, help = "Base directory for relative paths")]
        cwd: Option<PathBuf>,
        #[arg(short, long, help = "Overwrite every file without asking")]
        overwrite: bool,
        #[arg(short, long, help = "Suppress status output")]
        silent: bool,
        #[arg(long, help = "Diff character by character")]
        chars: bool,
        #[arg(short, long, help = "Copy the accepted files into the destination")]
        write: bool,
        #[arg(index = 1, required = true, help = "Proposed files or directories")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "diff",
        about = "Show the difference between two files",
        long_about = "This command renders a text diff, or a metadata table for binary files \
        and directories, between an existing file and its replacement."
    )]
    Diff {
        #[arg(long, help = "Diff character by character")]
        chars: bool,
        #[arg(index = 1)]
        existing: PathBuf,
        #[arg(index = 2)]
        proposed: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check {
            dest,
            cwd,
            overwrite,
            silent,
            chars,
            write,
            paths,
        } => {
            let cwd = match cwd {
                Some(cwd) => cwd,
                None => std::env::current_dir()?,
            };
            let options = ConflictOptions::new(dest)
                .with_cwd(cwd)
                .with_overwrite(overwrite)
                .silent(silent)
                .with_diff_chars(chars);
            let prompt = TerminalPrompt::stdio();
            let mut conflicts = Conflicts::new(options, prompt, Box::new(std::io::stderr()));

            conflicts
                .check(&paths, write, &mut std::io::stdout())
                .await?
        }
        Commands::Diff {
            chars,
            existing,
            proposed,
        } => commands::diff::diff(&existing, &proposed, chars, &mut std::io::stdout())?,
    }

    Ok(())
}
