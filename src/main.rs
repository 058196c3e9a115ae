use anyhow::Result;
use bantam::areas::repository::Repository;
use bantam::artifacts::core::PagerWriter;
use bantam::commands::porcelain::checkout::CheckoutOptions;
use bantam::commands::porcelain::commit::CommitOptions;
use bantam::errors::RepoError;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;

#[derive(Parser)]
#[command(
    name = "bantam",
    version = "0.1.0",
    about = "A tiny snapshot-based version control system",
    long_about = "bantam tracks a working directory through a linear history of snapshots, \
    organized into branches. It is a small, single-user engine: no merges, no remotes, \
    one process at a time.",
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
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "This command stages a file (or, for a directory, every file beneath it) \
        so the next commit captures its content."
    )]
    Add {
        #[arg(index = 1, help = "The path to stage")]
        path: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file and remove it from the working directory"
    )]
    Rm {
        #[arg(index = 1, help = "The path to unstage")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command captures the staged files into a new commit and advances \
        the current branch to it."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, help = "Refuse to commit when nothing is staged")]
        forbid_empty: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit",
        long_about = "This command moves HEAD to the given branch (or, with a 40-character \
        commit id, detaches HEAD at that commit) and reconciles the working directory \
        with the target snapshot."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: String,
        #[arg(short = 'b', long = "create", help = "Create the branch at the current commit")]
        create: bool,
    },
    #[command(name = "branch", about = "List branches, marking the current one")]
    Branch,
    #[command(name = "log", about = "Show the commit history of HEAD")]
    Log,
    #[command(name = "status", about = "Show the staged file set")]
    Status,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        // the one place error kinds become text and exit codes
        if let Some(repo_err) = err.downcast_ref::<RepoError>() {
            eprintln!("ERROR: {repo_err}");
            std::process::exit(repo_err.exit_code());
        }

        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => repository_in_cwd()?,
            };

            repository.init()
        }
        Commands::Add { path } => repository_in_cwd()?.add(path),
        Commands::Rm { path } => repository_in_cwd()?.rm(path),
        Commands::Commit {
            message,
            forbid_empty,
        } => {
            let opts = CommitOptions {
                allow_empty: !*forbid_empty,
            };
            repository_in_cwd()?.commit(message.as_str(), &opts)
        }
        Commands::Checkout { target, create } => {
            let opts = CheckoutOptions { create: *create };
            repository_in_cwd()?.checkout(target.as_str(), &opts)
        }
        Commands::Branch => repository_in_cwd()?.branch(),
        Commands::Log => {
            if std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none() {
                let pager = minus::Pager::new();
                let repository = repository_with_writer(Box::new(PagerWriter::new(pager.clone())))?;
                repository.log()?;
                minus::page_all(pager)?;
                Ok(())
            } else {
                repository_in_cwd()?.log()
            }
        }
        Commands::Status => repository_in_cwd()?.status(),
    }
}

fn repository_in_cwd() -> Result<Repository> {
    repository_with_writer(Box::new(std::io::stdout()))
}

fn repository_with_writer(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), writer)
}
