use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use jot::areas::repository::Repository;
use jot::artifacts::checkout::CheckoutRequest;
use jot::artifacts::core::PagerWriter;
use minus::Pager;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A minimal local version-control system",
    long_about = "jot is a minimal local version-control system: a content-addressed \
    object store, a commit history graph, a staging area, and a three-way merge \
    engine, for a single user working in one directory.",
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
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record a commit from the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or mark it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and the working tree")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore files or switch branches",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from the head commit, and \
        `checkout <commit-id> -- <file>` restores a file from a commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id before `-- <file>`")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        files: Vec<String>,
    },
    #[command(name = "branch", about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1, help = "The commit id, possibly abbreviated")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy();

    match command {
        Commands::Init => {
            Repository::init(&pwd, Box::new(std::io::stdout()))?;
        }
        Commands::Add { file } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.add(file)?;
        }
        Commands::Commit { message } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.commit(message)?;
        }
        Commands::Rm { file } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.rm(file)?;
        }
        Commands::Log => {
            run_paged(&pwd, |repository| repository.log())?;
        }
        Commands::GlobalLog => {
            run_paged(&pwd, |repository| repository.global_log())?;
        }
        Commands::Find { message } => {
            let repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.find(message)?;
        }
        Commands::Status => {
            let repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.status()?;
        }
        Commands::Checkout { target, files } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.checkout(checkout_request(target.as_deref(), files)?)?;
        }
        Commands::Branch { name } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.branch(name)?;
        }
        Commands::RmBranch { name } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.rm_branch(name)?;
        }
        Commands::Reset { commit } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.reset(commit)?;
        }
        Commands::Merge { branch } => {
            let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;
            repository.merge(branch)?;
        }
    }

    Ok(())
}

/// Map the three checkout forms onto the request type.
fn checkout_request(target: Option<&str>, files: &[String]) -> Result<CheckoutRequest> {
    match (target, files) {
        (Some(branch), []) => Ok(CheckoutRequest::Branch {
            name: branch.to_string(),
        }),
        (None, [file]) => Ok(CheckoutRequest::WorkingFile {
            name: file.clone(),
        }),
        (Some(commit), [file]) => Ok(CheckoutRequest::CommitFile {
            commit: commit.to_string(),
            name: file.clone(),
        }),
        _ => Err(anyhow::anyhow!("Incorrect operands")),
    }
}

/// Long listings go through the pager when stdout is a terminal and
/// `NO_PAGER` is unset; otherwise they print straight to stdout.
fn run_paged(pwd: &str, operation: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    let use_pager = std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none();

    if use_pager {
        let pager = Pager::new();
        let repository = Repository::open(pwd, Box::new(PagerWriter::new(pager.clone())))?;
        operation(&repository)?;
        minus::page_all(pager)?;
    } else {
        let repository = Repository::open(pwd, Box::new(std::io::stdout()))?;
        operation(&repository)?;
    }

    Ok(())
}
