use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use gitlet::errors::GitletError;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "gitlet",
    about = "A small version-control system",
    long_about = "gitlet keeps snapshots of a directory tree in a content-addressed object store. \
    It supports branches, three-way merges and synchronization with other repositories \
    on the same filesystem.",
    help_template = r"
{name} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged snapshot")]
    Commit {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: Option<String>,
    },
    #[command(name = "rm", about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with a given message")]
    Find {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, the stage and working directory changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch, \
        checkout -- <file> restores a file from the head commit and \
        checkout <commit> -- <file> restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1)]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository as a remote")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Append local history to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "cat-file", about = "Print a stored commit or blob")]
    CatFile {
        #[arg(index = 1)]
        object_id: String,
    },
}

impl Commands {
    fn pages_output(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<GitletError>() {
            Some(gitlet_error) => {
                println!("{gitlet_error}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn parse_cli() -> anyhow::Result<Cli> {
    Cli::try_parse().map_err(|err| {
        let gitlet_error = match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                GitletError::NoCommand
            }
            ErrorKind::InvalidSubcommand => GitletError::UnknownCommand,
            _ => GitletError::IncorrectOperands,
        };

        log::debug!("rejected command line: {err}");
        gitlet_error.into()
    })
}

fn use_pager() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none()
}

async fn run() -> anyhow::Result<()> {
    let command = parse_cli()?.command.ok_or(GitletError::NoCommand)?;

    let pager = (command.pages_output() && use_pager()).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let repository = Repository::new(".", writer)?;
    if !matches!(command, Commands::Init) {
        repository.ensure_initialized()?;
    }

    match command {
        Commands::Init => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => repository.commit(message.as_deref()).await?,
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(&message)?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(&branch).await?,
            (commit, Some(file)) => repository.checkout_file(commit.as_deref(), &file)?,
            (None, None) => return Err(GitletError::IncorrectOperands.into()),
        },
        Commands::Branch { name } => repository.create_branch(&name)?,
        Commands::RmBranch { name } => repository.delete_branch(&name)?,
        Commands::Reset { commit } => repository.reset(&commit).await?,
        Commands::Merge { branch } => repository.merge(&branch).await?,
        Commands::AddRemote { name, path } => repository.add_remote(&name, &path)?,
        Commands::RmRemote { name } => repository.remove_remote(&name)?,
        Commands::Push { remote, branch } => repository.push(&remote, &branch)?,
        Commands::Fetch { remote, branch } => repository.fetch(&remote, &branch)?,
        Commands::Pull { remote, branch } => repository.pull(&remote, &branch).await?,
        Commands::CatFile { object_id } => repository.cat_file(&object_id)?,
    }

    repository.writer().flush()?;
    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
