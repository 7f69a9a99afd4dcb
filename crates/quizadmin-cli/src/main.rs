//! quizadmin CLI: account and quiz administration from the command line.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quizadmin_core::model::{QuizId, UserId};

mod commands;
mod config;

use commands::{Outcome, Session};

#[derive(Parser)]
#[command(name = "quizadmin", version, about = "Quiz and account administration tool")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file path (overrides config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new admin user
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Show a user's details
    UserDetails {
        #[arg(long)]
        user: UserId,
    },

    /// Change a user's email and name
    UpdateDetails {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },

    /// Change a user's password
    UpdatePassword {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },

    /// List the quizzes a user owns
    QuizList {
        #[arg(long)]
        user: UserId,

        /// Render as a table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Create a quiz
    QuizCreate {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove a quiz
    QuizRemove {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        quiz: QuizId,
    },

    /// Show a quiz
    QuizInfo {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        quiz: QuizId,
    },

    /// Rename a quiz
    QuizRename {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        quiz: QuizId,
        #[arg(long)]
        name: String,
    },

    /// Change a quiz description
    QuizDescribe {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        quiz: QuizId,
        #[arg(long)]
        description: String,
    },

    /// Remove every user and quiz
    Clear,

    /// Create a starter config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Rejected) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let config = config::load_config_from(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("quizadmin=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_file = cli.data.unwrap_or(config.data_file);
    let pretty = config.pretty && !cli.compact;
    let open = || Session::open(data_file.clone(), pretty);

    match cli.command {
        Commands::Init => {
            commands::init::execute()?;
            Ok(Outcome::Success)
        }
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => commands::account::register(open()?, &email, &password, &first_name, &last_name),
        Commands::Login { email, password } => commands::account::login(open()?, &email, &password),
        Commands::UserDetails { user } => commands::account::user_details(open()?, user),
        Commands::UpdateDetails {
            user,
            email,
            first_name,
            last_name,
        } => commands::account::update_details(open()?, user, &email, &first_name, &last_name),
        Commands::UpdatePassword {
            user,
            old_password,
            new_password,
        } => commands::account::update_password(open()?, user, &old_password, &new_password),
        Commands::QuizList { user, table } => commands::quiz::list(open()?, user, table),
        Commands::QuizCreate {
            user,
            name,
            description,
        } => commands::quiz::create(open()?, user, &name, &description),
        Commands::QuizRemove { user, quiz } => commands::quiz::remove(open()?, user, quiz),
        Commands::QuizInfo { user, quiz } => commands::quiz::info(open()?, user, quiz),
        Commands::QuizRename { user, quiz, name } => {
            commands::quiz::rename(open()?, user, quiz, &name)
        }
        Commands::QuizDescribe {
            user,
            quiz,
            description,
        } => commands::quiz::describe(open()?, user, quiz, &description),
        Commands::Clear => commands::clear::execute(Session::fresh(data_file.clone(), pretty)),
    }
}
