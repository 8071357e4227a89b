//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kanban - a task board with stage columns and a project list
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "KANBAN_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Output format (table, json, brief)
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board
    Show {
        /// Only this column (todo, in-progress, review, done)
        #[arg(short, long)]
        column: Option<String>,

        /// Only cards assigned to this person
        #[arg(short, long)]
        assignee: Option<String>,

        /// Only cards whose content contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a card to the end of a column
    Add {
        /// Column to add to
        #[arg(required = true)]
        column: String,

        /// Card content
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,

        /// Person the card is assigned to
        #[arg(short, long)]
        assignee: Option<String>,
    },

    /// Move a card; positions are as shown by `show`
    Move {
        /// Card ID
        card: String,
        /// Column the card is in
        from: String,
        /// Index of the card in that column
        from_index: usize,
        /// Destination column
        to: String,
        /// Destination index, counted without the moved card
        to_index: usize,
    },

    /// Delete a card
    Remove {
        /// Card ID
        card: String,
    },

    /// Manage projects (lists them when no action is given)
    Projects {
        #[command(subcommand)]
        action: Option<ProjectCommands>,
    },

    /// Show project templates
    Templates,

    /// Manage the team roster (lists it when no action is given)
    Team {
        #[command(subcommand)]
        action: Option<TeamCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List,

    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Deadline (YYYY-MM-DD)
        deadline: NaiveDate,
    },

    /// Create a project from a template, due in 30 days
    FromTemplate {
        /// Template ID (see `templates`)
        template: String,
    },

    /// Delete a project
    Delete {
        /// Project ID
        project: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List team members
    List,

    /// Add a team member
    Add {
        /// Full name
        name: String,
        /// Job title
        role: String,
        /// Contact email
        email: String,

        /// Contact phone
        #[arg(short, long)]
        phone: Option<String>,

        /// Comma-separated skills
        #[arg(short, long)]
        skills: Option<String>,
    },

    /// Change a team member's details
    Update {
        /// Member ID
        member: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Comma-separated skills, replacing the current ones
        #[arg(long)]
        skills: Option<String>,

        /// Availability percentage
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        availability: Option<u8>,
    },

    /// Remove a team member
    Remove {
        /// Member ID
        member: String,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".kanban"))
                .unwrap_or_else(|| PathBuf::from(".kanban"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Takes the subcommand, falling back to showing the whole board.
    pub fn take_command(&mut self) -> Commands {
        self.command.take().unwrap_or(Commands::Show {
            column: None,
            assignee: None,
            search: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let mut cli = Cli::parse_from(["kanban"]);
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.take_command(),
            Commands::Show { column: None, .. }
        ));
    }

    #[test]
    fn test_cli_parse_add_joins_words() {
        let cli = Cli::parse_from(["kanban", "add", "todo", "Write", "docs", "-a", "Anna P."]);
        match cli.command {
            Some(Commands::Add {
                column,
                content,
                assignee,
            }) => {
                assert_eq!(column, "todo");
                assert_eq!(content, ["Write", "docs"]);
                assert_eq!(assignee.as_deref(), Some("Anna P."));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parse_move() {
        let cli = Cli::parse_from(["kanban", "move", "t1", "todo", "0", "done", "2"]);
        match cli.command {
            Some(Commands::Move {
                card,
                from,
                from_index,
                to,
                to_index,
            }) => {
                assert_eq!(card, "t1");
                assert_eq!((from.as_str(), from_index), ("todo", 0));
                assert_eq!((to.as_str(), to_index), ("done", 2));
            }
            _ => panic!("Expected Move command"),
        }
    }

    #[test]
    fn test_cli_parse_project_create() {
        let cli = Cli::parse_from(["kanban", "projects", "create", "Launch", "2025-03-01"]);
        match cli.command {
            Some(Commands::Projects {
                action: Some(ProjectCommands::Create { name, deadline }),
            }) => {
                assert_eq!(name, "Launch");
                assert_eq!(deadline, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
            }
            _ => panic!("Expected projects create"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_deadline() {
        let result = Cli::try_parse_from(["kanban", "projects", "create", "Launch", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_team_add() {
        let cli = Cli::parse_from([
            "kanban", "team", "add", "Anna Park", "QA Engineer", "anna@example.com", "-s",
            "Testing, Rust",
        ]);
        match cli.command {
            Some(Commands::Team {
                action: Some(TeamCommands::Add { name, skills, phone, .. }),
            }) => {
                assert_eq!(name, "Anna Park");
                assert_eq!(skills.as_deref(), Some("Testing, Rust"));
                assert!(phone.is_none());
            }
            _ => panic!("Expected team add"),
        }
    }

    #[test]
    fn test_cli_rejects_availability_over_100() {
        let result =
            Cli::try_parse_from(["kanban", "team", "update", "1", "--availability", "120"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_format() {
        let cli = Cli::parse_from(["kanban", "templates", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["kanban", "-vvv"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
