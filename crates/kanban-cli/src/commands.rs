//! Command handlers for CLI subcommands.

use std::path::Path;

use chrono::Local;
use kanban_board::{
    BoardError, BoardManager, CardFilter, CardMatch, Commit, MoveRequest, ProjectRegistry,
    SaveOutcome, TeamRegistry,
};
use kanban_models::{parse_skills, Card, ColumnId, Project, ProjectTemplate, TeamMember};
use kanban_persistence::{FileStore, SnapshotStore};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{Commands, OutputFormat, ProjectCommands, TeamCommands};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command.
pub fn execute(command: Commands, state_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = FileStore::new(state_dir);
    debug!(state_dir = %state_dir.display(), "Using state directory");

    match command {
        Commands::Projects { action } => {
            let mut registry = ProjectRegistry::new(store);
            report_save(&registry.load()?);
            cmd_projects(&mut registry, action.unwrap_or(ProjectCommands::List), format)
        }
        Commands::Templates => {
            cmd_templates(ProjectRegistry::new(store).templates(), format)
        }
        Commands::Team { action } => {
            let mut registry = TeamRegistry::new(store);
            report_save(&registry.load()?);
            cmd_team(&mut registry, action.unwrap_or(TeamCommands::List), format)
        }
        board_command => {
            let mut manager = BoardManager::new(store);
            report_save(&manager.load_board()?.save);
            cmd_board(&mut manager, board_command, format)
        }
    }
}

fn cmd_board<S: SnapshotStore>(
    manager: &mut BoardManager<S>,
    command: Commands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Show {
            column,
            assignee,
            search,
        } => {
            let mut filter = CardFilter::new();
            if let Some(column) = column {
                filter = filter.with_column(parse_column(&column)?);
            }
            if let Some(assignee) = assignee {
                filter = filter.with_assignee(assignee);
            }
            if let Some(search) = search {
                filter = filter.with_text(search);
            }
            cmd_show(manager, &filter, format)
        }
        Commands::Add {
            column,
            content,
            assignee,
        } => cmd_add(manager, &column, &content.join(" "), assignee.as_deref()),
        Commands::Move {
            card,
            from,
            from_index,
            to,
            to_index,
        } => {
            let request = MoveRequest::new(
                card,
                (parse_column(&from)?, from_index),
                (parse_column(&to)?, to_index),
            );
            cmd_move(manager, &request)
        }
        Commands::Remove { card } => cmd_remove(manager, &card),
        Commands::Projects { .. } | Commands::Templates | Commands::Team { .. } => Ok(()),
    }
}

/// Parses a column name, reporting unknown names as validation errors.
fn parse_column(name: &str) -> std::result::Result<ColumnId, BoardError> {
    Ok(name.parse::<ColumnId>()?)
}

/// One card as printed by `show --format json` with a filter.
#[derive(Serialize)]
struct CardView<'a> {
    column: ColumnId,
    index: usize,
    #[serde(flatten)]
    card: &'a Card,
}

impl<'a> From<&CardMatch<'a>> for CardView<'a> {
    fn from(found: &CardMatch<'a>) -> Self {
        Self {
            column: found.column,
            index: found.index,
            card: found.card,
        }
    }
}

fn cmd_show<S: SnapshotStore>(
    manager: &BoardManager<S>,
    filter: &CardFilter,
    format: OutputFormat,
) -> Result<()> {
    let board = manager.board()?;
    let unfiltered = filter.column.is_none() && filter.assignee.is_none() && filter.text.is_none();
    let found = manager.find_cards(filter)?;

    match format {
        OutputFormat::Table => {
            for column in board.columns() {
                if filter.column.is_some_and(|wanted| wanted != column.id) {
                    continue;
                }
                let cards: Vec<_> = found.iter().filter(|m| m.column == column.id).collect();
                println!("{} ({})", column.title, cards.len());
                println!("{}", "-".repeat(60));
                for found in cards {
                    println!(
                        "  {:>2}  {:<38}  {}",
                        found.index,
                        truncate(&found.card.content, 38),
                        found.card.assignee.as_deref().unwrap_or("")
                    );
                    println!("      {}", found.card.id);
                }
                println!();
            }
            println!("{} card(s)", found.len());
        }
        OutputFormat::Json => {
            let json = if unfiltered {
                serde_json::to_string_pretty(board)?
            } else {
                let views: Vec<CardView<'_>> = found.iter().map(CardView::from).collect();
                serde_json::to_string_pretty(&views)?
            };
            println!("{}", json);
        }
        OutputFormat::Brief => {
            for found in &found {
                println!(
                    "{}\t{}\t{}\t{}",
                    found.column, found.index, found.card.id, found.card.content
                );
            }
        }
    }

    Ok(())
}

fn cmd_add<S: SnapshotStore>(
    manager: &mut BoardManager<S>,
    column: &str,
    content: &str,
    assignee: Option<&str>,
) -> Result<()> {
    let column = parse_column(column)?;
    let (card_id, commit) = match assignee {
        Some(assignee) => manager.add_assigned_card(column, content, assignee)?,
        None => manager.add_card(column, content)?,
    };

    println!("Added card {} to {}", card_id, column.default_title());
    report_commit(&commit);
    Ok(())
}

fn cmd_move<S: SnapshotStore>(manager: &mut BoardManager<S>, request: &MoveRequest) -> Result<()> {
    let commit = manager.move_card(request)?;

    if commit.changed {
        println!(
            "Moved card {} to {}[{}]",
            request.card_id, request.destination, request.destination_index
        );
    } else {
        println!("Card {} is already there", request.card_id);
    }
    report_commit(&commit);
    Ok(())
}

fn cmd_remove<S: SnapshotStore>(manager: &mut BoardManager<S>, card: &str) -> Result<()> {
    let (removed, commit) = manager.remove_card(&card.into())?;

    println!("Removed card {} ({})", removed.id, removed.content);
    report_commit(&commit);
    Ok(())
}

fn cmd_projects<S: SnapshotStore>(
    registry: &mut ProjectRegistry<S>,
    action: ProjectCommands,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ProjectCommands::List => print_projects(registry.projects()?, format),
        ProjectCommands::Create { name, deadline } => {
            let (id, save) = registry.create(&name, deadline)?;
            println!("Created project '{}' ({}), due {}", name.trim(), id, deadline);
            report_save(&save);
            Ok(())
        }
        ProjectCommands::FromTemplate { template } => {
            let today = Local::now().date_naive();
            let (id, save) = registry.create_from_template(&template, today)?;
            if let Some(project) = registry.projects()?.iter().find(|p| p.id == id) {
                println!(
                    "Created project '{}' ({}), due {}",
                    project.name, project.id, project.deadline
                );
            }
            report_save(&save);
            Ok(())
        }
        ProjectCommands::Delete { project } => {
            let (removed, save) = registry.delete(&project.as_str().into())?;
            println!("Deleted project '{}' ({})", removed.name, removed.id);
            report_save(&save);
            Ok(())
        }
    }
}

fn print_projects(projects: &[Project], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if projects.is_empty() {
                println!("No projects found.");
                return Ok(());
            }

            println!(
                "{:<12}  {:<24}  {:>4}  {:<16}  {:<10}  TEAM",
                "ID", "NAME", "PCT", "STATUS", "DEADLINE"
            );
            println!("{}", "-".repeat(84));
            for project in projects {
                println!(
                    "{:<12}  {:<24}  {:>3}%  {:<16}  {:<10}  {}",
                    project.id.as_str(),
                    truncate(&project.name, 24),
                    project.progress,
                    truncate(&project.status, 16),
                    project.deadline,
                    project.team_initials().join(" ")
                );
            }
            println!("\n{} project(s)", projects.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(projects)?);
        }
        OutputFormat::Brief => {
            for project in projects {
                println!("{}\t{}", project.id, project.name);
            }
        }
    }

    Ok(())
}

fn cmd_templates(templates: &[ProjectTemplate], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(templates)?),
        OutputFormat::Brief => {
            for template in templates {
                println!("{}\t{}", template.id, template.name);
            }
        }
        OutputFormat::Table => {
            println!("Project Templates:");
            println!();
            for template in templates {
                println!("  {} - {}", template.id, template.name);
                println!("    {} | {} tasks", template.duration, template.tasks);
                println!();
            }
        }
    }

    Ok(())
}

fn cmd_team<S: SnapshotStore>(
    registry: &mut TeamRegistry<S>,
    action: TeamCommands,
    format: OutputFormat,
) -> Result<()> {
    match action {
        TeamCommands::List => print_team(registry.members()?, format),
        TeamCommands::Add {
            name,
            role,
            email,
            phone,
            skills,
        } => {
            let mut member = TeamMember::new(name, role, email);
            if let Some(phone) = phone {
                member = member.with_phone(phone);
            }
            if let Some(skills) = skills {
                member = member.with_skills(parse_skills(&skills));
            }
            let (id, save) = registry.add(member)?;
            println!("Added team member {}", id);
            report_save(&save);
            Ok(())
        }
        TeamCommands::Update {
            member,
            name,
            role,
            email,
            phone,
            skills,
            availability,
        } => {
            let mut updated = registry.member(&member.as_str().into())?.clone();
            if let Some(name) = name {
                updated.name = name;
            }
            if let Some(role) = role {
                updated.role = role;
            }
            if let Some(email) = email {
                updated.email = email;
            }
            if let Some(phone) = phone {
                updated.phone = phone;
            }
            if let Some(skills) = skills {
                updated.skills = parse_skills(&skills);
            }
            if let Some(availability) = availability {
                updated = updated.with_availability(availability);
            }
            let save = registry.update(updated)?;
            println!("Updated team member {}", member);
            report_save(&save);
            Ok(())
        }
        TeamCommands::Remove { member } => {
            let (removed, save) = registry.remove(&member.as_str().into())?;
            println!("Removed team member '{}' ({})", removed.name, removed.id);
            report_save(&save);
            Ok(())
        }
    }
}

fn print_team(members: &[TeamMember], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if members.is_empty() {
                println!("No team members found.");
                return Ok(());
            }

            println!(
                "{:<12}  {:<18}  {:<18}  {:<26}  {:>5}  SKILLS",
                "ID", "NAME", "ROLE", "EMAIL", "AVAIL"
            );
            println!("{}", "-".repeat(100));
            for member in members {
                println!(
                    "{:<12}  {:<18}  {:<18}  {:<26}  {:>4}%  {}",
                    member.id.as_str(),
                    truncate(&member.name, 18),
                    truncate(&member.role, 18),
                    truncate(&member.email, 26),
                    member.availability,
                    member.skills.join(", ")
                );
            }
            println!("\n{} member(s)", members.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(members)?);
        }
        OutputFormat::Brief => {
            for member in members {
                println!("{}\t{}\t{}", member.id, member.name, member.role);
            }
        }
    }

    Ok(())
}

fn report_commit(commit: &Commit) {
    report_save(&commit.save);
}

/// Warns when a change stayed local because the store did not take it.
fn report_save(save: &SaveOutcome) {
    if let SaveOutcome::Failed(error) = save {
        warn!(error = %error, "Change not saved");
        eprintln!("Warning: change kept for this session but not saved: {}", error);
    }
}

/// Truncates a string to the given number of characters, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
