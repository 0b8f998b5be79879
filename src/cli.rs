//! `pert` command line.
//!
//! Every editing subcommand loads the snapshot, runs its commands through the
//! store and writes the result back. Read-only subcommands never touch the
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pert_core::export::{to_csv, to_json, ReportView};
use pert_core::pert::{format_hours, EstimateSummary};
use pert_core::store::{MilestoneUpdate, ProjectField, QAndAField, TaskUpdate};
use pert_core::{Command, EstimateKind, Estimates, Outcome, Project};

use crate::config::AppConfig;
use crate::render::render_project;
use crate::session::SessionHandle;
use crate::snapshot::{self, SnapshotFile};

#[derive(Parser)]
#[command(name = "pert")]
#[command(about = "PERT project estimation with milestones, three-point estimates and exports")]
pub struct Cli {
    /// Snapshot file to work on (defaults to the configured or platform data path)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new estimation snapshot
    Init {
        /// Client name
        #[arg(long)]
        client: Option<String>,
        /// Project name
        #[arg(long)]
        name: Option<String>,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Print milestones and tasks as a tree with expected hours
    Show,
    /// Print one task with its estimate spread
    Inspect { milestone: String, task: String },
    /// Set client or project name
    Set {
        #[command(subcommand)]
        field: SetField,
    },
    /// Add, rename, enable, disable or delete milestones
    Milestone {
        #[command(subcommand)]
        action: MilestoneAction,
    },
    /// Add, edit, move or delete tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Edit a task's questions and answers
    Qa {
        #[command(subcommand)]
        action: QaAction,
    },
    /// Replace the internal remarks (Markdown, never exported)
    Remarks { text: String },
    /// Replace the project with a JSON snapshot
    Import { path: PathBuf },
    /// Write the project as JSON, CSV or a report view model
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the project over a local HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum SetField {
    Client { value: String },
    Name { value: String },
}

#[derive(Subcommand)]
pub enum MilestoneAction {
    Add,
    Rename { id: String, name: String },
    Enable { id: String },
    Disable { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a new task to a milestone
    Add { milestone: String },
    /// Edit text fields
    Set {
        milestone: String,
        task: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tests: Option<String>,
        /// Definition of done
        #[arg(long)]
        dod: Option<String>,
    },
    /// Set estimate hours
    Estimate {
        milestone: String,
        task: String,
        #[arg(short, long, value_parser = parse_hours)]
        optimistic: Option<f64>,
        #[arg(short, long, value_parser = parse_hours)]
        most_likely: Option<f64>,
        #[arg(short, long, value_parser = parse_hours)]
        pessimistic: Option<f64>,
    },
    Enable { milestone: String, task: String },
    Disable { milestone: String, task: String },
    Delete { milestone: String, task: String },
    /// Move a task to the end of another milestone
    Move {
        task: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum QaAction {
    Add {
        milestone: String,
        task: String,
    },
    Set {
        milestone: String,
        task: String,
        index: usize,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },
    Delete {
        milestone: String,
        task: String,
        index: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Report,
}

/// Estimate hours must be finite and non-negative.
pub fn parse_hours(s: &str) -> Result<f64, String> {
    let hours: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !Estimates::is_valid_hours(hours) {
        return Err(format!("hours must be a non-negative number, got {}", s));
    }
    Ok(hours)
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let file = config.snapshot_file(cli.file)?;

    match cli.command {
        Commands::Init {
            client,
            name,
            force,
        } => init(&file, &config, client, name, force),
        Commands::Show => {
            print!("{}", render_project(&file.load_or_default()?));
            Ok(())
        }
        Commands::Inspect { milestone, task } => inspect(&file.load_or_default()?, &milestone, &task),
        Commands::Export { format, output } => {
            let project = file.load_or_default()?;
            let content = export(&project, format)?;
            write_output(output.as_deref(), &content)
        }
        Commands::Import { path } => {
            let project = snapshot::import(&path)?;
            edit(&file, vec![Command::LoadProject(project)])
        }
        Commands::Serve { port } => serve(file, port.unwrap_or(config.port)).await,
        Commands::Set { field } => edit(&file, vec![field.into_command()]),
        Commands::Milestone { action } => edit(&file, vec![action.into_command()]),
        Commands::Task { action } => edit(&file, action.into_commands()),
        Commands::Qa { action } => edit(&file, action.into_commands()),
        Commands::Remarks { text } => edit(&file, vec![Command::UpdateRemarks(text)]),
    }
}

impl SetField {
    pub fn into_command(self) -> Command {
        let (field, value) = match self {
            Self::Client { value } => (ProjectField::ClientName, value),
            Self::Name { value } => (ProjectField::ProjectName, value),
        };
        Command::SetProjectField { field, value }
    }
}

impl MilestoneAction {
    pub fn into_command(self) -> Command {
        match self {
            Self::Add => Command::AddMilestone,
            Self::Rename { id, name } => Command::UpdateMilestone {
                id,
                update: MilestoneUpdate::Name(name),
            },
            Self::Enable { id } => Command::UpdateMilestone {
                id,
                update: MilestoneUpdate::IsEnabled(true),
            },
            Self::Disable { id } => Command::UpdateMilestone {
                id,
                update: MilestoneUpdate::IsEnabled(false),
            },
            Self::Delete { id } => Command::DeleteMilestone { id },
        }
    }
}

impl TaskAction {
    pub fn into_commands(self) -> Vec<Command> {
        match self {
            Self::Add { milestone } => vec![Command::AddTask {
                milestone_id: milestone,
            }],
            Self::Set {
                milestone,
                task,
                name,
                description,
                tests,
                dod,
            } => [
                name.map(TaskUpdate::Name),
                description.map(TaskUpdate::Description),
                tests.map(TaskUpdate::Tests),
                dod.map(TaskUpdate::DefinitionOfDone),
            ]
            .into_iter()
            .flatten()
            .map(|update| Command::UpdateTask {
                milestone_id: milestone.clone(),
                task_id: task.clone(),
                update,
            })
            .collect(),
            Self::Estimate {
                milestone,
                task,
                optimistic,
                most_likely,
                pessimistic,
            } => [
                (EstimateKind::Optimistic, optimistic),
                (EstimateKind::MostLikely, most_likely),
                (EstimateKind::Pessimistic, pessimistic),
            ]
            .into_iter()
            .filter_map(|(which, value)| {
                value.map(|value| Command::UpdateEstimate {
                    milestone_id: milestone.clone(),
                    task_id: task.clone(),
                    which,
                    value,
                })
            })
            .collect(),
            Self::Enable { milestone, task } => vec![Command::UpdateTask {
                milestone_id: milestone,
                task_id: task,
                update: TaskUpdate::IsEnabled(true),
            }],
            Self::Disable { milestone, task } => vec![Command::UpdateTask {
                milestone_id: milestone,
                task_id: task,
                update: TaskUpdate::IsEnabled(false),
            }],
            Self::Delete { milestone, task } => vec![Command::DeleteTask {
                milestone_id: milestone,
                task_id: task,
            }],
            Self::Move { task, from, to } => vec![Command::MoveTask {
                source_milestone_id: from,
                dest_milestone_id: to,
                task_id: task,
            }],
        }
    }
}

impl QaAction {
    pub fn into_commands(self) -> Vec<Command> {
        match self {
            Self::Add { milestone, task } => vec![Command::AddQAndA {
                milestone_id: milestone,
                task_id: task,
            }],
            Self::Set {
                milestone,
                task,
                index,
                question,
                answer,
            } => [
                question.map(|v| (QAndAField::Question, v)),
                answer.map(|v| (QAndAField::Answer, v)),
            ]
            .into_iter()
            .flatten()
            .map(|(field, value)| Command::UpdateQAndA {
                milestone_id: milestone.clone(),
                task_id: task.clone(),
                index,
                field,
                value,
            })
            .collect(),
            Self::Delete {
                milestone,
                task,
                index,
            } => vec![Command::DeleteQAndA {
                milestone_id: milestone,
                task_id: task,
                index,
            }],
        }
    }
}

/// Apply `commands` to the stored project and save it.
///
/// Returns how many commands took effect; ignored ones are reported but do
/// not fail the run.
pub fn apply_to_file(file: &SnapshotFile, commands: Vec<Command>) -> Result<usize> {
    let mut project = file.load_or_default()?;
    let mut applied = 0;

    for command in commands {
        let name = command.as_str();
        match project.execute(command) {
            Outcome::Applied => applied += 1,
            Outcome::Ignored => {
                tracing::warn!(command = name, "Nothing matched; command ignored")
            }
        }
    }

    if applied > 0 {
        file.save(&project)?;
    }
    Ok(applied)
}

fn edit(file: &SnapshotFile, commands: Vec<Command>) -> Result<()> {
    if commands.is_empty() {
        anyhow::bail!("Nothing to change: pass at least one field");
    }
    apply_to_file(file, commands)?;
    Ok(())
}

fn init(
    file: &SnapshotFile,
    config: &AppConfig,
    client: Option<String>,
    name: Option<String>,
    force: bool,
) -> Result<()> {
    if file.exists() && !force {
        anyhow::bail!(
            "Snapshot {} already exists (use --force to overwrite)",
            file.path().display()
        );
    }

    let project = Project {
        client_name: client.unwrap_or_else(|| config.client_name.clone()),
        project_name: name.unwrap_or_else(|| config.project_name.clone()),
        ..Project::default()
    };
    file.save(&project)?;
    println!("Created {}", file.path().display());
    Ok(())
}

fn inspect(project: &Project, milestone_id: &str, task_id: &str) -> Result<()> {
    let task = project
        .task(milestone_id, task_id)
        .ok_or_else(|| anyhow::anyhow!("Task {} not found in milestone {}", task_id, milestone_id))?;
    let summary = EstimateSummary::of(&task.estimates);

    println!("{} {}", task.id, task.name);
    if !task.description.is_empty() {
        println!("{}", task.description);
    }
    println!(
        "O {}h  M {}h  P {}h",
        format_hours(task.estimates.optimistic),
        format_hours(task.estimates.most_likely),
        format_hours(task.estimates.pessimistic)
    );
    println!("Expected (E)  {}h", format_hours(summary.expected));
    println!("Std dev (σ)   {}h", format_hours(summary.std_dev));
    for band in &summary.bands {
        println!(
            "{}  {}h – {}h",
            band.label,
            format_hours(band.band.low),
            format_hours(band.band.high)
        );
    }
    for (i, entry) in task.q_and_a.iter().enumerate() {
        println!("Q{}: {}", i, entry.question);
        println!("A{}: {}", i, entry.answer);
    }
    Ok(())
}

pub fn export(project: &Project, format: ExportFormat) -> Result<String> {
    let content = match format {
        ExportFormat::Json => to_json(project).context("Failed to serialize snapshot")?,
        ExportFormat::Csv => to_csv(project),
        ExportFormat::Report => serde_json::to_string_pretty(&ReportView::of(project))
            .context("Failed to serialize report")?,
    };
    Ok(content)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn serve(file: SnapshotFile, port: u16) -> Result<()> {
    let project = file.load_or_default()?;
    tracing::info!(
        "Loaded {:?} with {} milestones from {}",
        project.project_name,
        project.milestones.len(),
        file.path().display()
    );

    let session = SessionHandle::spawn(project);
    let app = crate::api::create_router(session, Some(file));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("PERT estimator listening on http://127.0.0.1:{}/api/v1", port);

    axum::serve(listener, app).await?;
    Ok(())
}
