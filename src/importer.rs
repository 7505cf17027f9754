use std::fmt;

use crate::client::ElabClient;
use crate::directory::Directory;
use crate::error::ImportError;
use crate::logging::{log_debug, log_error, log_info, log_warn};
use crate::models::AssignmentRow;

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Skip calls for memberships the directory already shows
    pub skip_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddToTeam { team: String },
    AddToGroup { team: String, group: String },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddToTeam { team } => write!(f, "add to team '{}'", team),
            Operation::AddToGroup { team, group } => {
                write!(f, "add to team group '{}' of team '{}'", group, team)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Call issued and accepted
    Added,
    /// Call issued, the server refused it
    Rejected(String),
    /// Team or group could not be resolved, no call issued
    NotFound(String),
    /// Membership already present, no call issued
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub operation: Operation,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn call_issued(&self) -> bool {
        matches!(self.status, StepStatus::Added | StepStatus::Rejected(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, StepStatus::Rejected(_) | StepStatus::NotFound(_))
    }
}

#[derive(Debug)]
pub struct RowOutcome {
    pub row: AssignmentRow,
    /// Set when the row could not be acted on at all
    pub error: Option<ImportError>,
    pub steps: Vec<StepOutcome>,
}

impl RowOutcome {
    fn failed(row: &AssignmentRow, error: ImportError) -> Self {
        Self {
            row: row.clone(),
            error: Some(error),
            steps: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.steps.iter().any(StepOutcome::is_failure)
    }

    pub fn failure_reasons(&self) -> Vec<String> {
        let mut reasons: Vec<String> = self.error.iter().map(|e| e.to_string()).collect();
        for step in &self.steps {
            match &step.status {
                StepStatus::Rejected(reason) | StepStatus::NotFound(reason) => {
                    reasons.push(format!("{}: {}", step.operation, reason));
                }
                _ => {}
            }
        }
        reasons
    }
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub outcomes: Vec<RowOutcome>,
}

impl ImportSummary {
    pub fn rows(&self) -> usize {
        self.outcomes.len()
    }

    pub fn team_calls(&self) -> usize {
        self.count_steps(|step| matches!(step.operation, Operation::AddToTeam { .. }) && step.call_issued())
    }

    pub fn group_calls(&self) -> usize {
        self.count_steps(|step| matches!(step.operation, Operation::AddToGroup { .. }) && step.call_issued())
    }

    pub fn added(&self) -> usize {
        self.count_steps(|step| step.status == StepStatus::Added)
    }

    pub fn skipped(&self) -> usize {
        self.count_steps(|step| matches!(step.status, StepStatus::Skipped(_)))
    }

    pub fn failed_rows(&self) -> Vec<&RowOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure()).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(RowOutcome::is_failure)
    }

    fn count_steps<F>(&self, predicate: F) -> usize
    where
        F: Fn(&StepOutcome) -> bool,
    {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.steps.iter())
            .filter(|step| predicate(step))
            .count()
    }
}

/// Applies assignment rows one after another. A failing row is recorded and
/// the run moves on to the next one.
pub struct Importer<'a> {
    client: &'a ElabClient,
    directory: &'a Directory,
    options: ImportOptions,
}

impl<'a> Importer<'a> {
    pub fn new(client: &'a ElabClient, directory: &'a Directory, options: ImportOptions) -> Self {
        Self {
            client,
            directory,
            options,
        }
    }

    pub async fn run<F>(&self, rows: &[AssignmentRow], mut on_row: F) -> ImportSummary
    where
        F: FnMut(&RowOutcome),
    {
        let mut summary = ImportSummary::default();

        for row in rows {
            let outcome = self.process_row(row).await;
            on_row(&outcome);
            summary.outcomes.push(outcome);
        }

        log_info(&format!(
            "Processed {} rows: {} team calls, {} group calls, {} failed",
            summary.rows(),
            summary.team_calls(),
            summary.group_calls(),
            summary.failed_rows().len()
        ));

        summary
    }

    pub async fn process_row(&self, row: &AssignmentRow) -> RowOutcome {
        log_info(&format!("Row {}: processing {}", row.row_number, row.label()));

        let Some(email) = row.email.as_deref() else {
            return self.reject(row, ImportError::InvalidInput("Row has no email".to_string()));
        };

        if let (Some(group), None) = (&row.group, &row.team) {
            return self.reject(
                row,
                ImportError::InvalidInput(format!(
                    "Team group '{}' for user {} needs a team, but the team column is empty",
                    group, email
                )),
            );
        }

        let Some(user) = self.directory.user_by_email(email) else {
            return self.reject(
                row,
                ImportError::NotFound(format!("User with email {} not found on server", email)),
            );
        };
        let user_id = user.userid;
        log_debug(&format!("{} resolved to user {} ({})", email, user_id, user.display_name()));

        if !row.has_work() {
            log_info(&format!("Row {}: no team or group given, nothing to do", row.row_number));
        }

        let mut steps = Vec::new();

        if let Some(team) = &row.team {
            steps.push(self.add_to_team(email, user_id, team).await);
        }

        if let (Some(team), Some(group)) = (&row.team, &row.group) {
            steps.push(self.add_to_group(email, user_id, team, group).await);
        }

        RowOutcome {
            row: row.clone(),
            error: None,
            steps,
        }
    }

    async fn add_to_team(&self, email: &str, user_id: i64, team: &str) -> StepOutcome {
        let operation = Operation::AddToTeam {
            team: team.to_string(),
        };

        let Some(team_id) = self.directory.team_id_by_name(team) else {
            let reason = format!("Team with name {} not found on server", team);
            log_warn(&format!("{}: {}", email, reason));
            return StepOutcome {
                operation,
                status: StepStatus::NotFound(reason),
            };
        };

        if self.options.skip_existing && self.directory.is_team_member(email, team_id) {
            log_info(&format!("{} is already in team {}, skipped", email, team));
            return StepOutcome {
                operation,
                status: StepStatus::Skipped("already a member".to_string()),
            };
        }

        let status = match self.client.add_user_to_team(user_id, team_id).await {
            Ok(()) => {
                log_info(&format!("{} added to team {} (id {})", email, team, team_id));
                StepStatus::Added
            }
            Err(e) => {
                log_error(&format!("Adding {} to team {} failed: {}", email, team, e));
                StepStatus::Rejected(e.to_string())
            }
        };

        StepOutcome { operation, status }
    }

    async fn add_to_group(&self, email: &str, user_id: i64, team: &str, group: &str) -> StepOutcome {
        let operation = Operation::AddToGroup {
            team: team.to_string(),
            group: group.to_string(),
        };

        let not_found = |reason: String| {
            log_warn(&format!("{}: {}", email, reason));
            StepOutcome {
                operation: operation.clone(),
                status: StepStatus::NotFound(reason),
            }
        };

        let Some(team_id) = self.directory.team_id_by_name(team) else {
            return not_found(format!("Team with name {} not found on server", team));
        };

        let Some(team_group) = self.directory.team_group_by_names(team, group) else {
            return not_found(format!("Team group {} in team {} not found on server", group, team));
        };

        if self.options.skip_existing && team_group.has_member(user_id) {
            log_info(&format!("{} is already in team group {}, skipped", email, group));
            return StepOutcome {
                operation,
                status: StepStatus::Skipped("already a member".to_string()),
            };
        }

        let status = match self
            .client
            .add_user_to_team_group(team_id, team_group.id, user_id)
            .await
        {
            Ok(()) => {
                log_info(&format!(
                    "{} added to team group {} (id {}) in team {}",
                    email, group, team_group.id, team
                ));
                StepStatus::Added
            }
            Err(e) => {
                log_error(&format!("Adding {} to team group {} failed: {}", email, group, e));
                StepStatus::Rejected(e.to_string())
            }
        };

        StepOutcome { operation, status }
    }

    fn reject(&self, row: &AssignmentRow, error: ImportError) -> RowOutcome {
        log_error(&format!("Row {}: {}", row.row_number, error));
        RowOutcome::failed(row, error)
    }
}
