use std::collections::HashMap;

use crate::client::ElabClient;
use crate::error::ImportResult;
use crate::logging::log_info;
use crate::models::{Team, TeamGroup, User};

/// Lookup tables of the users, teams and team groups known to the server.
#[derive(Debug, Default)]
pub struct Directory {
    users_by_email: HashMap<String, User>,
    teams_by_name: HashMap<String, Team>,
    groups_by_team: HashMap<String, HashMap<String, TeamGroup>>,
}

impl Directory {
    /// Read users, teams and the groups of every team from the server.
    pub async fn load(client: &ElabClient) -> ImportResult<Self> {
        let users = client.get_users().await?;
        let teams = client.get_teams().await?;

        let mut groups = Vec::with_capacity(teams.len());
        for team in &teams {
            groups.push((team.name.clone(), client.get_team_groups(team.id).await?));
        }

        let directory = Self::from_parts(users, teams, groups);
        log_info(&format!(
            "Directory loaded from {}: {} users, {} teams, {} team groups",
            client.base_url(),
            directory.user_count(),
            directory.team_count(),
            directory.group_count()
        ));

        Ok(directory)
    }

    pub fn from_parts(
        users: Vec<User>,
        teams: Vec<Team>,
        groups: Vec<(String, Vec<TeamGroup>)>,
    ) -> Self {
        let users_by_email = users
            .into_iter()
            .map(|user| (normalize_email(&user.email), user))
            .collect();
        let teams_by_name = teams
            .into_iter()
            .map(|team| (team.name.trim().to_string(), team))
            .collect();
        let groups_by_team = groups
            .into_iter()
            .map(|(team_name, team_groups)| {
                let by_name = team_groups
                    .into_iter()
                    .map(|group| (group.name.trim().to_string(), group))
                    .collect();
                (team_name.trim().to_string(), by_name)
            })
            .collect();

        Self {
            users_by_email,
            teams_by_name,
            groups_by_team,
        }
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users_by_email.get(&normalize_email(email))
    }

    pub fn team_id_by_name(&self, team: &str) -> Option<i64> {
        self.teams_by_name.get(team.trim()).map(|team| team.id)
    }

    pub fn team_group_by_names(&self, team: &str, group: &str) -> Option<&TeamGroup> {
        self.groups_by_team.get(team.trim())?.get(group.trim())
    }

    pub fn is_team_member(&self, email: &str, team_id: i64) -> bool {
        self.user_by_email(email)
            .map(|user| user.team_ids().contains(&team_id))
            .unwrap_or(false)
    }

    pub fn user_count(&self) -> usize {
        self.users_by_email.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams_by_name.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups_by_team.values().map(HashMap::len).sum()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
