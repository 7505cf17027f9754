/// One line of the user list: who goes into which team and team group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentRow {
    /// Line number in the worksheet, header being line 1
    pub row_number: usize,
    pub email: Option<String>,
    pub team: Option<String>,
    pub group: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl AssignmentRow {
    pub fn new(row_number: usize, email: &str) -> Self {
        Self {
            row_number,
            email: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_name(mut self, firstname: &str, lastname: &str) -> Self {
        self.firstname = Some(firstname.to_string());
        self.lastname = Some(lastname.to_string());
        self
    }

    /// Name for console output, falls back to the email.
    pub fn label(&self) -> String {
        let name = [self.firstname.as_deref(), self.lastname.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let email = self.email.as_deref().unwrap_or("<no email>");

        if name.is_empty() {
            email.to_string()
        } else {
            format!("{} <{}>", name, email)
        }
    }

    pub fn has_work(&self) -> bool {
        self.team.is_some() || self.group.is_some()
    }
}
