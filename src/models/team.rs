use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GroupMember {
    pub userid: i64,
    #[serde(default)]
    pub fullname: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamGroup {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<GroupMember>,
}

impl TeamGroup {
    pub fn has_member(&self, user_id: i64) -> bool {
        self.users.iter().any(|member| member.userid == user_id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<GroupMember>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<GroupMember>>::deserialize(deserializer)?.unwrap_or_default())
}
