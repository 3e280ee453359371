use serde::Serialize;

use crate::repository::{self, MemberRow};

pub struct JoinInput {
    pub family_id: String,
    pub user_id: String,
    pub role: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Joined {
    pub family_id: String,
    pub family_name: String,
    pub role: String,
    pub display_name: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn join(&self, input: JoinInput) -> meal_planner_shared::Result<Joined> {
        meal_planner_shared::validate_family_id(&input.family_id)?;

        let Some(family) = repository::find(&self.read_db, &input.family_id).await? else {
            meal_planner_shared::not_found!("Family not found");
        };

        let Some(user_name) = repository::find_user_name(&self.read_db, &input.user_id).await?
        else {
            meal_planner_shared::not_found!("User not found");
        };

        if repository::find_member(&self.read_db, &input.family_id, &input.user_id)
            .await?
            .is_some()
        {
            meal_planner_shared::user!("You are already a member of this family");
        }

        let display_name = input
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(user_name);
        let role = input
            .role
            .filter(|role| !role.trim().is_empty())
            .unwrap_or_else(|| meal_planner_shared::MEMBER.to_owned());

        let mut conn = self.write_db.acquire().await?;
        repository::insert_member(
            &mut *conn,
            MemberRow {
                family_id: input.family_id.to_owned(),
                user_id: input.user_id,
                role: role.to_owned(),
                display_name: display_name.to_owned(),
            },
        )
        .await?;

        Ok(Joined {
            family_id: input.family_id,
            family_name: family.name,
            role,
            display_name,
        })
    }
}
