use meal_planner_message::SendInput;

use crate::repository::{self, MemberRow};

pub struct InviteInput {
    pub family_id: String,
    pub invited_user_id: String,
}

impl super::Command {
    /// Adds the user as a plain member and drops an invitation in their inbox.
    /// Returns the invited user's name.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.invited_user_id))]
    pub async fn invite(&self, input: InviteInput) -> meal_planner_shared::Result<String> {
        let Some(user_name) =
            repository::find_user_name(&self.read_db, &input.invited_user_id).await?
        else {
            meal_planner_shared::not_found!("User not found");
        };

        let Some(family) = repository::find(&self.read_db, &input.family_id).await? else {
            meal_planner_shared::not_found!("Family not found");
        };

        if repository::find_member(&self.read_db, &input.family_id, &input.invited_user_id)
            .await?
            .is_some()
        {
            meal_planner_shared::user!("User is already a member of this family");
        }

        let mut conn = self.write_db.acquire().await?;
        repository::insert_member(
            &mut *conn,
            MemberRow {
                family_id: input.family_id.to_owned(),
                user_id: input.invited_user_id.to_owned(),
                role: meal_planner_shared::MEMBER.to_owned(),
                display_name: user_name.to_owned(),
            },
        )
        .await?;
        drop(conn);

        let message = SendInput {
            user_id: input.invited_user_id,
            message_type: meal_planner_message::FAMILY_INVITATION.to_owned(),
            title: format!("Family Invitation - {}", family.name),
            content: format!(
                "You have been invited to join the family '{}' (ID: {}). Welcome!",
                family.name, family.id
            ),
            action_url: Some("manage_family.html".to_owned()),
        };

        if let Err(err) = meal_planner_message::Command(self.0.clone())
            .send(message)
            .await
        {
            tracing::warn!(error = %err, "failed to send invitation message");
        }

        Ok(user_name)
    }
}
