use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct UpdateInput {
    pub user_id: String,
    #[validate(length(min = 1, max = 64))]
    pub user_name: String,
}

impl super::Command {
    pub async fn update(&self, input: UpdateInput) -> meal_planner_shared::Result<()> {
        input.validate()?;

        if repository::find(&self.read_db, &input.user_id).await?.is_none() {
            meal_planner_shared::not_found!("User not found");
        }

        repository::update_name(&self.write_db, input.user_id, input.user_name).await
    }
}
