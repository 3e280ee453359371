use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use meal_planner_shared::RE_ID;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(
        length(min = 3, max = 64),
        regex(path = *RE_ID, message = "Only letters, digits and underscores are allowed.")
    )]
    pub user_id: String,
    #[validate(length(min = 1, max = 64))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn register(&self, input: RegisterInput) -> meal_planner_shared::Result<()> {
        input.validate()?;

        if repository::find(&self.read_db, &input.user_id).await?.is_some() {
            meal_planner_shared::user!("User ID already exists");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        repository::create(&self.write_db, input.user_id, input.user_name, password_hash).await?;

        tracing::info!("user registered");

        Ok(())
    }
}
