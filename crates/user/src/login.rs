use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::repository;

pub struct LoginInput {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LoggedIn {
    pub user_id: String,
    pub user_name: String,
}

impl super::Command {
    pub async fn login(&self, input: LoginInput) -> meal_planner_shared::Result<LoggedIn> {
        let Some(row) = repository::find(&self.read_db, input.user_id).await? else {
            meal_planner_shared::unauthorized!("Invalid credentials");
        };

        let parsed_hash = PasswordHash::new(&row.password)?;

        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            meal_planner_shared::unauthorized!("Invalid credentials");
        }

        Ok(LoggedIn {
            user_id: row.id,
            user_name: row.user_name,
        })
    }
}
