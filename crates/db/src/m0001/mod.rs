mod family;
mod meal_code;
mod message;
mod plan;
mod submission;
mod user;
mod wheel;

use sqlx_migrator::vec_box;

pub struct M0001;

sqlx_migrator::sqlite_migration!(
    M0001,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        user::Operation,
        family::Operation,
        meal_code::Operation,
        submission::Operation,
        message::Operation,
        wheel::Operation,
        plan::Operation
    ]
);

async fn execute_all(
    connection: &mut sqlx::SqliteConnection,
    statements: Vec<String>,
) -> Result<(), sqlx_migrator::Error> {
    for statement in statements {
        sqlx::query(&statement).execute(&mut *connection).await?;
    }

    Ok(())
}

macro_rules! operation {
    () => {
        pub struct Operation;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                super::execute_all(connection, up_statements()).await
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                super::execute_all(connection, down_statements()).await
            }
        }
    };
}

pub(crate) use operation;
