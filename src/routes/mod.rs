use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

mod family;
mod health;
mod image;
mod meal_code;
mod message;
mod plan;
mod preferences;
mod submission;
mod user;
mod wheel;

#[derive(Clone)]
pub struct AppState {
    pub user_command: meal_planner_user::Command,
    pub family_command: meal_planner_family::Command,
    pub submission_command: meal_planner_submission::Command,
    pub wheel_command: meal_planner_wheel::Command,
    pub message_command: meal_planner_message::Command,
    pub plan_command: meal_planner_plan::Command,
    pub images: meal_planner_image::ImageResolver,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(
        state: meal_planner_shared::State,
        plan_command: meal_planner_plan::Command,
        images: meal_planner_image::ImageResolver,
    ) -> Self {
        Self {
            user_command: meal_planner_user::Command(state.clone()),
            family_command: meal_planner_family::Command(state.clone()),
            submission_command: meal_planner_submission::Command(state.clone()),
            wheel_command: meal_planner_wheel::Command(state.clone()),
            message_command: meal_planner_message::Command(state.clone()),
            plan_command,
            images,
            pool: state.read_db,
        }
    }

    pub(crate) fn users(&self) -> meal_planner_user::Query {
        meal_planner_user::Query(self.pool.clone())
    }

    pub(crate) fn families(&self) -> meal_planner_family::Query {
        meal_planner_family::Query(self.pool.clone())
    }

    pub(crate) fn submissions(&self) -> meal_planner_submission::Query {
        meal_planner_submission::Query(self.pool.clone())
    }

    pub(crate) fn wheels(&self) -> meal_planner_wheel::Query {
        meal_planner_wheel::Query(self.pool.clone())
    }

    pub(crate) fn messages(&self) -> meal_planner_message::Query {
        meal_planner_message::Query(self.pool.clone())
    }

    pub(crate) fn plans(&self) -> meal_planner_plan::Query {
        meal_planner_plan::Query(self.pool.clone())
    }
}

/// Serializes `value` and marks the object with `"ok": true`.
pub(crate) fn ok_json(value: impl Serialize) -> crate::error::Result<Json<Value>> {
    let mut value = serde_json::to_value(value)?;
    if let Value::Object(map) = &mut value {
        map.insert("ok".to_owned(), Value::Bool(true));
    }

    Ok(Json(value))
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        // user
        .route("/user/register", post(user::register))
        .route("/user/login", post(user::login))
        .route("/user/update", post(user::update))
        .route("/user/{user_id}/families", get(user::families))
        .route("/user/{user_id}/owned-families", get(user::owned_families))
        .route("/user/{user_id}/exists", get(user::exists))
        .route("/user/{user_id}", get(user::detail))
        // family
        .route("/family/create", post(family::create))
        .route("/family/join", post(family::join))
        .route("/family/invite", post(family::invite))
        .route("/family/delete", delete(family::delete))
        .route("/family/remove-member", delete(family::remove_member))
        .route("/family/{family_id}/members", get(family::members))
        .route(
            "/family/user/{user_id}/new-members-count",
            get(family::new_members_count),
        )
        .route(
            "/family/{family_id}/meal-times",
            get(family::meal_times).put(family::update_meal_times),
        )
        .route("/family/{family_id}/settings", get(family::settings))
        .route(
            "/family/{family_id}/settings/meal-times",
            get(family::meal_times).post(family::update_settings_meal_times),
        )
        .route(
            "/family/{family_id}/active-meal",
            get(family::active_meal).post(family::set_active_meal),
        )
        // meal codes
        .route("/meal-code/create", post(meal_code::create))
        .route("/meal-code/validate/{code}", get(meal_code::validate))
        .route("/meal-code/user/{user_id}", get(meal_code::user_codes))
        .route("/meal-code/{code}", get(meal_code::lookup))
        // submissions
        .route("/submissions/submit", post(submission::submit))
        .route(
            "/submissions/submit-by-meal-code",
            post(submission::submit_by_meal_code),
        )
        .route("/submissions/my", get(submission::my))
        .route("/submissions/family/{family_id}", get(submission::by_family))
        .route("/submissions/family/{family_id}/at", get(submission::at))
        .route("/submissions/family/{family_id}/meals", get(submission::meals))
        .route(
            "/submissions/{id}",
            get(submission::detail).delete(submission::delete),
        )
        // preferences
        .route("/preferences/save", post(preferences::save))
        .route("/preferences/family/{family_id}", get(preferences::family))
        .route("/preferences/merged", get(preferences::merged))
        // wheel
        .route("/wheel/state", get(wheel::state))
        .route("/wheel/nominate", post(wheel::nominate))
        .route("/wheel/vote", post(wheel::vote))
        .route(
            "/wheel/candidate/{id}",
            axum::routing::put(wheel::rename_candidate).delete(wheel::delete_candidate),
        )
        .route("/wheel/pick", post(wheel::pick))
        .route("/wheel/picks/latest", get(wheel::latest_pick))
        // messages
        .route("/messages/user/{user_id}", get(message::inbox))
        .route("/messages/user/{user_id}/unread-count", get(message::unread_count))
        .route("/messages/user/{user_id}/read-all", post(message::read_all))
        .route("/messages/{id}/read", post(message::read))
        .route("/messages/send", post(message::send))
        .route("/messages/plan-generated", post(message::plan_generated))
        // plans
        .route("/plan/generate", post(plan::generate))
        .route("/plan/ingest", post(plan::ingest))
        .route("/plan/id/{id}", get(plan::get))
        .route("/plan/family/{family_id}", get(plan::by_family))
        .route("/plan/latest", get(plan::latest))
        .route("/plan/meal-code/{code}", get(plan::by_meal_code))
        .route(
            "/plan/active-context",
            get(plan::active_context).post(plan::set_active_context),
        )
        .route("/plan/{id}", delete(plan::delete))
        .route("/plan/{id}/feedback", post(plan::feedback))
        .route("/plan/{id}/comment", post(plan::comment))
        .route("/plan/{id}/regenerate", post(plan::regenerate))
        // images
        .route("/images/scrape", get(image::scrape))
        .route("/images/dish", get(image::dish))
        .route("/images/for-dish", get(image::for_dish));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .nest("/api", api)
        .with_state(app_state)
}
