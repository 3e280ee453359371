use meal_planner_db::table::{WheelCandidate, WheelPick, WheelVote};
use meal_planner_shared::MealType;
use sea_query::{Condition, Expr, ExprTrait};
use serde::Deserialize;

/// A wheel round: one family, one day, one meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub family_id: String,
    pub meal_date: String,
    pub meal_type: MealType,
}

impl Session {
    pub fn new(
        family_id: &str,
        meal_date: &str,
        meal_type: &str,
    ) -> meal_planner_shared::Result<Self> {
        let (family_id, meal_date, meal_type) =
            (family_id.trim(), meal_date.trim(), meal_type.trim());

        if family_id.is_empty() || meal_date.is_empty() || meal_type.is_empty() {
            meal_planner_shared::user!("Missing fields");
        }

        Ok(Self {
            family_id: family_id.to_owned(),
            meal_date: meal_planner_shared::format_date(meal_planner_shared::parse_date(
                meal_date,
            )?),
            meal_type: MealType::parse(meal_type)?,
        })
    }

    pub(crate) fn candidates(&self) -> Condition {
        Condition::all()
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::FamilyId)).eq(self.family_id.as_str()))
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::MealDate)).eq(self.meal_date.as_str()))
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::MealType)).eq(self.meal_type.to_string()))
    }

    pub(crate) fn votes(&self) -> Condition {
        Condition::all()
            .add(Expr::col((WheelVote::Table, WheelVote::FamilyId)).eq(self.family_id.as_str()))
            .add(Expr::col((WheelVote::Table, WheelVote::MealDate)).eq(self.meal_date.as_str()))
            .add(Expr::col((WheelVote::Table, WheelVote::MealType)).eq(self.meal_type.to_string()))
    }

    pub(crate) fn picks(&self) -> Condition {
        Condition::all()
            .add(Expr::col(WheelPick::FamilyId).eq(self.family_id.as_str()))
            .add(Expr::col(WheelPick::MealDate).eq(self.meal_date.as_str()))
            .add(Expr::col(WheelPick::MealType).eq(self.meal_type.to_string()))
    }
}

/// Candidate ids travel as strings in responses, so clients send either form back.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateRef {
    Number(i64),
    Text(String),
}

impl CandidateRef {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Number(id) => Some(*id),
            Self::Text(id) => id.trim().parse().ok(),
        }
    }
}
