use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub proposer: String,
    pub proposer_name: String,
    pub votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nomination {
    pub candidate_id: i64,
    pub dish: String,
    pub votes: i64,
}

/// What plan generation needs to know about a wheel round.
#[derive(Debug, Clone, Default)]
pub struct WheelContext {
    /// Proposers in order of their first nomination.
    pub participants: Vec<String>,
    /// At most two nominations per participant, best voted first.
    pub nominations: HashMap<String, Vec<Nomination>>,
    pub winner_dish: Option<String>,
    pub winner_proposer: Option<String>,
    pub all_names: BTreeSet<String>,
    pub candidates: Vec<Candidate>,
}

impl WheelContext {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Case-insensitive lookup of the candidate carrying `dish`.
    pub fn proposer_of(&self, dish: &str) -> Option<&Candidate> {
        let dish = dish.trim().to_lowercase();

        self.candidates
            .iter()
            .find(|candidate| candidate.name.trim().to_lowercase() == dish)
    }

    pub fn nominations_of(&self, user_id: &str) -> &[Nomination] {
        self.nominations
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn by_votes_then_id(a_votes: i64, a_id: i64, b_votes: i64, b_id: i64) -> std::cmp::Ordering {
    b_votes.cmp(&a_votes).then(a_id.cmp(&b_id))
}

/// Builds the generation context from candidates and the latest recorded pick.
///
/// A recorded pick wins; otherwise the most voted candidate does, ties going
/// to the oldest nomination.
pub fn build_context(mut candidates: Vec<Candidate>, picked: Option<&str>) -> WheelContext {
    candidates.sort_by_key(|candidate| candidate.id);

    let mut ctx = WheelContext::default();

    for candidate in &candidates {
        ctx.all_names.insert(candidate.name.to_owned());

        if !ctx.participants.contains(&candidate.proposer) {
            ctx.participants.push(candidate.proposer.to_owned());
        }

        ctx.nominations
            .entry(candidate.proposer.to_owned())
            .or_default()
            .push(Nomination {
                candidate_id: candidate.id,
                dish: candidate.name.to_owned(),
                votes: candidate.votes,
            });
    }

    for nominations in ctx.nominations.values_mut() {
        nominations.sort_by(|a, b| by_votes_then_id(a.votes, a.candidate_id, b.votes, b.candidate_id));
        nominations.truncate(crate::MAX_NOMINATIONS as usize);
    }

    ctx.candidates = candidates;

    let picked = picked.map(str::trim).filter(|name| !name.is_empty());
    match picked {
        Some(name) => {
            ctx.winner_proposer = ctx.proposer_of(name).map(|c| c.proposer.to_owned());
            ctx.winner_dish = Some(name.to_owned());
        }
        None => {
            let best = ctx
                .candidates
                .iter()
                .min_by(|a, b| by_votes_then_id(a.votes, a.id, b.votes, b.id));

            ctx.winner_dish = best.map(|c| c.name.to_owned());
            ctx.winner_proposer = best.map(|c| c.proposer.to_owned());
        }
    }

    ctx
}
