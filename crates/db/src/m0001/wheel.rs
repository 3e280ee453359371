use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, SqliteQueryBuilder, Table};

use crate::table::{WheelCandidate, WheelPick, WheelVote};

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(WheelCandidate::Table)
            .col(
                ColumnDef::new(WheelCandidate::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(WheelCandidate::FamilyId).string().not_null())
            .col(ColumnDef::new(WheelCandidate::MealDate).string().not_null())
            .col(ColumnDef::new(WheelCandidate::MealType).string().not_null())
            .col(ColumnDef::new(WheelCandidate::Name).string().not_null())
            .col(ColumnDef::new(WheelCandidate::Proposer).string().not_null())
            .col(ColumnDef::new(WheelCandidate::ProposerName).string().not_null())
            .col(
                ColumnDef::new(WheelCandidate::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_wheel_candidate_session")
            .table(WheelCandidate::Table)
            .col(WheelCandidate::FamilyId)
            .col(WheelCandidate::MealDate)
            .col(WheelCandidate::MealType)
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(WheelVote::Table)
            .col(
                ColumnDef::new(WheelVote::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(WheelVote::CandidateId).integer().not_null())
            .col(ColumnDef::new(WheelVote::UserId).string().not_null())
            .col(ColumnDef::new(WheelVote::FamilyId).string().not_null())
            .col(ColumnDef::new(WheelVote::MealDate).string().not_null())
            .col(ColumnDef::new(WheelVote::MealType).string().not_null())
            .col(ColumnDef::new(WheelVote::CreatedAt).big_integer().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_wheel_vote_candidate")
                    .from(WheelVote::Table, WheelVote::CandidateId)
                    .to(WheelCandidate::Table, WheelCandidate::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_wheel_vote_candidate_user")
            .table(WheelVote::Table)
            .unique()
            .col(WheelVote::CandidateId)
            .col(WheelVote::UserId)
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(WheelPick::Table)
            .col(
                ColumnDef::new(WheelPick::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(WheelPick::FamilyId).string().not_null())
            .col(ColumnDef::new(WheelPick::MealDate).string().not_null())
            .col(ColumnDef::new(WheelPick::MealType).string().not_null())
            .col(ColumnDef::new(WheelPick::WinnerName).string().not_null())
            .col(ColumnDef::new(WheelPick::PickedBy).string().not_null())
            .col(ColumnDef::new(WheelPick::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Table::drop().table(WheelPick::Table).to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_wheel_vote_candidate_user")
            .table(WheelVote::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(WheelVote::Table).to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_wheel_candidate_session")
            .table(WheelCandidate::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop()
            .table(WheelCandidate::Table)
            .to_string(SqliteQueryBuilder),
    ]
}
