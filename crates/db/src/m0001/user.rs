use sea_query::{ColumnDef, SqliteQueryBuilder, Table};

use crate::table::User;

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(User::Table)
            .col(
                ColumnDef::new(User::Id)
                    .string()
                    .not_null()
                    .string_len(64)
                    .primary_key(),
            )
            .col(ColumnDef::new(User::UserName).string().not_null())
            .col(ColumnDef::new(User::Password).string().not_null())
            .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![Table::drop().table(User::Table).to_string(SqliteQueryBuilder)]
}
