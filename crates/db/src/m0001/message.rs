use sea_query::{ColumnDef, Index, SqliteQueryBuilder, Table};

use crate::table::Message;

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(Message::Table)
            .col(
                ColumnDef::new(Message::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Message::UserId).string().not_null())
            .col(ColumnDef::new(Message::MessageType).string().not_null())
            .col(ColumnDef::new(Message::Title).string().not_null())
            .col(ColumnDef::new(Message::Content).text().not_null())
            .col(ColumnDef::new(Message::ActionUrl).string())
            .col(
                ColumnDef::new(Message::IsRead)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Message::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_message_user_id")
            .table(Message::Table)
            .col(Message::UserId)
            .col(Message::IsRead)
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Index::drop()
            .name("idx_message_user_id")
            .table(Message::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(Message::Table).to_string(SqliteQueryBuilder),
    ]
}
