use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};

/// A comment in a ticket's append-only thread. Comments have no identity
/// outside their ticket, but the row id gives each one a stable handle for
/// targeted attachment deletion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub ticket_id: i64,

    pub author: String,
    pub content: String,
    /// Reference into the external attachment store.
    pub attachment_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends a comment. A single row insert, so concurrent appends on the
    /// same ticket never lose updates.
    pub async fn create(
        db: &DbConn,
        ticket_id: i64,
        author: &str,
        content: &str,
        attachment_url: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            author: Set(author.to_owned()),
            content: Set(content.to_owned()),
            attachment_url: Set(attachment_url.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    /// Full thread in insertion order. The id tie-break keeps the order
    /// stable when timestamps collide.
    pub async fn find_all_for_ticket(db: &DbConn, ticket_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_for_ticket(
        db: &DbConn,
        ticket_id: i64,
        comment_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(comment_id)
            .filter(Column::TicketId.eq(ticket_id))
            .one(db)
            .await
    }

    /// Clears the attachment reference only; the comment itself stays.
    pub async fn clear_attachment(db: &DbConn, comment_id: i64) -> Result<Model, DbErr> {
        let active = ActiveModel {
            id: Set(comment_id),
            attachment_url: Set(None),
            ..Default::default()
        };

        active.update(db).await
    }
}
