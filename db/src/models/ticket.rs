use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, DeriveActiveEnum, PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub subject: String,
    pub description: String,

    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub urgency: Option<String>,

    pub status: TicketStatus,

    /// Requester snapshot, captured from the authenticated caller at creation
    /// time. Immutable afterwards, so later user-directory edits never rewrite
    /// historical tickets.
    pub requester_name: String,
    pub requester_role: String,
    pub requester_office: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fixed status progression. There is deliberately no transition graph: any
/// ICTO caller may set any status from any current status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
pub enum TicketStatus {
    #[sea_orm(string_value = "New")]
    #[strum(serialize = "New")]
    #[serde(rename = "New")]
    New,

    #[sea_orm(string_value = "In Progress")]
    #[strum(serialize = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    #[sea_orm(string_value = "Resolved")]
    #[strum(serialize = "Resolved")]
    #[serde(rename = "Resolved")]
    Resolved,

    #[sea_orm(string_value = "Closed")]
    #[strum(serialize = "Closed")]
    #[serde(rename = "Closed")]
    Closed,
}

/// Identity fields stamped onto a ticket at creation time.
#[derive(Clone, Debug)]
pub struct RequesterSnapshot {
    pub name: String,
    pub role: String,
    pub office: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_comment::Entity")]
    Comments,
}

impl Related<super::ticket_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        requester: RequesterSnapshot,
        subject: &str,
        description: &str,
        category: Option<&str>,
        sub_category: Option<&str>,
        urgency: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active = ActiveModel {
            subject: Set(subject.to_owned()),
            description: Set(description.to_owned()),
            category: Set(category.map(str::to_owned)),
            sub_category: Set(sub_category.map(str::to_owned)),
            urgency: Set(urgency.map(str::to_owned)),
            status: Set(TicketStatus::New),
            requester_name: Set(requester.name),
            requester_role: Set(requester.role),
            requester_office: Set(requester.office),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, ticket_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id).one(db).await
    }

    /// Sets the status field only. Last write wins; no compare-and-swap.
    pub async fn set_status(
        db: &DbConn,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(ticket_id).one(db).await?;

        let model = match model {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("Ticket not found".to_string())),
        };

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn count_with_status(
        db: &DbConn,
        base: Condition,
        status: TicketStatus,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(base.add(Column::Status.eq(status)))
            .count(db)
            .await
    }
}
