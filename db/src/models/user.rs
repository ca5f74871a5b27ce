use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a portal account in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique employee number. Absent for accounts created via an external
    /// identity provider.
    #[sea_orm(unique)]
    pub employee_id: Option<String>,
    pub employment_type: String,
    pub name: String,
    pub role: Role,
    pub office: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Absent for externally-authenticated accounts.
    pub password_hash: Option<String>,
    pub status: UserStatus,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fixed role set. Visibility and edit rights derive from this, never from
/// ad-hoc string matching on role names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum Role {
    #[sea_orm(string_value = "Employee")]
    #[strum(serialize = "Employee")]
    #[serde(rename = "Employee")]
    Employee,

    #[sea_orm(string_value = "Department Head")]
    #[strum(serialize = "Department Head")]
    #[serde(rename = "Department Head")]
    DepartmentHead,

    #[sea_orm(string_value = "ICTO Staff")]
    #[strum(serialize = "ICTO Staff")]
    #[serde(rename = "ICTO Staff")]
    IctoStaff,

    #[sea_orm(string_value = "ICTO Head")]
    #[strum(serialize = "ICTO Head")]
    #[serde(rename = "ICTO Head")]
    IctoHead,
}

impl Role {
    /// ICTO Staff and ICTO Head: full ticket visibility and status-edit rights.
    pub fn is_icto_family(&self) -> bool {
        matches!(self, Role::IctoStaff | Role::IctoHead)
    }

    /// ICTO Head is the single role with user-management rights.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::IctoHead)
    }
}

/// Account lifecycle. Self-registered accounts start `Pending` and only
/// `Active` accounts may authenticate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
pub enum UserStatus {
    #[sea_orm(string_value = "Pending")]
    #[strum(serialize = "Pending")]
    #[serde(rename = "Pending")]
    Pending,

    #[sea_orm(string_value = "Active")]
    #[strum(serialize = "Active")]
    #[serde(rename = "Active")]
    Active,

    #[sea_orm(string_value = "Rejected")]
    #[strum(serialize = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a user with an argon2-hashed password.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        employee_id: Option<&str>,
        employment_type: &str,
        name: &str,
        role: Role,
        office: Option<&str>,
        email: &str,
        password: &str,
        status: UserStatus,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active = ActiveModel {
            employee_id: Set(employee_id.map(str::to_owned)),
            employment_type: Set(employment_type.to_owned()),
            name: Set(name.to_owned()),
            role: Set(role),
            office: Set(office.map(str::to_owned)),
            email: Set(email.to_owned()),
            password_hash: Set(Some(Self::hash_password(password)?)),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn find_by_employee_id(
        db: &DbConn,
        employee_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .one(db)
            .await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))
    }

    /// Constant-style verification against the stored hash. Accounts without
    /// a password hash (identity-provider accounts) never match.
    pub fn verify_password(&self, password: &str) -> bool {
        let Some(hash) = &self.password_hash else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub async fn set_status(db: &DbConn, user_id: i64, status: UserStatus) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(user_id).one(db).await?;

        let model = match model {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("User not found".to_string())),
        };

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Rejection is destructive: the record is removed entirely, not flagged.
    pub async fn delete(db: &DbConn, user_id: i64) -> Result<(), DbErr> {
        let result = Entity::delete_by_id(user_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("User not found".to_string()));
        }
        Ok(())
    }
}
