use db::models::user::Model as UserModel;
use serde::Serialize;

/// Wire representation of a user. Secret material (password hash, reset
/// token) never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub employee_id: Option<String>,
    pub employment_type: String,
    pub name: String,
    pub role: String,
    pub office: Option<String>,
    pub email: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            employee_id: user.employee_id,
            employment_type: user.employment_type,
            name: user.name,
            role: user.role.to_string(),
            office: user.office,
            email: user.email,
            status: user.status.to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
