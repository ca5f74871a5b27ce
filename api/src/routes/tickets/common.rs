use db::models::ticket::Model as TicketModel;
use db::models::ticket_comment::Model as CommentModel;
use serde::Serialize;

/// Wire representation of a ticket. Field names follow the portal's
/// camelCase HTTP contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub urgency: Option<String>,
    pub status: String,
    pub requester_name: String,
    pub requester_role: String,
    pub requester_office: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketModel> for TicketResponse {
    fn from(ticket: TicketModel) -> Self {
        Self {
            id: ticket.id,
            subject: ticket.subject,
            description: ticket.description,
            category: ticket.category,
            sub_category: ticket.sub_category,
            urgency: ticket.urgency,
            status: ticket.status.to_string(),
            requester_name: ticket.requester_name,
            requester_role: ticket.requester_role,
            requester_office: ticket.requester_office,
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub attachment_url: Option<String>,
    pub created_at: String,
}

impl From<CommentModel> for CommentResponse {
    fn from(comment: CommentModel) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            content: comment.content,
            attachment_url: comment.attachment_url,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// Ticket plus its full comment thread, for detail views.
#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub comments: Vec<CommentResponse>,
}
