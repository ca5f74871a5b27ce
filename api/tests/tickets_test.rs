mod helpers;

use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::attachments::AttachmentStore;
use db::models::ticket::{Model as TicketModel, RequesterSnapshot, TicketStatus};
use db::models::ticket_comment::Model as CommentModel;
use db::models::user::{Model as UserModel, Role, UserStatus};
use helpers::app::{get_json_body, make_test_app, make_test_app_with_attachments};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower::ServiceExt;

struct TestUsers {
    alice: UserModel,    // Employee, Finance
    bob: UserModel,      // Employee, HR
    carol: UserModel,    // Department Head, HR
    dave: UserModel,     // ICTO Staff
    erin: UserModel,     // ICTO Head
}

async fn seed_users(db: &DatabaseConnection) -> TestUsers {
    let alice = UserModel::create(
        db,
        Some("E1001"),
        "Full-Time",
        "Alice Lee",
        Role::Employee,
        Some("Finance"),
        "alice@example.com",
        "password123",
        UserStatus::Active,
    )
    .await
    .expect("Failed to create alice");
    let bob = UserModel::create(
        db,
        Some("E1002"),
        "Full-Time",
        "Bob Tan",
        Role::Employee,
        Some("HR"),
        "bob@example.com",
        "password123",
        UserStatus::Active,
    )
    .await
    .expect("Failed to create bob");
    let carol = UserModel::create(
        db,
        Some("E1003"),
        "Full-Time",
        "Carol Ng",
        Role::DepartmentHead,
        Some("HR"),
        "carol@example.com",
        "password123",
        UserStatus::Active,
    )
    .await
    .expect("Failed to create carol");
    let dave = UserModel::create(
        db,
        Some("E1004"),
        "Full-Time",
        "Dave Ho",
        Role::IctoStaff,
        Some("ICTO"),
        "dave@example.com",
        "password123",
        UserStatus::Active,
    )
    .await
    .expect("Failed to create dave");
    let erin = UserModel::create(
        db,
        Some("E1005"),
        "Full-Time",
        "Erin Chau",
        Role::IctoHead,
        Some("ICTO"),
        "erin@example.com",
        "password123",
        UserStatus::Active,
    )
    .await
    .expect("Failed to create erin");

    TestUsers {
        alice,
        bob,
        carol,
        dave,
        erin,
    }
}

fn bearer(user: &UserModel) -> String {
    let (token, _) = generate_jwt(user);
    format!("Bearer {token}")
}

fn snapshot_of(user: &UserModel) -> RequesterSnapshot {
    RequesterSnapshot {
        name: user.name.clone(),
        role: user.role.to_string(),
        office: user.office.clone(),
    }
}

async fn seed_ticket(db: &DatabaseConnection, user: &UserModel, subject: &str) -> TicketModel {
    TicketModel::create(db, snapshot_of(user), subject, "details", None, None, None)
        .await
        .expect("Failed to create ticket")
}

// --- POST /api/tickets ---

#[tokio::test]
async fn test_create_ticket_stamps_requester_snapshot() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let body = json!({
        "subject": "Printer jam on floor 3",
        "description": "Paper stuck in tray 2.",
        "category": "Hardware",
        "subCategory": "Printer",
        "urgency": "High"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header("Authorization", bearer(&users.alice))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["subject"], "Printer jam on floor 3");
    assert_eq!(json["data"]["subCategory"], "Printer");
    assert_eq!(json["data"]["status"], "New");
    assert_eq!(json["data"]["requesterName"], "Alice Lee");
    assert_eq!(json["data"]["requesterRole"], "Employee");
    assert_eq!(json["data"]["requesterOffice"], "Finance");
}

#[tokio::test]
async fn test_create_ticket_ignores_spoofed_requester_fields() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let body = json!({
        "subject": "VPN down",
        "description": "Cannot connect since this morning.",
        "requesterName": "Mallory",
        "requesterRole": "ICTO Head",
        "requesterOffice": "ICTO"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header("Authorization", bearer(&users.bob))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["requesterName"], "Bob Tan");
    assert_eq!(json["data"]["requesterRole"], "Employee");
    assert_eq!(json["data"]["requesterOffice"], "HR");
}

#[tokio::test]
async fn test_create_ticket_requires_subject_and_description() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let body = json!({ "subject": "", "description": "" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header("Authorization", bearer(&users.alice))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_ticket_requires_auth() {
    let (app, _app_state) = make_test_app().await;

    let body = json!({ "subject": "No token", "description": "Should fail." });
    let req = Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// --- GET /api/tickets ---

async fn list_tickets(app: &helpers::app::TestApp, user: &UserModel, uri: &str) -> serde_json::Value {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", bearer(user))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_json_body(response).await
}

#[tokio::test]
async fn test_list_tickets_employee_sees_only_their_own() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;
    seed_ticket(app_state.db(), &users.alice, "Finance monitor").await;
    seed_ticket(app_state.db(), &users.bob, "HR badge printer").await;

    let json = list_tickets(&app, &users.bob, "/api/tickets").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["subject"], "HR badge printer");
}

#[tokio::test]
async fn test_list_tickets_department_head_sees_whole_office() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;
    seed_ticket(app_state.db(), &users.bob, "HR badge printer").await;
    seed_ticket(app_state.db(), &users.carol, "HR projector").await;

    let json = list_tickets(&app, &users.carol, "/api/tickets").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 2);
    for ticket in tickets {
        assert_eq!(ticket["requesterOffice"], "HR");
    }
}

#[tokio::test]
async fn test_list_tickets_icto_sees_everything() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;
    seed_ticket(app_state.db(), &users.bob, "HR badge printer").await;
    seed_ticket(app_state.db(), &users.carol, "HR projector").await;

    let json = list_tickets(&app, &users.dave, "/api/tickets").await;
    assert_eq!(json["data"]["tickets"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_tickets_pagination_and_ordering() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    for i in 1..=25 {
        seed_ticket(app_state.db(), &users.alice, &format!("Ticket {i}")).await;
    }

    let json = list_tickets(&app, &users.erin, "/api/tickets?page=3&limit=10").await;
    assert_eq!(json["data"]["currentPage"], 3);
    assert_eq!(json["data"]["totalPages"], 3);

    // Newest first with an id tie-break, so the last page holds the five
    // oldest tickets in descending id order.
    let ids: Vec<i64> = json["data"]["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_list_tickets_page_past_end_is_empty() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Only one").await;

    let json = list_tickets(&app, &users.erin, "/api/tickets?page=5&limit=10").await;
    assert_eq!(json["data"]["tickets"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["totalPages"], 1);
}

#[tokio::test]
async fn test_list_tickets_rejects_zero_limit() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/tickets?limit=0")
        .header("Authorization", bearer(&users.alice))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tickets_rejects_unknown_status() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/tickets?status=Broken")
        .header("Authorization", bearer(&users.alice))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Invalid status value");
}

#[tokio::test]
async fn test_list_tickets_status_filter() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let open = seed_ticket(app_state.db(), &users.alice, "Still new").await;
    let started = seed_ticket(app_state.db(), &users.alice, "Being worked").await;
    TicketModel::set_status(app_state.db(), started.id, TicketStatus::InProgress)
        .await
        .unwrap();

    let json = list_tickets(&app, &users.alice, "/api/tickets?status=In%20Progress").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["id"], started.id);

    // The sentinel disables the filter entirely.
    let json = list_tickets(&app, &users.alice, "/api/tickets?status=All").await;
    let ids: Vec<i64> = json["data"]["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&open.id) && ids.contains(&started.id));
}

#[tokio::test]
async fn test_list_tickets_status_sentinel_is_case_insensitive() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Still new").await;
    let started = seed_ticket(app_state.db(), &users.alice, "Being worked").await;
    TicketModel::set_status(app_state.db(), started.id, TicketStatus::InProgress)
        .await
        .unwrap();

    for uri in ["/api/tickets?status=all", "/api/tickets?status=ALL"] {
        let json = list_tickets(&app, &users.alice, uri).await;
        assert_eq!(json["data"]["tickets"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_list_tickets_search_treats_wildcards_literally() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Disk at 100% usage").await;
    seed_ticket(app_state.db(), &users.alice, "Password reset").await;
    seed_ticket(app_state.db(), &users.alice, "VPN_outage report").await;

    // "%" and "_" are literal characters in a search, not LIKE wildcards.
    let json = list_tickets(&app, &users.alice, "/api/tickets?search=100%25").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["subject"], "Disk at 100% usage");

    let json = list_tickets(&app, &users.alice, "/api/tickets?search=VPN_").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["subject"], "VPN_outage report");
}

#[tokio::test]
async fn test_list_tickets_search_is_case_insensitive() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    seed_ticket(app_state.db(), &users.alice, "Printer jam on floor 3").await;
    seed_ticket(app_state.db(), &users.alice, "Password reset").await;

    let json = list_tickets(&app, &users.alice, "/api/tickets?search=PRINTER").await;
    let tickets = json["data"]["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["subject"], "Printer jam on floor 3");
}

// --- GET /api/tickets/{ticket_id} ---

#[tokio::test]
async fn test_get_ticket_includes_comment_thread_in_order() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    CommentModel::create(app_state.db(), ticket.id, "Bob Tan", "Any update?", None)
        .await
        .unwrap();
    CommentModel::create(
        app_state.db(),
        ticket.id,
        "Dave Ho",
        "Replacement part ordered.",
        None,
    )
    .await
    .unwrap();

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/tickets/{}", ticket.id))
        .header("Authorization", bearer(&users.bob))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["subject"], "Badge printer");
    let comments = json["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["author"], "Bob Tan");
    assert_eq!(comments[1]["author"], "Dave Ho");
}

#[tokio::test]
async fn test_get_ticket_rejects_malformed_id() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/tickets/not-a-number")
        .header("Authorization", bearer(&users.alice))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_ticket_missing_returns_404() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/tickets/9999")
        .header("Authorization", bearer(&users.alice))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- PATCH /api/tickets/{ticket_id} ---

#[tokio::test]
async fn test_update_status_as_icto_staff() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/tickets/{}", ticket.id))
        .header("Authorization", bearer(&users.dave))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "status": "Resolved" }).to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "Resolved");

    let stored = TicketModel::get_by_id(app_state.db(), ticket.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TicketStatus::Resolved);
}

#[tokio::test]
async fn test_update_status_forbidden_for_non_icto() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;

    for user in [&users.alice, &users.carol] {
        let req = Request::builder()
            .method("PATCH")
            .uri(format!("/api/tickets/{}", ticket.id))
            .header("Authorization", bearer(user))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "Closed" }).to_string()))
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let stored = TicketModel::get_by_id(app_state.db(), ticket.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TicketStatus::New);
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.alice, "Finance laptop").await;

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/tickets/{}", ticket.id))
        .header("Authorization", bearer(&users.erin))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "status": "Escalated" }).to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status_missing_ticket_returns_404() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("PATCH")
        .uri("/api/tickets/9999")
        .header("Authorization", bearer(&users.erin))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "status": "Closed" }).to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- POST /api/tickets/{ticket_id}/comments ---

#[tokio::test]
async fn test_add_comment_returns_full_thread() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;

    let first = Request::builder()
        .method("POST")
        .uri(format!("/api/tickets/{}/comments", ticket.id))
        .header("Authorization", bearer(&users.bob))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "content": "Any update?" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(first).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = Request::builder()
        .method("POST")
        .uri(format!("/api/tickets/{}/comments", ticket.id))
        .header("Authorization", bearer(&users.dave))
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "content": "Part ordered.",
                "attachmentUrl": "https://store.example.com/helpdesk/quote1.pdf"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(second).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["author"], "Bob Tan");
    assert_eq!(comments[1]["author"], "Dave Ho");
    assert_eq!(
        comments[1]["attachmentUrl"],
        "https://store.example.com/helpdesk/quote1.pdf"
    );
}

#[tokio::test]
async fn test_add_comment_rejects_empty_content() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;

    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/tickets/{}/comments", ticket.id))
        .header("Authorization", bearer(&users.bob))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "content": "   " }).to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Comment content is required.");
}

#[tokio::test]
async fn test_add_comment_missing_ticket_returns_404() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/tickets/9999/comments")
        .header("Authorization", bearer(&users.bob))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "content": "Hello?" }).to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- DELETE /api/tickets/{ticket_id}/comments/{comment_id}/attachment ---

#[tokio::test]
async fn test_delete_attachment_clears_reference_and_keeps_comment() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    let comment = CommentModel::create(
        app_state.db(),
        ticket.id,
        "Bob Tan",
        "Photo attached.",
        Some("https://store.example.com/helpdesk/jam1.png"),
    )
    .await
    .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/tickets/{}/comments/{}/attachment",
            ticket.id, comment.id
        ))
        .header("Authorization", bearer(&users.dave))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let comments = json["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "Photo attached.");
    assert!(comments[0]["attachmentUrl"].is_null());

    let stored = CommentModel::find_for_ticket(app_state.db(), ticket.id, comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.attachment_url, None);
}

#[tokio::test]
async fn test_delete_attachment_forbidden_for_non_icto() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    let comment = CommentModel::create(
        app_state.db(),
        ticket.id,
        "Bob Tan",
        "Photo attached.",
        Some("https://store.example.com/helpdesk/jam1.png"),
    )
    .await
    .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/tickets/{}/comments/{}/attachment",
            ticket.id, comment.id
        ))
        .header("Authorization", bearer(&users.bob))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_attachment_without_attachment_returns_400() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    let comment = CommentModel::create(app_state.db(), ticket.id, "Bob Tan", "No file.", None)
        .await
        .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/tickets/{}/comments/{}/attachment",
            ticket.id, comment.id
        ))
        .header("Authorization", bearer(&users.dave))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Comment has no attachment.");
}

#[tokio::test]
async fn test_delete_attachment_comment_on_other_ticket_returns_404() {
    let (app, app_state) = make_test_app().await;
    let users = seed_users(app_state.db()).await;

    let ticket_a = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    let ticket_b = seed_ticket(app_state.db(), &users.bob, "Projector").await;
    let comment = CommentModel::create(
        app_state.db(),
        ticket_b.id,
        "Bob Tan",
        "Photo attached.",
        Some("https://store.example.com/helpdesk/jam1.png"),
    )
    .await
    .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/tickets/{}/comments/{}/attachment",
            ticket_a.id, comment.id
        ))
        .header("Authorization", bearer(&users.dave))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_attachment_store_failure_keeps_reference() {
    // Nothing listens on the discard port, so the external delete fails.
    let (app, app_state) =
        make_test_app_with_attachments(AttachmentStore::new("http://127.0.0.1:9")).await;
    let users = seed_users(app_state.db()).await;

    let ticket = seed_ticket(app_state.db(), &users.bob, "Badge printer").await;
    let comment = CommentModel::create(
        app_state.db(),
        ticket.id,
        "Bob Tan",
        "Photo attached.",
        Some("https://store.example.com/helpdesk/jam1.png"),
    )
    .await
    .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/tickets/{}/comments/{}/attachment",
            ticket.id, comment.id
        ))
        .header("Authorization", bearer(&users.dave))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let stored = CommentModel::find_for_ticket(app_state.db(), ticket.id, comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.attachment_url.as_deref(),
        Some("https://store.example.com/helpdesk/jam1.png")
    );
}
