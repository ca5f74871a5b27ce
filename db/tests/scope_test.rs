use db::models::ticket::{Column as TicketColumn, Entity as TicketEntity, Model as TicketModel, RequesterSnapshot};
use db::models::user::Role;
use db::scope::visibility_filter;
use db::test_utils::setup_test_db;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

fn snapshot(name: &str, role: &str, office: Option<&str>) -> RequesterSnapshot {
    RequesterSnapshot {
        name: name.to_string(),
        role: role.to_string(),
        office: office.map(str::to_owned),
    }
}

async fn seed_tickets(db: &DatabaseConnection) {
    TicketModel::create(
        db,
        snapshot("Alice", "Employee", Some("Finance")),
        "Printer jam",
        "Tray 2 stuck",
        None,
        None,
        None,
    )
    .await
    .expect("Failed to create Alice's ticket");

    TicketModel::create(
        db,
        snapshot("Bob", "Employee", Some("HR")),
        "VPN broken",
        "Cannot connect from home",
        None,
        None,
        None,
    )
    .await
    .expect("Failed to create Bob's ticket");

    TicketModel::create(
        db,
        snapshot("Carol", "Department Head", Some("HR")),
        "Shared drive full",
        "HR drive out of space",
        None,
        None,
        None,
    )
    .await
    .expect("Failed to create Carol's ticket");
}

async fn visible(db: &DatabaseConnection, role: Role, name: &str, office: Option<&str>) -> Vec<String> {
    TicketEntity::find()
        .filter(visibility_filter(role, name, office))
        .order_by_asc(TicketColumn::Id)
        .all(db)
        .await
        .expect("Failed to query tickets")
        .into_iter()
        .map(|t| t.requester_name)
        .collect()
}

#[tokio::test]
async fn employee_sees_only_own_tickets() {
    let db = setup_test_db().await;
    seed_tickets(&db).await;

    let names = visible(&db, Role::Employee, "Bob", Some("HR")).await;
    assert_eq!(names, vec!["Bob"]);
}

#[tokio::test]
async fn department_head_sees_whole_office() {
    let db = setup_test_db().await;
    seed_tickets(&db).await;

    let names = visible(&db, Role::DepartmentHead, "Carol", Some("HR")).await;
    assert_eq!(names, vec!["Bob", "Carol"]);
}

#[tokio::test]
async fn department_head_without_office_sees_nothing() {
    let db = setup_test_db().await;
    seed_tickets(&db).await;

    let names = visible(&db, Role::DepartmentHead, "Carol", None).await;
    assert!(names.is_empty());
}

#[tokio::test]
async fn icto_family_sees_everything() {
    let db = setup_test_db().await;
    seed_tickets(&db).await;

    for role in [Role::IctoStaff, Role::IctoHead] {
        let names = visible(&db, role, "Ivy", Some("ICTO")).await;
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }
}

#[tokio::test]
async fn employee_with_no_matching_name_sees_nothing() {
    let db = setup_test_db().await;
    seed_tickets(&db).await;

    let names = visible(&db, Role::Employee, "Mallory", Some("Finance")).await;
    assert!(names.is_empty());
}
