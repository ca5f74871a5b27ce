//! Access scope resolver.
//!
//! Ticket visibility is a coarse, role-derived partition rather than a
//! per-ticket ACL:
//!
//! - ICTO family (Staff or Head): every ticket.
//! - Department Head: tickets raised from the caller's office.
//! - Everyone else: only the caller's own tickets.
//!
//! Callers are expected to resolve the role from claims exactly once, failing
//! closed to `Employee` when the role string is missing or malformed.

use crate::models::ticket::Column as TicketColumn;
use crate::models::user::Role;
use sea_orm::{ColumnTrait, Condition};

/// Builds the base query filter restricting which tickets `role` may see.
pub fn visibility_filter(role: Role, name: &str, office: Option<&str>) -> Condition {
    if role.is_icto_family() {
        return Condition::all();
    }

    if role == Role::DepartmentHead {
        return Condition::all().add(TicketColumn::RequesterOffice.eq(office.unwrap_or_default()));
    }

    Condition::all().add(TicketColumn::RequesterName.eq(name))
}
