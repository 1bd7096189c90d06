/// Role ids as they appear in the `role` claim of a bearer token.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin = 1,
    Hr = 2,
    Employee = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Employee),
            _ => None,
        }
    }

    /// Leave types, allocations and approvals are HR-owned.
    pub fn manages_leave(self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}
