//! Admin account model.

/// Admin account row. The only account is seeded on first startup.
#[derive(Clone)]
pub struct AdminUser {
    pub id: i64,
    /// Unique login identifier
    pub email: String,
    /// Argon2 PHC string (salted)
    pub password_hash: String,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
