//! Diesel schema for waitlist persistence.

diesel::table! {
    /// Waitlist signups keyed by email.
    waitlist_entries (email) {
        /// Signup email address.
        #[max_length = 320]
        email -> Varchar,
        /// Declared marketplace role.
        #[max_length = 32]
        role -> Varchar,
        /// First signup timestamp.
        created_at -> Timestamptz,
        /// Latest signup timestamp.
        updated_at -> Timestamptz,
    }
}
