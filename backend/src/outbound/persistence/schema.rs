//! Diesel table definitions; must match `migrations/` exactly.

diesel::table! {
    /// FAQ entries served under `/api/v1/faqs`.
    faqs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Question text.
        question -> Text,
        /// Answer text.
        answer -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
