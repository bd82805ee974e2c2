//! Diesel schema for task persistence.

diesel::table! {
    /// Marketplace task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title shown to bidders.
        #[max_length = 255]
        title -> Varchar,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Escrow funding transaction signature.
        #[max_length = 88]
        escrow_tx_id -> Nullable<Varchar>,
        /// Escrow lock transaction signature.
        #[max_length = 88]
        lock_tx_id -> Nullable<Varchar>,
        /// Escrow release transaction signature.
        #[max_length = 88]
        approve_tx_id -> Nullable<Varchar>,
        /// Bid accepted by the poster.
        accepted_bid_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Work product delivered against a task.
    task_results (id) {
        /// Result identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Delivered content.
        content -> Text,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
    }
}

diesel::joinable!(task_results -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_results);
