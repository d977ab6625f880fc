/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Client-generated stable identifier for timeline entries.
///
/// Generated before the backing insert is issued and used as the row's
/// primary key, so the optimistic and confirmed representations of one
/// action can be matched without a re-fetch.
pub type EntryId = uuid::Uuid;

/// Serial primary keys assigned by the store (notifications).
pub type DbId = i64;
