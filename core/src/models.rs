mod favorite;

pub use favorite::{Favorite, NewFavorite};

use chrono::{DateTime, Utc};

/// Convert a Unix timestamp in milliseconds to DateTime<Utc>
pub fn timestamp_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Convert DateTime<Utc> to a Unix timestamp in milliseconds
pub fn datetime_to_timestamp(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp_millis()
}
