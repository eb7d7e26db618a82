// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shareable activity links.
//!
//! A one-way export: the link carries the whole activity in its query string
//! and is never read back by the service.

use crate::models::Activity;

/// Build `{base}/share?id=..&createdAt=..&title=..&splits=t0,t1,..`.
pub fn share_url(base: &str, activity: &Activity) -> String {
    format!(
        "{}/share?id={}&createdAt={}&title={}&splits={}",
        base.trim_end_matches('/'),
        urlencoding::encode(&activity.id),
        activity.created_at,
        urlencoding::encode(&activity.title),
        urlencoding::encode(&join_splits(&activity.splits)),
    )
}

/// Comma-joined split timestamps.
pub fn join_splits(splits: &[i64]) -> String {
    splits
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_encodes_fields() {
        let activity = Activity {
            id: "abc-123".to_string(),
            created_at: 1_700_000_000_000,
            title: "Hill reps & strides".to_string(),
            splits: vec![1_700_000_001_000, 1_700_000_002_500],
        };

        let url = share_url("https://timer.example/", &activity);
        assert_eq!(
            url,
            "https://timer.example/share?id=abc-123&createdAt=1700000000000\
             &title=Hill%20reps%20%26%20strides\
             &splits=1700000001000%2C1700000002500"
        );
    }

    #[test]
    fn test_join_splits_empty() {
        assert_eq!(join_splits(&[]), "");
        assert_eq!(join_splits(&[7]), "7");
    }
}
