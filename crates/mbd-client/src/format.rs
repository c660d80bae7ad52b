//! Text rendering of API responses
//!
//! Pure functions turning response envelopes into Markdown-like blocks
//! suitable for chat output. An unsuccessful envelope, or one without
//! payload, renders as a fixed "nothing found" line.

use crate::types::{Cast, LabelMap, MbdResponse, UserProfile};
use chrono::{Local, TimeZone};
use std::fmt::Write;

/// Returned when a cast response has nothing to show
pub const NO_CASTS: &str = "No results found.";
/// Returned when a user response has nothing to show
pub const NO_USERS: &str = "No users found.";
/// Returned when a label response has nothing to show
pub const NO_LABELS: &str = "No labels found.";

/// Render a cast feed or search response
#[must_use]
pub fn format_casts(response: &MbdResponse<Vec<Cast>>) -> String {
    let casts = match response.data {
        Some(ref casts) if response.success && !casts.is_empty() => casts,
        _ => return NO_CASTS.to_string(),
    };

    let mut out = String::from("### Casts on Farcaster\n\n");

    for (index, cast) in casts.iter().enumerate() {
        let author = &cast.author;
        let name = author.display_name.as_deref().unwrap_or(&author.username);

        let _ = writeln!(out, "**{}. @{} ({})**", index + 1, author.username, name);
        let _ = writeln!(out, "{}", cast.text);

        if truthy(cast.likes_count) || truthy(cast.replies_count) || truthy(cast.recasts_count) {
            let _ = writeln!(
                out,
                "*{} likes • {} reply • {} recasts*",
                cast.likes_count.unwrap_or(0.0),
                cast.replies_count.unwrap_or(0.0),
                cast.recasts_count.unwrap_or(0.0)
            );
        }

        let _ = writeln!(out, "*Published in: {}*", local_time(cast.timestamp));
        out.push('\n');
    }

    out
}

/// Render a user feed or search response
#[must_use]
pub fn format_users(response: &MbdResponse<Vec<UserProfile>>) -> String {
    let users = match response.data {
        Some(ref users) if response.success && !users.is_empty() => users,
        _ => return NO_USERS.to_string(),
    };

    let mut out = String::from("### Farcaster Users\n\n");

    for (index, user) in users.iter().enumerate() {
        let name = user.display_name.as_deref().unwrap_or(&user.username);

        let _ = writeln!(out, "**{}. @{} ({})**", index + 1, user.username, name);

        if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
            let _ = writeln!(out, "{bio}");
        }

        if truthy(user.followers_count) || truthy(user.following_count) {
            let _ = writeln!(
                out,
                "*{} followers • {} following*",
                user.followers_count.unwrap_or(0.0),
                user.following_count.unwrap_or(0.0)
            );
        }

        if let Some(score) = user.score.filter(|s| *s != 0.0 && !s.is_nan()) {
            let _ = writeln!(out, "*Score: {score:.2}*");
        }

        out.push('\n');
    }

    out
}

/// Render a labels response (for items or for text)
///
/// Items keep the order the service returned them in. Within an item,
/// labels are sorted by descending score; ties (including `0.0` against
/// `-0.0`) keep the order the service returned them in.
/// Scores are shown as percentages without range checks.
#[must_use]
pub fn format_labels(response: &MbdResponse<LabelMap>) -> String {
    let items = match response.data {
        Some(ref items) if response.success => items,
        _ => return NO_LABELS.to_string(),
    };

    let mut out = String::from("### AI Labels for Content\n\n");

    for (item_id, labels) in items {
        let _ = writeln!(out, "**Item ID: {item_id}**");

        let mut entries: Vec<(&String, f64)> = labels
            .iter()
            .map(|(label, score)| (label, unsigned_zero(*score)))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (label, score) in entries {
            let _ = writeln!(out, "- {label}: {:.1}%", score * 100.0);
        }

        out.push('\n');
    }

    out
}

/// Counters are shown only when present, nonzero and not NaN
fn truthy(count: Option<f64>) -> bool {
    count.is_some_and(|n| n != 0.0 && !n.is_nan())
}

/// `-0.0` compares and prints as `0.0`
fn unsigned_zero(score: f64) -> f64 {
    if score == 0.0 { 0.0 } else { score }
}

/// Epoch milliseconds as local wall-clock time
fn local_time(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map_or_else(
            || millis.to_string(),
            |t| t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastFeedResponse, LabelsResponse, UserFeedResponse};

    fn casts(json: &str) -> CastFeedResponse {
        serde_json::from_str(json).unwrap()
    }

    fn users(json: &str) -> UserFeedResponse {
        serde_json::from_str(json).unwrap()
    }

    fn labels(json: &str) -> LabelsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_cast_feed_scenario() {
        let response = casts(
            r#"{"success": true, "data": [{
                "item_id": "1", "text": "hello",
                "author": {"fid": "9", "username": "bob"},
                "timestamp": 1700000000000, "likes_count": 5
            }]}"#,
        );

        let out = format_casts(&response);
        assert!(out.starts_with("### Casts on Farcaster\n\n"));
        assert!(out.contains("**1. @bob (bob)**"));
        assert!(out.contains("\nhello\n"));
        assert!(out.contains("*5 likes • 0 reply • 0 recasts*"));
        assert!(out.contains("*Published in: "));
    }

    #[test]
    fn test_cast_empty_conditions() {
        assert_eq!(format_casts(&casts(r#"{"success": true, "data": []}"#)), NO_CASTS);
        assert_eq!(format_casts(&casts(r#"{"success": true}"#)), NO_CASTS);
        assert_eq!(
            format_casts(&casts(
                r#"{"success": false, "data": [{"item_id": "1", "text": "x", "author": {"fid": "1", "username": "a"}, "timestamp": 0}]}"#
            )),
            NO_CASTS
        );
    }

    #[test]
    fn test_cast_display_name_and_engagement_gate() {
        let response = casts(
            r#"{"success": true, "data": [
                {"item_id": "1", "text": "first", "author": {"fid": "1", "username": "alice", "display_name": "Alice A"}, "timestamp": 0,
                 "likes_count": 0, "replies_count": 0, "recasts_count": 0},
                {"item_id": "2", "text": "second", "author": {"fid": "2", "username": "carol"}, "timestamp": 0,
                 "recasts_count": 3}
            ]}"#,
        );

        let out = format_casts(&response);
        assert!(out.contains("**1. @alice (Alice A)**"));
        assert!(out.contains("**2. @carol (carol)**"));
        assert_eq!(out.matches("likes •").count(), 1);
        assert!(out.contains("*0 likes • 0 reply • 3 recasts*"));
        assert!(out.find("first").unwrap() < out.find("second").unwrap());
        assert_eq!(out.matches("*Published in: ").count(), 2);
    }

    #[test]
    fn test_user_blocks_in_fixed_order() {
        let response = users(
            r#"{"success": true, "data": [
                {"fid": "1", "username": "dan", "display_name": "Dan", "bio": "builder",
                 "followers_count": 10, "following_count": 2, "score": 0.876},
                {"fid": "2", "username": "eve"}
            ]}"#,
        );

        let out = format_users(&response);
        assert!(out.starts_with("### Farcaster Users\n\n"));
        let header = out.find("**1. @dan (Dan)**").unwrap();
        let bio = out.find("builder").unwrap();
        let follows = out.find("*10 followers • 2 following*").unwrap();
        let score = out.find("*Score: 0.88*").unwrap();
        assert!(header < bio && bio < follows && follows < score);

        assert!(out.contains("**2. @eve (eve)**"));
        assert_eq!(out.matches("followers •").count(), 1);
        assert_eq!(out.matches("*Score:").count(), 1);
    }

    #[test]
    fn test_user_zero_counts_suppressed() {
        let response = users(
            r#"{"success": true, "data": [
                {"fid": "1", "username": "zed", "followers_count": 0, "following_count": 0, "score": 0}
            ]}"#,
        );
        let out = format_users(&response);
        assert!(!out.contains("followers"));
        assert!(!out.contains("Score"));
    }

    #[test]
    fn test_user_empty_conditions() {
        assert_eq!(format_users(&users(r#"{"success": true, "data": []}"#)), NO_USERS);
        assert_eq!(format_users(&users(r#"{"success": false}"#)), NO_USERS);
    }

    #[test]
    fn test_labels_scenario() {
        let response = labels(r#"{"success": true, "data": {"1": {"topics": 0.1, "spam": 0.9}}}"#);
        let out = format_labels(&response);
        assert!(out.starts_with("### AI Labels for Content\n\n"));
        assert!(out.contains("**Item ID: 1**"));
        let spam = out.find("- spam: 90.0%").unwrap();
        let topics = out.find("- topics: 10.0%").unwrap();
        assert!(spam < topics);
    }

    #[test]
    fn test_labels_ties_keep_service_order() {
        let response = labels(
            r#"{"success": true, "data": {"x": {"b": 0.5, "a": 0.5, "c": 0.7}}}"#,
        );
        let out = format_labels(&response);
        let c = out.find("- c:").unwrap();
        let b = out.find("- b:").unwrap();
        let a = out.find("- a:").unwrap();
        assert!(c < b && b < a);
    }

    #[test]
    fn test_labels_signed_zero_is_a_tie() {
        let response = labels(r#"{"success": true, "data": {"x": {"a": -0.0, "b": 0.0}}}"#);
        let out = format_labels(&response);
        assert!(!out.contains("-0.0%"));
        assert!(out.find("- a: 0.0%").unwrap() < out.find("- b: 0.0%").unwrap());
    }

    #[test]
    fn test_cast_float_counters_render_as_integers() {
        let response = casts(
            r#"{"success": true, "data": [{
                "item_id": "1", "text": null,
                "author": {"fid": 9, "username": "bob"},
                "timestamp": 1700000000000, "likes_count": 5.0, "recasts_count": null
            }]}"#,
        );
        let out = format_casts(&response);
        assert!(out.contains("**1. @bob (bob)**"));
        assert!(out.contains("*5 likes • 0 reply • 0 recasts*"));
    }

    #[test]
    fn test_labels_item_order_and_out_of_range() {
        let response = labels(r#"{"success": true, "data": {"2": {"x": 1.5}, "1": {"y": 0.0}}}"#);
        let out = format_labels(&response);
        assert!(out.find("Item ID: 2").unwrap() < out.find("Item ID: 1").unwrap());
        assert!(out.contains("- x: 150.0%"));
        assert!(out.contains("- y: 0.0%"));
    }

    #[test]
    fn test_labels_empty_conditions() {
        assert_eq!(format_labels(&labels(r#"{"success": false, "data": {}}"#)), NO_LABELS);
        assert_eq!(format_labels(&labels(r#"{"success": true}"#)), NO_LABELS);
        assert_eq!(
            format_labels(&labels(r#"{"success": true, "data": {}}"#)),
            "### AI Labels for Content\n\n"
        );
    }

    #[test]
    fn test_bad_timestamp_renders_raw() {
        assert_eq!(local_time(i64::MAX), i64::MAX.to_string());
    }
}
