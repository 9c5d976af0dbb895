//! Property-based tests for overrustle.
//!
//! These tests generate random inputs to find edge cases.

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use overrustle::ChatRecord;
use overrustle::core::output::{from_json, to_json};
use overrustle::observe::NoopObserver;
use overrustle::parsing::parse_line;

/// Instants between 1970 and 2100, whole seconds.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800).prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
}

fn arb_username() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "moobot".to_string(),
        "alasdairsc".to_string(),
        "Destiny".to_string(),
        "some user".to_string(),
        "User_123".to_string(),
        "Иван".to_string(),
        "x".to_string(),
    ])
}

fn arb_message() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        String::new(),
        "!love Justin".to_string(),
        "There's 95% <3 between AlasdairSc and Justin".to_string(),
        "has: colons: inside".to_string(),
        "[brackets] too".to_string(),
        "   padded   ".to_string(),
        "🎉🔥💀 emoji".to_string(),
        "Привет мир".to_string(),
    ])
}

proptest! {
    #[test]
    fn well_formed_lines_parse_exactly(
        ts in arb_timestamp(),
        user in arb_username(),
        message in arb_message(),
        space in any::<bool>(),
    ) {
        let sep = if space { ": " } else { ":" };
        let line = format!("[{} UTC] {}{}{}", ts.format("%Y-%m-%d %H:%M:%S"), user, sep, message);

        let record = parse_line(&line, "destiny", &NoopObserver).unwrap();
        prop_assert_eq!(record.timestamp(), ts);
        prop_assert_eq!(record.username(), user.as_str());
        prop_assert_eq!(record.message(), message.trim());
        prop_assert_eq!(record.channel(), "destiny");
    }

    #[test]
    fn lines_without_leading_bracket_never_match(line in "[^\\[]{0,80}") {
        prop_assert!(parse_line(&line, "", &NoopObserver).is_none());
    }

    #[test]
    fn lines_without_colon_never_match(ts in arb_timestamp(), rest in "[^:\n]{0,60}") {
        let line = format!("[{} UTC] {}", ts.format("%Y-%m-%d %H:%M:%S"), rest);
        prop_assert!(parse_line(&line, "", &NoopObserver).is_none());
    }

    #[test]
    fn parse_line_never_panics(line in "\\PC{0,120}") {
        let _ = parse_line(&line, "", &NoopObserver);
    }

    #[test]
    fn epoch_seconds_round_trip(ts in arb_timestamp(), user in arb_username(), message in arb_message()) {
        let record = ChatRecord::new(ts, user, message, "destiny");
        let back = from_json(&to_json(std::slice::from_ref(&record)).unwrap()).unwrap();

        prop_assert_eq!(back.len(), 1);
        prop_assert_eq!(back[0].timestamp(), ts);
        prop_assert_eq!(back[0].epoch_seconds(), ts.timestamp());
        prop_assert_eq!(&back[0], &record);
    }
}
