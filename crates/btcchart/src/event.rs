// File: crates/btcchart/src/event.rs
// Summary: Builds and signs the chart reply event.

use anyhow::{Context, Result};
use nostr::key::FromSkStr;
use nostr::{Event, EventBuilder, Keys, Kind, Marker, Tag};

/// Parse the bot key from nsec bech32 or raw hex.
pub fn keys_from_secret(secret: &str) -> Result<Keys> {
    Keys::from_sk_str(secret).context("invalid secret key")
}

/// Reply carrying the chart URL. Tags the trigger with a `reply` marker and
/// carries the trigger's own `e` tags over without duplicates, keeping the
/// thread intact. Kind is copied from the trigger.
pub fn reply(keys: &Keys, trigger: &Event, content: impl Into<String>) -> Result<Event> {
    let mut tags: Vec<Tag> = vec![Tag::Event(trigger.id, None, Some(Marker::Reply))];
    for tag in trigger.tags.iter() {
        if let Tag::Event(id, ..) = tag {
            let seen = tags
                .iter()
                .any(|t| matches!(t, Tag::Event(existing, ..) if existing == id));
            if !seen {
                tags.push(tag.clone());
            }
        }
    }
    EventBuilder::new(trigger.kind, content, &tags)
        .to_event(keys)
        .context("signing reply event")
}

/// Standalone event of the given kind, for one-shot CLI posting.
pub fn plain(keys: &Keys, kind: Kind, content: impl Into<String>) -> Result<Event> {
    EventBuilder::new(kind, content, &[])
        .to_event(keys)
        .context("signing event")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_tags_trigger_and_thread() {
        let keys = Keys::generate();
        let author = Keys::generate();
        let root = EventBuilder::new_text_note("root", &[])
            .to_event(&author)
            .unwrap();
        let trigger = EventBuilder::new_text_note(
            "chart please",
            &[Tag::Event(root.id, None, Some(Marker::Root))],
        )
        .to_event(&author)
        .unwrap();

        let ev = reply(&keys, &trigger, "https://img.example/x.png").unwrap();
        ev.verify().unwrap();
        assert_eq!(ev.kind, Kind::TextNote);
        assert_eq!(ev.content, "https://img.example/x.png");

        let e_ids: Vec<_> = ev
            .tags
            .iter()
            .filter_map(|t| match t {
                Tag::Event(id, ..) => Some(*id),
                _ => None,
            })
            .collect();
        assert!(e_ids.contains(&trigger.id));
        assert!(e_ids.contains(&root.id));
        assert_eq!(e_ids.len(), 2);
    }

    #[test]
    fn duplicate_thread_tags_collapse() {
        let keys = Keys::generate();
        let author = Keys::generate();
        let root = EventBuilder::new_text_note("root", &[])
            .to_event(&author)
            .unwrap();
        let trigger = EventBuilder::new_text_note(
            "again",
            &[
                Tag::Event(root.id, None, Some(Marker::Root)),
                Tag::Event(root.id, None, None),
            ],
        )
        .to_event(&author)
        .unwrap();

        let ev = reply(&keys, &trigger, "url").unwrap();
        let e_count = ev
            .tags
            .iter()
            .filter(|t| matches!(t, Tag::Event(..)))
            .count();
        assert_eq!(e_count, 2, "trigger id plus one root id");
    }

    #[test]
    fn plain_event_uses_requested_kind() {
        let keys = Keys::generate();
        let ev = plain(&keys, Kind::from(1), "https://img.example/x.png").unwrap();
        ev.verify().unwrap();
        assert_eq!(ev.kind, Kind::TextNote);
        assert!(ev.tags.is_empty());
    }
}
