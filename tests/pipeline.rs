//! End-to-end tests: export text through parsing, extraction and analysis

use chatlead::chat::window_around;
use chatlead::extract::DEFAULT_WINDOW_SIZE;
use chatlead::{analyze, extract_from_chat, extract_from_message, parse_chat, SourceKind, Urgency};

#[test]
fn test_well_formed_log_one_message_per_header() {
    let text = "[1/6/25, 10:30 AM]   Dana  : First message\n\
                [1/6/25, 10:31 AM] Eli: Second message\n\
                with a second line\n\
                and a third\n\
                [1/6/25, 10:32 AM] Dana: <Media omitted>\n\
                [1/6/25, 10:33 AM] Dana: Third message";
    let messages = parse_chat(text);

    let summary: Vec<(&str, &str)> = messages
        .iter()
        .map(|m| (m.sender.as_str(), m.content.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Dana", "First message"),
            ("Eli", "Second message\nwith a second line\nand a third"),
            ("Dana", "Third message"),
        ]
    );
}

#[test]
fn test_window_boundaries_never_panic() {
    let text: String = (0..7)
        .map(|i| format!("[1/6/25, 10:{:02} AM] Dana: message {}\n", i, i))
        .collect();
    let messages = parse_chat(&text);
    assert_eq!(messages.len(), 7);

    for half_width in 0..10 {
        for center in 0..messages.len() {
            let window = window_around(&messages, center, half_width);
            assert!(!window.is_empty());
            assert!(window.len() <= 2 * half_width + 1);
            assert!(window.contains(&messages[center]));
        }
    }
}

#[test]
fn test_same_profile_twice_anchored_to_first() {
    let text = "[1/6/25, 10:30 AM] Dana: meet https://linkedin.com/in/jane-doe\n\
                [1/6/25, 10:31 AM] Eli: who is she?\n\
                [1/6/25, 10:32 AM] Eli: oh https://www.linkedin.com/in/jane-doe/?trk=x";
    let messages = parse_chat(text);
    let contacts = extract_from_chat(&messages, 1);

    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert_eq!(contact.value, "https://linkedin.com/in/jane-doe");
    assert_eq!(contact.source_message, messages[0]);
    assert_eq!(contact.context_window, messages[0..2].to_vec());
}

#[test]
fn test_hot_tier_short_circuits() {
    let messages = parse_chat("[1/6/25, 10:30 AM] Dana: this is urgent, though no rush on your side");
    assert_eq!(analyze(&messages).urgency, Urgency::Hot);
}

#[test]
fn test_billions_converted_to_millions() {
    let messages = parse_chat("[1/6/25, 10:30 AM] Dana: they are raising at $1.5B");
    assert_eq!(analyze(&messages).deal_size, "$1500M");
}

#[test]
fn test_profile_link_with_hot_intro_request() {
    let text = "[1/6/25, 10:30 AM] Dana: Check this out https://linkedin.com/in/jane-doe urgent, need intro today";
    let messages = parse_chat(text);
    let contacts = extract_from_chat(&messages, DEFAULT_WINDOW_SIZE);

    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert_eq!(contact.kind, SourceKind::LinkedinProfile);
    assert_eq!(contact.value, "https://linkedin.com/in/jane-doe");
    assert_eq!(contact.shared_by(), "Dana");

    let ctx = contact.analyze();
    assert_eq!(ctx.urgency, Urgency::Hot);
    assert_eq!(ctx.reason, "Introduction request");
    assert_eq!(ctx.notes, "Check this out  urgent, need intro today");
}

#[test]
fn test_media_placeholder_contributes_nothing() {
    let text = "[1/6/25, 10:30 AM] Dana: jane@acme.io is the one\n\
                [1/6/25, 10:31 AM] Dana: <Media omitted>\n\
                [1/6/25, 10:32 AM] Eli: thanks";
    let messages = parse_chat(text);
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| !m.content.contains("omitted")));

    let contacts = extract_from_chat(&messages, DEFAULT_WINDOW_SIZE);
    assert_eq!(contacts[0].context_window.len(), 2);
    assert!(contacts[0]
        .context_window
        .iter()
        .all(|m| !m.raw.contains("<Media omitted>")));
}

#[test]
fn test_short_phone_number_discarded() {
    let matches = extract_from_message("my extension is 123-45");
    assert!(matches.iter().all(|m| m.kind != SourceKind::Phone));

    let matches = extract_from_message("my number is 415-555-0123");
    let phones: Vec<&str> = matches
        .iter()
        .filter(|m| m.kind == SourceKind::Phone)
        .map(|m| m.normalized_value.as_str())
        .collect();
    assert_eq!(phones, vec!["4155550123"]);
}

#[test]
fn test_emails_differing_in_case_deduplicated() {
    let text = "[1/6/25, 10:30 AM] Dana: reach her at A@x.com\n\
                [1/6/25, 10:31 AM] Eli: or a@x.com";
    let messages = parse_chat(text);
    let contacts = extract_from_chat(&messages, DEFAULT_WINDOW_SIZE);

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].kind, SourceKind::Email);
    assert_eq!(contacts[0].value, "a@x.com");
    assert_eq!(contacts[0].shared_by(), "Dana");
}

#[test]
fn test_chat_without_contacts_is_empty_not_error() {
    let messages = parse_chat("[1/6/25, 10:30 AM] Dana: see you tomorrow");
    assert!(extract_from_chat(&messages, DEFAULT_WINDOW_SIZE).is_empty());
}

#[test]
fn test_contacts_serialize_to_json() {
    let messages = parse_chat("[1/6/25, 10:30 AM] Dana: https://jane.dev");
    let contacts = extract_from_chat(&messages, DEFAULT_WINDOW_SIZE);
    let json = serde_json::to_value(&contacts).unwrap();

    assert_eq!(json[0]["kind"], "other");
    assert_eq!(json[0]["value"], "https://jane.dev");
    assert_eq!(json[0]["source_message"]["sender"], "Dana");
}
