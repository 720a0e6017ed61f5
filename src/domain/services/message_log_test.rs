use super::MessageLog;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn prompt(text: &str, options: &[&str]) -> Message {
    return Message::new(Role::Bot, text).with_options(
        options.iter().map(|e| return e.to_string()).collect(),
        false,
    );
}

#[test]
fn it_keeps_insertion_order() {
    let mut log = MessageLog::default();
    log.append(Message::new(Role::User, "Hi"));
    log.append(prompt("How old are you?", &["<30", "30-35", "35+"]));
    log.append(Message::new(Role::User, "30-35"));

    let contents = log
        .all()
        .iter()
        .map(|message| return message.content.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(contents, vec!["Hi", "How old are you?", "30-35"]);
    assert_eq!(log.len(), 3);
}

#[test]
fn it_never_alters_prior_entries() {
    let mut log = MessageLog::default();
    log.append(Message::new(Role::User, "Hi"));
    log.append(prompt("How old are you?", &["<30", "30-35"]));
    let before = log.all().to_vec();

    log.append(Message::new(Role::User, "<30"));
    log.append(Message::new(Role::Bot, "Thanks."));

    assert_eq!(&log.all()[..2], before.as_slice());
}

#[test]
fn it_has_no_latest_bot_message_when_empty() {
    let log = MessageLog::default();
    assert!(log.is_empty());
    assert!(log.latest_bot_message().is_none());
    assert!(!log.is_interactive(0));
}

#[test]
fn it_returns_latest_bot_message() {
    let mut log = MessageLog::default();
    log.append(Message::new(Role::User, "Hi"));
    log.append(prompt("How old are you?", &["<30", "30-35"]));

    let latest = log.latest_bot_message().unwrap();
    assert_eq!(latest.content, "How old are you?");
    assert_eq!(latest.options.len(), 2);
}

#[test]
fn it_has_no_latest_bot_message_after_user_turn() {
    let mut log = MessageLog::default();
    log.append(prompt("How old are you?", &["<30", "30-35"]));
    log.append(Message::new(Role::User, "<30"));

    assert!(log.latest_bot_message().is_none());
}

#[test]
fn it_only_keeps_the_latest_prompt_interactive() {
    let mut log = MessageLog::default();
    log.append(prompt("How old are you?", &["<30", "30-35"]));
    log.append(Message::new(Role::User, "<30"));
    log.append(prompt("How long have you been trying?", &["<1 year", "1-3 years"]));

    assert!(!log.is_interactive(0));
    assert!(!log.is_interactive(1));
    assert!(log.is_interactive(2));
    assert!(!log.is_interactive(3));
}

#[test]
fn it_notifies_subscribers_on_append() {
    let mut log = MessageLog::default();
    let mut rx = log.subscribe();

    log.append(Message::new(Role::User, "Hi"));
    log.append(Message::new(Role::Bot, "Hello!"));

    assert_eq!(rx.try_recv().unwrap(), Event::MessageAppended(0));
    assert_eq!(rx.try_recv().unwrap(), Event::MessageAppended(1));
    assert!(rx.try_recv().is_err());
}

#[test]
fn it_prunes_dropped_subscribers() {
    let mut log = MessageLog::default();
    let rx = log.subscribe();
    drop(rx);

    log.append(Message::new(Role::User, "Hi"));
    assert_eq!(log.subscribers.len(), 0);
    assert_eq!(log.len(), 1);
}
