//! Property-based tests for the ChatView state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences:
//! - Messages are append-only, in arrival order, without dedup
//! - Each member snapshot replaces the previous one wholesale
//! - No event is acted upon after teardown

use proptest::prelude::*;
use texchat_app::{AppAction, AppEvent, ChatView, KeyInput, Member, Message, TimerToken};
use texchat_proto::Outbound;

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alice", "bob", "carol", ""]).prop_map(String::from)
}

fn message_strategy() -> impl Strategy<Value = Message> {
    (name_strategy(), prop::option::of(name_strategy()), "[a-z ]{0,12}").prop_map(
        |(username, receiver, body)| match receiver {
            Some(receiver) => Message::private(username, receiver, body),
            None => Message::broadcast(username, body),
        },
    )
}

fn members_strategy() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(
        ("[a-f0-9]{1,4}", name_strategy()).prop_map(|(id, name)| Member::new(id, name)),
        0..6,
    )
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => any::<char>().prop_filter("printable", |c| !c.is_control()).prop_map(KeyInput::Char),
        1 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Right),
        1 => Just(KeyInput::Tab),
        1 => Just(KeyInput::Enter),
        1 => Just(KeyInput::Ctrl('e')),
    ]
}

/// Generate random view events, excluding logout and quit keys.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        3 => message_strategy().prop_map(AppEvent::MessageReceived),
        2 => members_strategy().prop_map(AppEvent::MembersJoined),
        2 => key_strategy().prop_map(AppEvent::Key),
        1 => "[a-f0-9]{1,4}".prop_map(|id| AppEvent::Connected { channel_id: id }),
        1 => Just(AppEvent::Disconnected),
        1 => ("[a-f0-9]{1,4}", any::<bool>())
            .prop_map(|(member_id, is_typing)| AppEvent::TypingStatus { member_id, is_typing }),
        1 => (0u64..8).prop_map(|t| AppEvent::TypingTimerElapsed { token: TimerToken(t) }),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
    ]
}

proptest! {
    #[test]
    fn messages_are_append_only_in_arrival_order(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut view = ChatView::new("alice");
        let mut expected = Vec::new();

        for event in events {
            if let AppEvent::MessageReceived(message) = &event {
                expected.push(message.clone());
            }
            let _ = view.handle(event);
            prop_assert_eq!(view.messages(), expected.as_slice());
        }
    }

    #[test]
    fn members_equal_latest_snapshot(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut view = ChatView::new("alice");
        let mut latest: Vec<Member> = Vec::new();

        for event in events {
            if let AppEvent::MembersJoined(members) = &event {
                latest = members.clone();
            }
            let _ = view.handle(event);
            prop_assert_eq!(view.members(), latest.as_slice());
        }
    }

    #[test]
    fn at_most_one_typing_timer_and_false_only_for_pending_token(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut view = ChatView::new("alice");

        for event in events {
            let pending = view.pending_typing_timer();
            let elapsed = match &event {
                AppEvent::TypingTimerElapsed { token } => Some(*token),
                _ => None,
            };
            let actions = view.handle(event);

            let arms = actions
                .iter()
                .filter(|a| matches!(a, AppAction::ArmTypingTimer { .. }))
                .count();
            prop_assert!(arms <= 1);

            if let Some(token) = elapsed {
                let stopped = actions
                    .iter()
                    .any(|a| matches!(a, AppAction::Emit(Outbound::Typing(s)) if !s.is_typing));
                if stopped {
                    prop_assert_eq!(pending, Some(token));
                }
            }
        }
    }

    #[test]
    fn nothing_happens_after_logout(
        before in prop::collection::vec(event_strategy(), 0..20),
        after in prop::collection::vec(event_strategy(), 1..20),
    ) {
        let mut view = ChatView::new("alice");
        for event in before {
            let _ = view.handle(event);
        }
        let _ = view.logout();
        let messages = view.messages().to_vec();
        let members = view.members().to_vec();

        for event in after {
            prop_assert!(view.handle(event).is_empty());
        }
        prop_assert!(view.logout().is_empty());
        prop_assert_eq!(view.messages(), messages.as_slice());
        prop_assert_eq!(view.members(), members.as_slice());
    }
}
