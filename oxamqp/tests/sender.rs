use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use hmac::{Hmac, Mac};
use oxamqp::{
    codec::{
        composite::Composite, described::Described, descriptor::Descriptor, list::List,
        primitives::Binary, to_vec, Value,
    },
    transport::TransportError,
    types::{
        definitions::{ReceiverSettleMode, Role, SenderSettleMode},
        messaging::{
            Accepted, AmqpSequence, BodySection, Data, DeliveryState, Footer, Message, Modified,
            Outcome, Received, Released,
        },
    },
    Guarantee, SendError, SendOptions, SendingLink,
};
use sha2::Sha256;

mod common;
use common::{endpoints, Call, Reply};

fn received(offset: u64) -> Value {
    Received {
        section_number: 0,
        section_offset: offset,
    }
    .into_value()
}

#[test]
fn construction_does_not_touch_the_transport() {
    let (endpoints, state) = endpoints();
    let link = SendingLink::new("link-1", None, endpoints);
    assert_eq!(link.name(), "link-1");
    assert!(state.lock().calls.is_empty());
}

#[test]
fn at_most_once_sends_one_settled_transfer() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints);

    let outcome = link.send("message").unwrap();
    assert!(outcome.is_none());

    let state = state.lock();
    assert!(matches!(
        state.calls.as_slice(),
        [
            Call::Connect,
            Call::OpenSession(_),
            Call::Attach(_, _),
            Call::Transfer(_, _, _)
        ]
    ));
    let transfers = state.transfers();
    assert_eq!(transfers.len(), 1);
    assert!(transfers[0].0.settled);
    assert!(state.dispositions().is_empty());
}

#[test]
fn link_attaches_as_mixed_sender() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::builder()
        .name("link-2")
        .source("src")
        .target("q1")
        .attach(endpoints);
    link.send(()).unwrap();

    let state = state.lock();
    let attach = state
        .calls
        .iter()
        .find_map(|call| match call {
            Call::Attach(_, attach) => Some(attach.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(attach.name, "link-2");
    assert_eq!(attach.role, Role::Sender);
    assert_eq!(attach.snd_settle_mode, SenderSettleMode::Mixed);
    assert_eq!(attach.rcv_settle_mode, ReceiverSettleMode::Second);
    assert_eq!(attach.source.as_deref(), Some("src"));
    assert_eq!(attach.target.as_deref(), Some("q1"));
}

#[test]
fn at_least_once_blocks_until_accepted() {
    let (endpoints, state) = endpoints();
    state.lock().reply(vec![
        Reply::State(received(10)),
        Reply::State(Accepted {}.into_value()),
    ]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let options = SendOptions::builder()
        .guarantee(Guarantee::AtLeastOnce)
        .on_disposition(move |_state| {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        })
        .build();

    let outcome = link.send_with("message", options).unwrap();
    assert_eq!(outcome, Some(Outcome::Accepted(Accepted {})));
    assert_eq!(seen.load(Ordering::SeqCst), 2);

    // The peer settled with its outcome, so there is nothing left to settle
    let state = state.lock();
    assert!(!state.transfers()[0].0.settled);
    assert!(state.dispositions().is_empty());
}

#[test]
fn at_least_once_settles_an_unsettled_outcome() {
    let (endpoints, state) = endpoints();
    state.lock().reply(vec![
        Reply::State(received(10)),
        Reply::Unsettled(Accepted {}.into_value()),
    ]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let outcome = link
        .send_with("message", Guarantee::AtLeastOnce.into())
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Accepted(Accepted {})));

    let tag = link.last_delivery_tag().unwrap().clone();
    let state = state.lock();
    match state.calls.as_slice() {
        [
            Call::Connect,
            Call::OpenSession(_),
            Call::Attach(_, attach),
            Call::Transfer(transfer_handle, transfer, _),
            Call::Dispose(dispose_handle, dispose_tag, dispose_state),
        ] => {
            assert_eq!(attach.rcv_settle_mode, ReceiverSettleMode::Second);
            assert!(!transfer.settled);
            assert_eq!(transfer_handle, dispose_handle);
            assert_eq!(dispose_tag, &tag);
            assert_eq!(dispose_state, &DeliveryState::Accepted(Accepted {}));
        }
        calls => panic!("unexpected calls {:?}", calls),
    }

    // Only exactly-once settlements are recorded
    assert!(link.settlement(&tag).is_none());
}

#[test]
fn at_least_once_settles_with_the_peer_outcome_not_the_callback_answer() {
    let (endpoints, state) = endpoints();
    state
        .lock()
        .reply(vec![Reply::Unsettled(Released {}.into_value())]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let options = SendOptions::builder()
        .guarantee(Guarantee::AtLeastOnce)
        .on_disposition(|_state| Some(Outcome::Accepted(Accepted {})))
        .build();
    let outcome = link.send_with("message", options).unwrap();
    assert_eq!(outcome, Some(Outcome::Released(Released {})));

    let dispositions = state.lock().dispositions();
    assert_eq!(dispositions.len(), 1);
    assert_eq!(dispositions[0].1, DeliveryState::Released(Released {}));
}

#[test]
fn progress_is_observed_before_the_outcome() {
    let (endpoints, state) = endpoints();
    state.lock().reply(vec![
        Reply::State(received(1)),
        Reply::State(received(2)),
        Reply::State(Released {}.into_value()),
    ]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = seen.clone();
    let options = SendOptions::builder()
        .guarantee(Guarantee::AtLeastOnce)
        .on_disposition(move |state| {
            log.lock().push(state.is_terminal());
            None
        })
        .build();

    let outcome = link.send_with(1i64, options).unwrap();
    assert_eq!(outcome, Some(Outcome::Released(Released {})));
    assert_eq!(*seen.lock(), [false, false, true]);
}

#[test]
fn dispositions_for_other_deliveries_are_ignored() {
    let (endpoints, state) = endpoints();
    let other = Binary::from(vec![0xff; 4]);
    state.lock().reply(vec![
        Reply::Other(other, Accepted {}.into_value()),
        Reply::State(Released {}.into_value()),
    ]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let outcome = link
        .send_with("message", Guarantee::AtLeastOnce.into())
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Released(Released {})));
}

#[test]
fn mixed_body_fails_before_any_transport_call() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints);

    let body = vec![
        BodySection::from(Data::new("a")),
        BodySection::from(AmqpSequence::new([true])),
    ];
    let err = link.send(body).unwrap_err();
    assert!(matches!(err, SendError::Codec(oxamqp::codec::Error::Argument(_))));
    assert!(state.lock().calls.is_empty());
}

#[test]
fn unknown_outcome_fails_fast() {
    let (endpoints, state) = endpoints();
    let fifth = Value::from(Described::new(Descriptor::code(0x28), Value::List(List::new())));
    state.lock().reply(vec![Reply::State(fifth)]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let err = link
        .send_with("message", Guarantee::AtLeastOnce.into())
        .unwrap_err();
    assert!(matches!(err, SendError::Codec(oxamqp::codec::Error::Argument(_))));
}

#[test]
fn exactly_once_echoes_the_peer_outcome() {
    let (endpoints, state) = endpoints();
    let modified = Modified {
        delivery_failed: Some(true),
        undeliverable_here: Some(false),
        message_annotations: None,
    };
    let peer_value = modified.clone().into_value();
    state.lock().reply(vec![Reply::State(peer_value.clone())]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let outcome = link
        .send_with("message", Guarantee::ExactlyOnce.into())
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Modified(modified.clone())));

    let tag = link.last_delivery_tag().unwrap().clone();
    let dispositions = state.lock().dispositions();
    assert_eq!(dispositions.len(), 1);
    let (echo_tag, echo_state) = &dispositions[0];
    assert_eq!(echo_tag, &tag);
    assert_eq!(
        to_vec(&Value::from(echo_state.clone())).unwrap(),
        to_vec(&peer_value).unwrap()
    );
    assert_eq!(
        link.settlement(&tag),
        Some(&Outcome::Modified(modified))
    );
}

#[test]
fn exactly_once_settles_with_the_callback_override() {
    let (endpoints, state) = endpoints();
    state.lock().reply(vec![Reply::State(Released {}.into_value())]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let options = SendOptions::builder()
        .guarantee(Guarantee::ExactlyOnce)
        .on_disposition(|state| match state {
            DeliveryState::Released(_) => Some(Outcome::Accepted(Accepted {})),
            _ => None,
        })
        .build();
    let outcome = link.send_with("message", options).unwrap();
    assert_eq!(outcome, Some(Outcome::Released(Released {})));

    let dispositions = state.lock().dispositions();
    assert_eq!(dispositions[0].1, DeliveryState::Accepted(Accepted {}));
    let tag = link.last_delivery_tag().unwrap().clone();
    assert_eq!(link.settlement(&tag), Some(&Outcome::Accepted(Accepted {})));
}

#[test]
fn settlement_cache_is_bounded() {
    let (endpoints, _state) = endpoints();
    let mut link = SendingLink::builder()
        .name("link-1")
        .dispositions_capacity(2)
        .attach(endpoints);

    let mut tags = Vec::new();
    for _ in 0..3 {
        link.send_with("message", Guarantee::ExactlyOnce.into())
            .unwrap();
        tags.push(link.last_delivery_tag().unwrap().clone());
    }

    assert!(link.settlement(&tags[0]).is_none());
    assert!(link.settlement(&tags[1]).is_some());
    assert!(link.settlement(&tags[2]).is_some());
}

#[test]
fn delivery_tags_count_up() {
    let (endpoints, _state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints);
    link.send("a").unwrap();
    link.send("b").unwrap();
    assert_eq!(
        link.last_delivery_tag().map(|tag| tag.to_vec()),
        Some(vec![0, 0, 0, 1])
    );
}

#[test]
fn topology_is_recreated_after_a_transfer_failure() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints.clone());
    link.send("first").unwrap();
    assert_eq!(endpoints.generation(), 1);

    state.lock().fail_transfers = 1;
    let err = link.send("second").unwrap_err();
    assert!(err.is_transport());

    let mark = state.lock().calls.len();
    link.send("third").unwrap();

    let state = state.lock();
    assert!(matches!(
        &state.calls[mark..],
        [
            Call::Connect,
            Call::OpenSession(_),
            Call::Attach(_, _),
            Call::Transfer(_, _, _)
        ]
    ));
    assert!(state
        .position(|call| matches!(call, Call::CloseConnection(_)))
        .is_some());
    assert_eq!(endpoints.generation(), 2);
}

#[test]
fn dead_session_is_replaced_with_its_connection() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints);
    link.send("first").unwrap();

    state.lock().open_sessions.clear();
    let mark = state.lock().calls.len();
    link.send("second").unwrap();

    let state = state.lock();
    assert!(matches!(
        &state.calls[mark..],
        [
            Call::CloseConnection(_),
            Call::Connect,
            Call::OpenSession(_),
            Call::Attach(_, _),
            Call::Transfer(_, _, _)
        ]
    ));
}

#[test]
fn links_share_the_session() {
    let (endpoints, state) = endpoints();
    let mut first = SendingLink::new("link-1", None, endpoints.clone());
    let mut second = SendingLink::new("link-2", None, endpoints);
    first.send("a").unwrap();
    second.send("b").unwrap();

    let state = state.lock();
    let connects = state
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Connect))
        .count();
    let attaches = state
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Attach(_, _)))
        .count();
    assert_eq!(connects, 1);
    assert_eq!(attaches, 2);
}

#[test]
fn detach_while_waiting_is_a_transport_failure() {
    let (endpoints, state) = endpoints();
    state.lock().reply(vec![Reply::State(received(0)), Reply::Detach]);
    let mut link = SendingLink::new("link-1", None, endpoints);

    let err = link
        .send_with("message", Guarantee::AtLeastOnce.into())
        .unwrap_err();
    assert!(matches!(
        err,
        SendError::Transport(TransportError::LinkDetached)
    ));

    let mark = state.lock().calls.len();
    link.send("again").unwrap();
    assert!(matches!(state.lock().calls[mark], Call::Connect));
}

#[test]
fn footer_callback_signs_the_encoded_message() {
    let (endpoints, state) = endpoints();
    let mut link = SendingLink::new("link-1", None, endpoints);

    let options = SendOptions::builder()
        .footer_callback(|footer: &mut Footer, payload: &[u8]| {
            let mut mac = Hmac::<Sha256>::new_from_slice(b"key").unwrap();
            mac.update(payload);
            let tag = mac.finalize().into_bytes().to_vec();
            footer.insert("x-opt-hmac".into(), Value::Binary(Binary::from(tag)));
        })
        .build();
    link.send_with("message", options).unwrap();

    let (_, payload) = state.lock().transfers().remove(0);
    let message = Message::decode(&payload).unwrap();
    let footer = message.footer.clone().unwrap();

    let bare = oxamqp::types::messaging::Assembler::new()
        .assemble(Message {
            footer: None,
            ..message
        })
        .unwrap();
    let mut mac = Hmac::<Sha256>::new_from_slice(b"key").unwrap();
    mac.update(&bare.payload);
    let expected = mac.finalize().into_bytes().to_vec();
    assert_eq!(
        footer.get("x-opt-hmac"),
        Some(&Value::Binary(Binary::from(expected)))
    );
}
