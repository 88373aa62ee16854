use hmac::{Hmac, Mac};
use oxamqp_codec::{primitives::Binary, Decoder, Value};
use oxamqp_types::messaging::{
    AmqpSequence, ApplicationProperties, Assembler, Body, BodySection, Data, Footer, Header,
    Message, Properties, SectionKind,
};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

fn digest_value(bytes: &[u8]) -> Value {
    Value::Binary(Binary::from(Sha256::digest(bytes).to_vec()))
}

#[test]
fn footer_callbacks_run_in_registration_order() {
    let message = Message::builder()
        .header(Header::builder().durable(true).build())
        .properties(Properties::builder().message_id("id-1").build())
        .data("message")
        .build()
        .unwrap();

    let assembled = Assembler::new()
        .footer_callback(|footer: &mut Footer, payload: &[u8]| {
            footer.insert("x-opt-sha256".into(), digest_value(payload));
        })
        .footer_callback(|footer: &mut Footer, payload: &[u8]| {
            // The signature covers the digest written by the first callback
            let digest = match footer.get("x-opt-sha256") {
                Some(Value::Binary(digest)) => digest.to_vec(),
                _ => panic!("digest missing"),
            };
            let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
            mac.update(payload);
            mac.update(&digest);
            let signature = mac.finalize().into_bytes().to_vec();
            footer.insert("x-opt-signature".into(), Value::Binary(Binary::from(signature)));
        })
        .assemble(message)
        .unwrap();

    assert_eq!(
        assembled.sections,
        [
            SectionKind::Header,
            SectionKind::Properties,
            SectionKind::Data,
            SectionKind::Footer
        ]
    );

    let decoded = Message::decode(&assembled.payload).unwrap();
    let footer = decoded.footer.unwrap();
    let keys: Vec<&str> = footer.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["x-opt-sha256", "x-opt-signature"]);
}

#[test]
fn footer_digest_covers_every_section_before_it() {
    let message = Message::builder()
        .application_properties(
            ApplicationProperties::builder()
                .insert("colour", "red")
                .build(),
        )
        .value(42i64)
        .build()
        .unwrap();

    let assembled = Assembler::new()
        .footer_callback(|footer: &mut Footer, payload: &[u8]| {
            footer.insert("x-opt-sha256".into(), digest_value(payload));
        })
        .assemble(message)
        .unwrap();

    let decoded = Message::decode(&assembled.payload).unwrap();
    let footer = decoded.footer.clone().unwrap();

    let without_footer = Message {
        footer: None,
        ..decoded
    };
    let reassembled = Assembler::new().assemble(without_footer).unwrap();
    assert_eq!(
        footer.get("x-opt-sha256"),
        Some(&digest_value(&reassembled.payload))
    );
}

#[test]
fn readme_example() {
    let message = Message::builder()
        .properties(Properties::builder().message_id(1u64).build())
        .value("hello")
        .build()
        .unwrap();
    let assembled = Assembler::new()
        .footer_callback(|footer, payload| {
            footer.insert("x-opt-len".into(), (payload.len() as u64).into());
        })
        .assemble(message)
        .unwrap();
    assert_eq!(assembled.sections.len(), 3);
}

#[test]
fn mixed_body_is_an_argument_error() {
    let err = Message::builder()
        .body(vec![
            BodySection::from(Data::new("a")),
            BodySection::from(AmqpSequence::new(["b"])),
        ])
        .build()
        .unwrap_err();
    assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
}

#[test]
fn sequence_sections_round_trip() {
    let body = Body::Sequence(vec![
        AmqpSequence::new([1i64, 2]),
        AmqpSequence::new(["x"]),
    ]);
    let message = Message::new(body.clone()).unwrap();
    let assembled = Assembler::new().assemble(message).unwrap();
    assert_eq!(
        assembled.sections,
        [SectionKind::AmqpSequence, SectionKind::AmqpSequence]
    );
    assert_eq!(Message::decode(&assembled.payload).unwrap().body, body);
}

#[test]
fn non_ascii_footer_key_fails_at_encode() {
    let message = Message::new("message").unwrap();
    let result = Assembler::new()
        .footer_callback(|footer: &mut Footer, _: &[u8]| {
            footer.insert("x-opt-é".into(), Value::Null);
        })
        .assemble(message);
    assert!(result.is_err());
}

#[test]
fn first_section_decodes_on_its_own() {
    let message = Message::new("message").unwrap();
    let assembled = Assembler::new().assemble(message).unwrap();
    let value = Decoder::new(&assembled.payload).decode().unwrap();
    assert!(matches!(value, Value::Described(_)));
}
