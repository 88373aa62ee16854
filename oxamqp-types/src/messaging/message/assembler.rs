//! Turns a [`Message`] into the bytes carried by a transfer

use bytes::{Bytes, BytesMut};
use oxamqp_codec::{ser::write_value, Error};

use crate::messaging::{Footer, Section, SectionKind};

use super::Message;

/// Computes footer entries from the encoded sections that precede the
/// footer, e.g. a content hash or a signature
pub type FooterCallback = Box<dyn FnOnce(&mut Footer, &[u8]) + Send>;

/// The encoded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledMessage {
    /// Sections in transmission order
    pub sections: Vec<SectionKind>,

    /// The concatenated encoding of every section
    pub payload: Bytes,
}

/// Encodes a message and fills in its footer
///
/// Every section before the footer is encoded first. The footer callbacks
/// then run once each, in the order they were registered, over the footer
/// of the message and the encoded bytes. A later callback sees the entries
/// added by an earlier one. The footer is appended only if it ends up
/// holding at least one entry.
#[derive(Default)]
pub struct Assembler {
    footer_callbacks: Vec<FooterCallback>,
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("footer_callbacks", &self.footer_callbacks.len())
            .finish()
    }
}

impl Assembler {
    /// Creates an assembler without footer callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a footer callback
    pub fn footer_callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Footer, &[u8]) + Send + 'static,
    {
        self.footer_callbacks.push(Box::new(callback));
        self
    }

    /// Registers several footer callbacks, keeping their order
    pub fn footer_callbacks(mut self, callbacks: impl IntoIterator<Item = FooterCallback>) -> Self {
        self.footer_callbacks.extend(callbacks);
        self
    }

    /// Encodes `message`
    pub fn assemble(self, mut message: Message) -> Result<AssembledMessage, Error> {
        let mut footer = message.footer.take().unwrap_or_default();

        let mut sections = Vec::new();
        let mut buf = BytesMut::new();
        for (kind, value) in message.into_bare_sections()? {
            write_value(&mut buf, &value)?;
            sections.push(kind);
        }

        for callback in self.footer_callbacks {
            callback(&mut footer, &buf[..]);
        }

        if !footer.is_empty() {
            write_value(&mut buf, &footer.into_section_value()?)?;
            sections.push(SectionKind::Footer);
        }

        Ok(AssembledMessage {
            sections,
            payload: buf.freeze(),
        })
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::Value;

    use crate::messaging::{Footer, Message, SectionKind};

    use super::Assembler;

    #[test]
    fn test_empty_footer_is_not_sent() {
        let message = Message::new("message").unwrap();
        let assembled = Assembler::new().assemble(message).unwrap();
        assert_eq!(assembled.sections, [SectionKind::Data]);
        assert_eq!(&assembled.payload[..3], &[0x00, 0x53, 0x75]);
    }

    #[test]
    fn test_existing_footer_entries_come_first() {
        let footer = Footer::builder().insert("x-opt-first", Value::Long(1)).build();
        let message = Message::builder().value(1i64).footer(footer).build().unwrap();
        let assembled = Assembler::new()
            .footer_callback(|footer, _| {
                assert!(footer.contains_key("x-opt-first"));
                footer.insert("x-opt-second".into(), Value::Long(2));
            })
            .assemble(message)
            .unwrap();

        let decoded = Message::decode(&assembled.payload).unwrap();
        let keys: Vec<_> = decoded
            .footer
            .unwrap()
            .keys()
            .map(|k| k.as_str().to_string())
            .collect();
        assert_eq!(keys, ["x-opt-first", "x-opt-second"]);
    }
}
