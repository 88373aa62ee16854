//! Types defined in AMQP 1.0 specification Part 3: Messaging

/* -------------------------- 3.2 Messaging Format -------------------------- */
mod format;
pub use format::*;

/* --------------------------- 3.4 Delivery State --------------------------- */
mod delivery_state;
pub use delivery_state::*;

/* ------------------------- Message and its assembly ----------------------- */
pub mod message;
pub use message::{
    AssembledMessage, Assembler, Body, BodySection, FooterCallback, IntoBody, Message,
};
