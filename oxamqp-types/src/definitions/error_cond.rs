use std::fmt::Display;

use oxamqp_codec::primitives::Symbol;

macro_rules! symbolic_condition {
    (
        $(#[$attr:meta])*
        $name:ident {
            $($variant:ident => $symbol:literal,)*
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// The condition symbol
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $symbol,)*
                }
            }
        }

        impl From<$name> for Symbol {
            fn from(value: $name) -> Self {
                Symbol::from(value.as_str())
            }
        }

        impl<'a> TryFrom<&'a str> for $name {
            type Error = &'a str;

            fn try_from(value: &'a str) -> Result<Self, Self::Error> {
                match value {
                    $($symbol => Ok($name::$variant),)*
                    _ => Err(value),
                }
            }
        }

        impl From<$name> for ErrorCondition {
            fn from(value: $name) -> Self {
                ErrorCondition::$name(value)
            }
        }
    };
}

symbolic_condition! {
    /// 2.8.15 AMQP Error
    /// Shared error conditions.
    AmqpError {
        InternalError => "amqp:internal-error",
        NotFound => "amqp:not-found",
        UnauthorizedAccess => "amqp:unauthorized-access",
        DecodeError => "amqp:decode-error",
        ResourceLimitExceeded => "amqp:resource-limit-exceeded",
        NotAllowed => "amqp:not-allowed",
        InvalidField => "amqp:invalid-field",
        NotImplemented => "amqp:not-implemented",
        ResourceLocked => "amqp:resource-locked",
        PreconditionFailed => "amqp:precondition-failed",
        ResourceDeleted => "amqp:resource-deleted",
        IllegalState => "amqp:illegal-state",
        FrameSizeTooSmall => "amqp:frame-size-too-small",
    }
}

symbolic_condition! {
    /// 2.8.16 Connection Error
    /// Symbols used to indicate connection error conditions.
    ConnectionError {
        ConnectionForced => "amqp:connection:forced",
        FramingError => "amqp:connection:framing-error",
        Redirect => "amqp:connection:redirect",
    }
}

symbolic_condition! {
    /// 2.8.17 Session Error
    /// Symbols used to indicate session error conditions.
    SessionError {
        WindowViolation => "amqp:session:window-violation",
        ErrantLink => "amqp:session:errant-link",
        HandleInUse => "amqp:session:handle-in-use",
        UnattachedHandle => "amqp:session:unattached-handle",
    }
}

symbolic_condition! {
    /// 2.8.18 Link Error
    /// Symbols used to indicate link error conditions.
    LinkError {
        DetachForced => "amqp:link:detach-forced",
        TransferLimitExceeded => "amqp:link:transfer-limit-exceeded",
        MessageSizeExceeded => "amqp:link:message-size-exceeded",
        Redirect => "amqp:link:redirect",
        Stolen => "amqp:link:stolen",
    }
}

/// The condition of an [`Error`](super::Error). Unknown symbols are kept as
/// [`ErrorCondition::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorCondition {
    AmqpError(AmqpError),
    ConnectionError(ConnectionError),
    SessionError(SessionError),
    LinkError(LinkError),
    Custom(Symbol),
}

impl ErrorCondition {
    /// The condition symbol
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCondition::AmqpError(err) => err.as_str(),
            ErrorCondition::ConnectionError(err) => err.as_str(),
            ErrorCondition::SessionError(err) => err.as_str(),
            ErrorCondition::LinkError(err) => err.as_str(),
            ErrorCondition::Custom(symbol) => symbol.as_str(),
        }
    }
}

impl From<Symbol> for ErrorCondition {
    fn from(value: Symbol) -> Self {
        let s = value.as_str();
        if let Ok(err) = AmqpError::try_from(s) {
            return ErrorCondition::AmqpError(err);
        }
        if let Ok(err) = ConnectionError::try_from(s) {
            return ErrorCondition::ConnectionError(err);
        }
        if let Ok(err) = SessionError::try_from(s) {
            return ErrorCondition::SessionError(err);
        }
        if let Ok(err) = LinkError::try_from(s) {
            return ErrorCondition::LinkError(err);
        }
        ErrorCondition::Custom(value)
    }
}

impl From<ErrorCondition> for Symbol {
    fn from(value: ErrorCondition) -> Self {
        match value {
            ErrorCondition::Custom(symbol) => symbol,
            other => Symbol::from(other.as_str()),
        }
    }
}

impl Display for ErrorCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
