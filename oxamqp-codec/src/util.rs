use crate::format_code::EncodingCodes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum NewType {
    #[default]
    None,
    Array,
    Dec32,
    Dec64,
    Dec128,
    Symbol,
    Timestamp,
    Uuid,
}

/// Array elements share one constructor. The first element writes it, the
/// others must agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IsArrayElement {
    False,
    FirstElement,
    OtherElement(EncodingCodes),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EnumType {
    #[default]
    None,
    Descriptor,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StructEncoding {
    None,
    DescribedList,
    DescribedBasic,
}
