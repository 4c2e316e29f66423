//! Spec-driven Protocol Buffers codec runtime.
//!
//! Generated code describes each message once, as a [`spec::MessageSpec`]
//! built from the combinators in [`spec`] and the typed value codecs in
//! [`codec`]. That single description drives the binary wire codec
//! ([`decode`], [`encode`]), the canonical proto3 JSON mapping ([`json`]),
//! and field-wise merging ([`merge`]). The code generator that emits those
//! descriptions lives outside this crate; the runtime is usable on its own
//! for hand-written specs.

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod extensions;
pub mod json;
pub mod leb128;
pub mod map;
pub mod merge;
pub mod message;
pub mod oneof;
pub mod reader;
pub mod scalar;
pub mod service;
pub mod spec;
pub mod wire;
pub mod writer;

pub use codec::Codec;
pub use decode::Strategy;
pub use error::{DecodeError, DecodeErrorKind};
pub use extensions::{Extension, ExtensionSet};
pub use json::JsonOptions;
pub use map::MapField;
pub use message::{Message, ProtoEnum};
pub use oneof::Oneof;
pub use reader::Reader;
pub use scalar::{Fixed32, Fixed64, Sfixed32, Sfixed64, Sint32, Sint64};
pub use service::{CallError, ServiceMethod};
pub use spec::{FieldSpec, MessageSpec, Packing};
pub use wire::{FieldKind, WireField, WireType};
pub use writer::{Writer, WriterMode};
