//! Service method stubs: name-and-type records pairing an RPC's request
//! and response messages.
//!
//! The runtime provides no transport. A caller supplies a byte-in/byte-out
//! function and [`ServiceMethod::call`] handles the encode and decode on
//! either side of it.

use core::fmt;
use core::marker::PhantomData;

use bytes::Bytes;

use crate::error::DecodeError;
use crate::message::Message;
use crate::reader::Reader;

/// One RPC declaration: the fully qualified service name, the method name,
/// and the request/response message types.
#[derive(Debug, Clone, Copy)]
pub struct ServiceMethod<Req, Res> {
    service: &'static str,
    method: &'static str,
    _marker: PhantomData<fn() -> (Req, Res)>,
}

impl<Req: Message, Res: Message> ServiceMethod<Req, Res> {
    /// Declare a method, e.g. `ServiceMethod::new("pkg.Greeter", "Hello")`.
    pub const fn new(service: &'static str, method: &'static str) -> Self {
        ServiceMethod {
            service,
            method,
            _marker: PhantomData,
        }
    }

    /// The fully qualified service name.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// The method name.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// The conventional request path, `/pkg.Service/Method`.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.service, self.method)
    }

    /// Invoke the method through a caller-supplied transport.
    pub fn call<F, E>(&self, transport: F, request: &Req) -> Result<Res, CallError<E>>
    where
        F: FnOnce(Bytes) -> Result<Bytes, E>,
    {
        let payload = request.to_proto().contents();
        let response = transport(payload).map_err(CallError::Transport)?;
        let mut reader = Reader::new(response);
        Res::from_proto(&mut reader).map_err(CallError::Decode)
    }
}

/// Failure of a [`ServiceMethod::call`].
#[derive(Debug)]
pub enum CallError<E> {
    /// The transport function failed.
    Transport(E),
    /// The response bytes did not decode.
    Decode(DecodeError),
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Transport(e) => write!(f, "transport error: {e}"),
            CallError::Decode(e) => write!(f, "response decode error: {e}"),
        }
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for CallError<E> {}
