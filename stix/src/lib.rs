//! STIX 2.1 is a language and serialization format for exchanging cyber threat
//! intelligence.
//!
//! This crate provides typed records for the STIX domain and relationship objects, a
//! registry that decodes an object by its `type`, and a bundle codec that keeps going when
//! individual objects fail to decode.
//!
//! # Round-tripping
//! Properties that are not part of an object's schema are kept in their encoded form and
//! written back on encode, so decoding and re-encoding a document loses nothing.
//!
//! # Validation
//! Decoding only fails on input that cannot be read at all. Whether an object is
//! well formed is answered separately by [`Record::validate`], which runs every check and
//! returns an [`Outcome`] listing each one.

mod bundle;
pub mod common;
mod data;
pub mod error;
mod object;
mod outcome;
pub mod properties;
mod record;
pub mod registry;
pub mod store;
mod traits;
pub mod vocab;

pub use error::{Error, ErrorAt};

#[doc(inline)]
pub use bundle::Bundle;

#[doc(inline)]
pub use common::CommonProperties;

#[doc(inline)]
pub use data::*;

#[doc(inline)]
pub use object::*;

pub use outcome::{Audit, Diagnostic, Order, Outcome};

#[doc(inline)]
pub use record::{Record, decode_object_type};

#[doc(inline)]
pub use registry::Registry;

pub use store::Store;

pub use traits::{Check, Compare, IsEmpty};
