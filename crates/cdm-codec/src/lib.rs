//! # cdm-codec — Configuration Data Model Codec
//!
//! Marshals the telescope control messages of `cdm-messages` to and from
//! JSON text, validating each document against the schema named by its
//! `interface` URI.
//!
//! ```ignore
//! use cdm_codec::Codec;
//! use cdm_messages::{AssignResourcesRequest, DishAllocation};
//!
//! let codec = Codec::from_env()?;
//! let request = AssignResourcesRequest::new(1, DishAllocation::new(["0001", "0002"]))?;
//! let text = codec.dumps(&request)?;
//! assert_eq!(text, r#"{"subarrayID":1,"dish":{"receptorIDList":["0001","0002"]}}"#);
//! let back: AssignResourcesRequest = codec.loads(&text)?;
//! ```
//!
//! ## Modules
//!
//! - `codec`: [`Codec`] with `dumps`, `loads` and `load_from_file`, and the
//!   per-call [`Validation`] options.
//! - `registry`: [`ConverterRegistry`], built once and read-only afterwards.
//! - `converters`: the built-in converter for every [`MessageKind`].
//! - `config`: [`CodecConfig`], read from the environment.
//! - `error`: [`CodecError`].
//!
//! [`MessageKind`]: cdm_core::MessageKind

pub mod codec;
pub mod config;
pub mod converters;
pub mod error;
pub mod registry;

pub use codec::{Codec, Validation};
pub use config::{CodecConfig, ConfigError};
pub use error::CodecError;
pub use registry::{Converter, ConverterRegistry, RegistryBuilder, RegistryError};
