//! # Duplex Compression
//!
//! Compression stages for duplex pipelines. Every stage implements
//! [`duplex_common::Stage`] and nothing else; this crate knows nothing about
//! encryption.
//!
//! - [`LzwStage`] - variable-width LZW (the default compressor)
//! - [`GzipStage`], [`ZstdStage`], [`Bzip2Stage`] - stream compressors
//!
//! The free `compress`/`decompress` functions of each module are usable on
//! their own.

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod bzip2;
pub mod gzip;
pub mod lzw;
pub mod zstd;

pub use algorithm::{CompressionAlgorithm, UnknownAlgorithm};
pub use bzip2::Bzip2Stage;
pub use gzip::GzipStage;
pub use lzw::LzwStage;
pub use zstd::ZstdStage;

pub use duplex_common::{Result, Stage, StageKind, TransformError};
