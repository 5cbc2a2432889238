//! Core library for the catch23-packer command line application.
//!
//! The packer amalgamates a multi-file C++ library into one single-include
//! header. Line handling lives under [`catch23::packer::io`], the line
//! micro-grammar in [`catch23::packer::grammar`], per-file prefix parsing in
//! [`catch23::packer::prefix`], the include graph walk in
//! [`catch23::packer::resolve`], output generation in
//! [`catch23::packer::emit`] and run orchestration in
//! [`catch23::packer::pack`].

pub mod catch23;

pub use catch23::packer::{
    PackError, Result, config, emit, error, grammar, io, model, pack, prefix, resolve,
};
