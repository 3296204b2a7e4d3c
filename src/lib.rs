#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod network;
pub mod raw;
pub mod signer;
pub mod solc;
pub mod test_utils;
pub mod verification;
