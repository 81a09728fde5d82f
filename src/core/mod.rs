// Core modules: schema bindings, the sample, encoding, storage and errors.
pub mod codec;
pub mod error;
pub mod record;
pub mod sample;
pub mod schema;
pub mod storage;
