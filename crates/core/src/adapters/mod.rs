//! Front-end neutral plans for adapters that sit on top of the registry.
//!
//! Neither module here serves or draws anything. They turn descriptors into
//! the routes and form fields a server or GUI would build, and turn the raw
//! input those front-ends receive back into [`RawArguments`](crate::value::RawArguments).

pub mod forms;
pub mod http;
