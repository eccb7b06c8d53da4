#[macro_use]
extern crate quickcheck_macros;

mod quick;
mod tree;

pub(crate) use quick::Op;
