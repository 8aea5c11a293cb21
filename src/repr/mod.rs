/*!
# Graph Representations

Concrete implementations of the [`IndexGraph`] capability set. Currently this is the immutable
[`CsrGraph`], which every algorithm and generator in this crate works with.
*/

use crate::{error::*, ops::*, *};

mod csr;

pub use csr::*;
