/*!
# Graph Algorithms

This module provides the **graph algorithms** built on top of [`IndexGraph`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use idxgraphs::algo::*;
```
and gain access to traversals, strongly/weakly connected components, biconnected components,
elementary cycle enumeration, minimum vertex cuts and bidirectional shortest paths.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod biconnected;
mod bidirectional;
mod connectivity;
mod cycles;
mod network_flow;
mod partition;
mod path;
mod traversal;
mod vertex_cut;

use crate::{prelude::*, utils::*};

pub use biconnected::*;
pub use bidirectional::*;
pub use connectivity::*;
pub use cycles::*;
pub use network_flow::*;
pub use partition::*;
pub use path::*;
pub use traversal::*;
pub use vertex_cut::*;
