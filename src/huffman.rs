pub mod builder;
pub mod code;
pub mod efficiency;
pub mod tree;

pub use builder::{BinaryTreeBuilder, NAryTreeBuilder, TreeBuilder};
pub use code::{CodeExtractor, CodeMode, CodeTable, CodeWord};
pub use efficiency::{EfficiencyAnalyzer, EfficiencyReport};
pub use tree::{Node, Tree};

use crate::Result;

/// Picks the binary builder for radix 2 and the n-ary builder otherwise.
pub fn builder_for_radix(radix: usize) -> Result<Box<dyn TreeBuilder + Send>> {
    match radix {
        2 => Ok(Box::new(BinaryTreeBuilder)),
        _ => Ok(Box::new(NAryTreeBuilder::new(radix)?)),
    }
}
