pub mod connections;
pub mod document;
pub mod node;
pub mod shape;

pub use connections::*;
pub use document::*;
pub use node::*;
pub use shape::*;
