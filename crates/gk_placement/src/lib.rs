pub mod resolver;

pub use resolver::{resolve, Placement, END_VOID_LIFT};
