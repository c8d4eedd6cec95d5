pub mod declaration;
pub mod registry;
pub mod selector;
pub mod stylesheet;
