pub mod case;
pub mod handle;
pub mod registry;
