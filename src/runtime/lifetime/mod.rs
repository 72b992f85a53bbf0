pub mod startup;

pub use startup::prepare_registry;
