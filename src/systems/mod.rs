pub mod interface_system;

pub use interface_system::InterfaceSystem;
