pub mod fintual;

pub use fintual::FintualProvider;
