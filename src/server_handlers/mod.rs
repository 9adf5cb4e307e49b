pub mod reporte;
pub mod docs;

pub use reporte::*;
pub use docs::*;
