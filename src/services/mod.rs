pub mod harvester;
pub mod navigator;

pub use harvester::run;
