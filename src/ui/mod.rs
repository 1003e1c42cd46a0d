mod bars;
mod layout;
mod report;
mod table;
mod width;

pub use report::{Field, FieldValue, Report, Section};
pub(crate) use report::write_report;
#[cfg(test)]
pub(crate) use width::display_width;
