pub mod engine;
pub mod layout_fees;
pub mod parcel_fees;
pub mod parser;
pub mod polygon;
pub mod projection;
pub mod quota;
pub mod zoning;

pub use crate::domain::model::{FeeResult, LayoutQuote, Parcel, Schedule};
pub use crate::domain::ports::{QuotaStore, ReverseGeocoder, ZoneLookup};
pub use crate::utils::error::Result;
