pub mod period;
pub mod price_point;
pub mod price_series;
pub mod reference;
