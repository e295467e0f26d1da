pub mod calendar;
pub mod classifier;

pub use calendar::next_business_day;
pub use classifier::{classify, Classification, Signal};
