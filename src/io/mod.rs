/// CSV export of result sets.
pub mod export;
