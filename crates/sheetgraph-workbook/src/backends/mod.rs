#[cfg(feature = "calamine")]
pub mod calamine;
#[cfg(feature = "csv")]
pub mod csv;
#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "calamine")]
pub use self::calamine::CalamineAdapter;
#[cfg(feature = "csv")]
pub use self::csv::CsvAdapter;
#[cfg(feature = "json")]
pub use self::json::JsonAdapter;
