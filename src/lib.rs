pub mod aggregate;
pub mod clean;
pub mod fetch;
pub mod model;
pub mod output;
pub mod report;
pub mod table;
pub mod tidy;
