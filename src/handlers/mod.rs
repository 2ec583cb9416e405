pub mod run;
pub mod version;
