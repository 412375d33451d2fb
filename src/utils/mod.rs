pub mod export;
pub mod upstream;
