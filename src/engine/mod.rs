pub mod balance;
pub mod derive;
pub mod sandwich;
pub mod source;
