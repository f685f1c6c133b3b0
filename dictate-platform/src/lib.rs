pub mod git;
pub mod terminal;
pub mod test;
