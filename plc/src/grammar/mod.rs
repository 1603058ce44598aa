pub mod parser;
pub mod parsercore;
pub mod scanner;
pub mod token;
