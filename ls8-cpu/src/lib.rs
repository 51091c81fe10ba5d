pub mod alu;
pub mod cpu;
pub mod decoder;
pub mod error;
pub mod isa;
pub mod machine;
pub mod program;
pub mod registers;

mod stack;
