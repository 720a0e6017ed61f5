mod file;
#[cfg(test)]
mod memory;

pub use file::*;
#[cfg(test)]
pub use memory::*;
