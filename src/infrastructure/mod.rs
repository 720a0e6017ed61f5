pub mod dialogue;
pub mod storage;
