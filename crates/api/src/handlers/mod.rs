pub mod esp;
pub mod machine;
pub mod raspi;
