pub mod hold;
pub mod machine;
pub mod opacity;
