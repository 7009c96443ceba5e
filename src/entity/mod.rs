pub mod commands;
pub mod stove_data;
