pub mod shop;
pub mod widgets;
