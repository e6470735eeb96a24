pub mod canvas;
pub mod clock;
pub mod input;
pub mod mode;
pub mod view;
