pub mod frame_names;
pub mod overview_board;
pub mod sections;
