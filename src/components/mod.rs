pub mod confusion_matrix;
pub mod feedback;
pub mod model_selector;
pub mod params_table;
pub mod preview_table;
pub mod report_table;
pub mod results_board;
pub mod sidebar;
pub mod train_controls;
pub mod upload_panel;
