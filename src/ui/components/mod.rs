pub mod flip_card;
pub mod progress_bar;
pub mod tab_bar;
pub mod timer_panel;
pub mod toast;
