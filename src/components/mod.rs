pub mod app;
pub mod distance_readout;
pub mod info_panel;
pub mod measure_view;
