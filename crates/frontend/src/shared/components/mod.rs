pub mod dashboard_card;
pub mod pagination_controls;
pub mod status_indicator;
