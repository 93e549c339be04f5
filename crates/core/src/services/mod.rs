pub mod alert_service;
pub mod evaluator_service;
pub mod notification_service;
