pub mod prediction_service;
pub mod roadmap_service;

pub use prediction_service::PredictionService;
pub use roadmap_service::RoadmapService;
