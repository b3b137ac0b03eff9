pub mod catalog;
pub mod loaders;
pub mod marks;
pub mod prediction;
pub mod roadmap;

pub use catalog::{BranchEntry, Catalog, CatalogMode, ML_FEATURES};
pub use loaders::{load_catalog_file, parse_catalog};
pub use marks::{parse_mark, MarksMap};
pub use prediction::{CareerPrediction, PredictionRequest, Probability};
pub use roadmap::{RoadmapContext, RoadmapRequest, RoadmapResponse};
