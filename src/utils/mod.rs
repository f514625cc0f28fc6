//! Text helpers shared by the extractor and the analysis step

pub mod filters;
pub mod stopwords;
pub mod text;
