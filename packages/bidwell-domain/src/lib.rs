pub mod criteria;
pub mod keywords;
pub mod models;
pub mod normalize;
pub mod search;
